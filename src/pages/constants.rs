//! Shared layout constants for the stride pages
//!
//! The layout targets a 320x240 landscape display.

/// Page title row
pub const TITLE_TOP_PX: i32 = 4;
pub const TITLE_ROW_HEIGHT_PX: u32 = 22;

/// Goal input box
pub const INPUT_LEFT_PX: i32 = 60;
pub const INPUT_TOP_PX: i32 = 30;
pub const INPUT_WIDTH_PX: u32 = 200;
pub const INPUT_HEIGHT_PX: u32 = 28;

/// Keypad grid: 3 columns by 4 rows
pub const KEYPAD_LEFT_PX: i32 = 62;
pub const KEYPAD_TOP_PX: i32 = 66;
pub const KEY_WIDTH_PX: u32 = 60;
pub const KEY_HEIGHT_PX: u32 = 30;
pub const KEY_COLUMN_STRIDE_PX: i32 = 68;
pub const KEY_ROW_STRIDE_PX: i32 = 36;

/// "Set Goal" button below the keypad
pub const CONFIRM_TOP_PX: i32 = 208;
pub const CONFIRM_HEIGHT_PX: u32 = 28;

/// Progress ring
pub const RING_CENTER_Y_PX: i32 = 95;
pub const RING_DIAMETER_PX: u32 = 150;
pub const RING_THICKNESS_PX: u32 = 14;

/// Reset / Change goal buttons on the progress page
pub const ACTION_BUTTON_TOP_PX: i32 = 196;
pub const ACTION_BUTTON_WIDTH_PX: u32 = 130;
pub const ACTION_BUTTON_HEIGHT_PX: u32 = 36;
pub const ACTION_BUTTON_MARGIN_PX: i32 = 20;

/// Notice banner along the top edge
pub const TOAST_MARGIN_PX: i32 = 20;
pub const TOAST_TOP_PX: i32 = 6;
pub const TOAST_HEIGHT_PX: u32 = 26;

/// Longest goal the keypad accepts
pub const MAX_GOAL_DIGITS: usize = 7;
