// src/ui/mod.rs
//! Stride UI system for small touch displays
//!
//! - Core traits for drawable and touchable elements
//! - Components: buttons, text, the progress ring and the notice toast
//! - Styling shared by every component
//! - Dirty tracking so only changed elements are redrawn

pub mod components;
pub mod core;
pub mod styling;

pub use components::{Button, ProgressRing, TextComponent, TextSize, Toast};
pub use core::{
    Action, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, Drawable, GoalText, PageId, TouchEvent,
    TouchPoint, TouchResult, Touchable, screen_bounds,
};
pub use styling::{BorderRadius, ButtonVariant, ColorPalette, Style};
