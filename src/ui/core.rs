// src/ui/core.rs
//! Core UI traits and types for the stride UI system

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::storage::TextValue;

/// Display width in pixels
pub const DISPLAY_WIDTH_PX: u16 = 320;

/// Display height in pixels
pub const DISPLAY_HEIGHT_PX: u16 = 240;

/// Goal text carried by [`Action::SetGoal`]
pub type GoalText = TextValue;

/// Full-screen bounding rectangle
pub fn screen_bounds() -> Rectangle {
    Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
    )
}

/// Represents a 2D touch point on the display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Touch events that can occur on the UI
#[derive(Debug, Clone, Copy)]
pub enum TouchEvent {
    /// Initial touch press at a point
    Press(TouchPoint),
    /// Touch drag to a new point
    Drag(TouchPoint),
    /// Finger lifted
    Release(TouchPoint),
}

/// Result from handling a touch event
#[derive(Debug, Clone, PartialEq)]
pub enum TouchResult {
    /// Event was handled by this element
    Handled,
    /// Event was not handled, pass to next element
    NotHandled,
    /// Event triggered an action
    Action(Action),
}

/// Actions that UI elements can trigger
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Keypad digit pressed on the goal entry page
    Digit(u8),
    /// Keypad backspace
    Backspace,
    /// "Set Goal" pressed; the goal entry page turns this into `SetGoal`
    SubmitGoal,
    /// Confirm the given goal
    SetGoal(GoalText),
    /// Make the current step count the new baseline
    ResetSteps,
    /// Return to the goal entry page
    ChangeGoal,
}

/// Page identifier for navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    GoalEntry,
    Progress,
}

/// Trait for any UI element that can be drawn
pub trait Drawable {
    /// Draw the element to the display within the given bounds
    fn draw<D: DrawTarget<Color = embedded_graphics::pixelcolor::Rgb565>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error>;

    /// Get the bounds of this drawable element
    fn bounds(&self) -> Rectangle;

    /// Check if this element needs to be redrawn
    fn is_dirty(&self) -> bool;

    /// Mark this element as clean (already drawn)
    fn mark_clean(&mut self);

    /// Mark this element as dirty (needs redraw)
    fn mark_dirty(&mut self);
}

/// Trait for UI elements that respond to touch events
pub trait Touchable {
    /// Check if a point is within this element's bounds
    fn contains_point(&self, point: TouchPoint) -> bool;

    /// Handle a touch event, returns result indicating if handled and any action
    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult;
}
