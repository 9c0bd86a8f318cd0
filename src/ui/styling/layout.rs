//! Layout primitives: corner radii

/// Corner radii used across the screens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderRadius {
    /// Keypad keys and the input box
    pub small: u32,
    /// Action buttons
    pub medium: u32,
}

impl Default for BorderRadius {
    fn default() -> Self {
        Self {
            small: 4,
            medium: 8,
        }
    }
}
