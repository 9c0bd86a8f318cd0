//! Styling for the stride UI
//!
//! - [`colors`] - palette and named colors
//! - [`layout`] - corner radii
//! - [`style`] - per-element style and button variants

pub mod colors;
pub mod layout;
pub mod style;

pub use colors::{
    ACCENT, BACKGROUND, BORDER, ColorPalette, MUTED_TEXT, RING_TRACK, SECONDARY, SURFACE,
    TOAST_BACKGROUND, WHITE,
};
pub use layout::BorderRadius;
pub use style::{ButtonVariant, Style};
