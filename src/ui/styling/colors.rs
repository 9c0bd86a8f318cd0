//! Color definitions for the step counter screens
//!
//! All colors are RGB565. To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

/// Screen background - near black with a blue tint
pub const BACKGROUND: Rgb565 = Rgb565::new(16 >> 3, 20 >> 2, 28 >> 3);

/// Cards, input box and disabled buttons
pub const SURFACE: Rgb565 = Rgb565::new(34 >> 3, 40 >> 2, 52 >> 3);

/// Outline around the input box
pub const BORDER: Rgb565 = Rgb565::new(64 >> 3, 72 >> 2, 88 >> 3);

/// Progress arc and primary buttons - warm green
pub const ACCENT: Rgb565 = Rgb565::new(88 >> 3, 196 >> 2, 120 >> 3);

/// Secondary buttons - slate blue
pub const SECONDARY: Rgb565 = Rgb565::new(70 >> 3, 110 >> 2, 170 >> 3);

/// Unfilled part of the progress ring
pub const RING_TRACK: Rgb565 = Rgb565::new(48 >> 3, 56 >> 2, 70 >> 3);

/// Notice banner background - muted amber
pub const TOAST_BACKGROUND: Rgb565 = Rgb565::new(150 >> 3, 100 >> 2, 40 >> 3);

pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Captions and disabled labels
pub const MUTED_TEXT: Rgb565 = Rgb565::new(20, 40, 20);

/// Colors shared by every component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    pub primary: Rgb565,
    pub secondary: Rgb565,
    pub background: Rgb565,
    pub surface: Rgb565,
    pub text_primary: Rgb565,
    pub text_secondary: Rgb565,
    pub border: Rgb565,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: ACCENT,
            secondary: SECONDARY,
            background: BACKGROUND,
            surface: SURFACE,
            text_primary: WHITE,
            text_secondary: MUTED_TEXT,
            border: BORDER,
        }
    }
}
