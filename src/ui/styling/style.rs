//! Per-element style and the button variants built from a palette

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder};

use super::colors::{ColorPalette, WHITE};

/// Visual style of one element
///
/// ```ignore
/// let input = Style::new()
///     .with_background(SURFACE)
///     .with_border(BORDER, 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub background_color: Option<Rgb565>,
    pub foreground_color: Option<Rgb565>,
    pub border_color: Option<Rgb565>,
    /// 0 disables the border
    pub border_width: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background_color: None,
            foreground_color: Some(WHITE),
            border_color: None,
            border_width: 0,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_foreground(mut self, color: Rgb565) -> Self {
        self.foreground_color = Some(color);
        self
    }

    pub fn with_border(mut self, color: Rgb565, width: u32) -> Self {
        self.border_color = Some(color);
        self.border_width = width;
        self
    }

    /// Fill and stroke for embedded-graphics primitives
    pub fn to_primitive_style(&self) -> PrimitiveStyle<Rgb565> {
        let mut builder = PrimitiveStyleBuilder::new();

        if let Some(bg) = self.background_color {
            builder = builder.fill_color(bg);
        }

        if let Some(border) = self.border_color
            && self.border_width > 0
        {
            builder = builder.stroke_color(border).stroke_width(self.border_width);
        }

        builder.build()
    }
}

/// Button looks used by the pages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonVariant {
    /// Main action on a page ("Set Goal", "Reset")
    Primary,
    /// Less prominent action ("Change goal")
    Secondary,
    /// Keypad keys
    Key,
}

impl ButtonVariant {
    pub fn to_style(&self, palette: &ColorPalette) -> Style {
        match self {
            ButtonVariant::Primary => Style::new()
                .with_background(palette.primary)
                .with_foreground(WHITE),

            ButtonVariant::Secondary => Style::new()
                .with_background(palette.secondary)
                .with_foreground(WHITE),

            ButtonVariant::Key => Style::new()
                .with_background(palette.surface)
                .with_foreground(palette.text_primary)
                .with_border(palette.border, 1),
        }
    }
}
