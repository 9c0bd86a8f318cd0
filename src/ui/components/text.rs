// src/ui/components/text.rs
//! Single-line text component

use crate::ui::core::Drawable;
use crate::ui::styling::Style;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text as EgText, TextStyleBuilder};

/// Maximum text length in bytes
pub const TEXT_CAPACITY: usize = 64;

/// Text size presets
///
/// - `Small`: 5x8 font
/// - `Medium`: 6x10 font
/// - `Large`: 10x20 font
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &embedded_graphics::mono_font::ascii::FONT_5X8,
            TextSize::Medium => &FONT_6X10,
            TextSize::Large => &embedded_graphics::mono_font::ascii::FONT_10X20,
        }
    }
}

/// Text vertically centered in its bounds, with an optional styled box
/// behind it.
///
/// ```ignore
/// let label = TextComponent::new(
///     Rectangle::new(Point::new(0, 180), Size::new(320, 20)),
///     "1200/5000",
///     TextSize::Large,
/// )
/// .with_alignment(Alignment::Center);
/// ```
pub struct TextComponent {
    bounds: Rectangle,
    text: heapless::String<TEXT_CAPACITY>,
    size: TextSize,
    alignment: Alignment,
    style: Style,
    dirty: bool,
}

impl TextComponent {
    pub fn new(bounds: Rectangle, text: &str, size: TextSize) -> Self {
        let mut text_string = heapless::String::new();
        text_string.push_str(text).ok();

        Self {
            bounds,
            text: text_string,
            size,
            alignment: Alignment::Left,
            style: Style::default(),
            dirty: true,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Update the displayed text, marking the component dirty if it changed.
    ///
    /// Text longer than the capacity is cut at a character boundary.
    pub fn set_text(&mut self, text: &str) {
        let mut new_text = heapless::String::new();
        for c in text.chars() {
            if new_text.push(c).is_err() {
                break;
            }
        }

        if self.text != new_text {
            self.text = new_text;
            self.dirty = true;
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn text_position(&self) -> Point {
        let y = self.bounds.center().y;
        match self.alignment {
            Alignment::Left => Point::new(self.bounds.top_left.x, y),
            Alignment::Center => Point::new(self.bounds.center().x, y),
            Alignment::Right => {
                Point::new(self.bounds.top_left.x + self.bounds.size.width as i32, y)
            }
        }
    }
}

impl Drawable for TextComponent {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.style.background_color.is_some() || self.style.border_width > 0 {
            self.bounds
                .into_styled(self.style.to_primitive_style())
                .draw(display)?;
        }

        let text_color = self.style.foreground_color.unwrap_or(Rgb565::WHITE);
        let character_style = MonoTextStyle::new(self.size.font(), text_color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Middle)
            .build();

        EgText::with_text_style(&self.text, self.text_position(), character_style, text_style)
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_marks_dirty_only_on_change() {
        let mut text = TextComponent::new(Rectangle::zero(), "0/5000", TextSize::Medium);
        text.mark_clean();

        text.set_text("0/5000");
        assert!(!text.is_dirty());

        text.set_text("12/5000");
        assert!(text.is_dirty());
        assert_eq!(text.text(), "12/5000");
    }

    #[test]
    fn test_overlong_text_is_cut() {
        let mut text = TextComponent::new(Rectangle::zero(), "", TextSize::Small);
        let long = "9".repeat(TEXT_CAPACITY + 10);
        text.set_text(&long);
        assert_eq!(text.text().len(), TEXT_CAPACITY);
    }
}
