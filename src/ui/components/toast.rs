// src/ui/components/toast.rs
//! Transient message banner drawn along the top of the current page

use crate::ui::core::Drawable;
use crate::ui::styling::{TOAST_BACKGROUND, WHITE};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

pub const TOAST_MESSAGE_CAPACITY: usize = 48;

pub struct Toast {
    bounds: Rectangle,
    message: Option<heapless::String<TOAST_MESSAGE_CAPACITY>>,
    dirty: bool,
}

impl Toast {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            message: None,
            dirty: false,
        }
    }

    /// Show `message`, or hide the banner with `None`.
    pub fn set_message(&mut self, message: Option<&str>) {
        let next = message.map(|text| {
            let mut s = heapless::String::new();
            for c in text.chars() {
                if s.push(c).is_err() {
                    break;
                }
            }
            s
        });

        if self.message != next {
            self.message = next;
            self.dirty = true;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Drawable for Toast {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let Some(message) = &self.message else {
            return Ok(());
        };

        RoundedRectangle::with_equal_corners(self.bounds, Size::new(6, 6))
            .into_styled(PrimitiveStyle::with_fill(TOAST_BACKGROUND))
            .draw(display)?;

        let character_style = MonoTextStyle::new(&FONT_6X10, WHITE);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(message, self.bounds.center(), character_style, text_style)
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
    fn test_show_and_hide() {
        let mut toast = Toast::new(Rectangle::new(Point::new(20, 200), Size::new(280, 28)));
        assert!(!toast.is_visible());
        assert!(!toast.is_dirty());

        toast.set_message(Some("No sensor detected on this device"));
        assert!(toast.is_visible());
        assert!(toast.is_dirty());
        assert_eq!(toast.message(), Some("No sensor detected on this device"));

        toast.mark_clean();
        toast.set_message(None);
        assert!(!toast.is_visible());
        assert!(toast.is_dirty());
    }
}
