// src/ui/components/button.rs
//! Button component with label, action and enabled state

use crate::ui::core::{Action, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};
use crate::ui::styling::{BorderRadius, ButtonVariant, ColorPalette, Style};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Rectangle, RoundedRectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

/// Maximum label length in bytes
pub const BUTTON_LABEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ButtonState {
    Normal,
    Pressed,
    Disabled,
}

/// Button component with label and action
pub struct Button {
    bounds: Rectangle,
    label: heapless::String<BUTTON_LABEL_CAPACITY>,
    action: Action,
    state: ButtonState,
    variant: ButtonVariant,
    palette: ColorPalette,
    border_radius: u32,
    dirty: bool,
}

impl Button {
    pub fn new(bounds: Rectangle, label: &str, action: Action) -> Self {
        let mut label_string = heapless::String::new();
        label_string.push_str(label).ok();

        Self {
            bounds,
            label: label_string,
            action,
            state: ButtonState::Normal,
            variant: ButtonVariant::Primary,
            palette: ColorPalette::default(),
            border_radius: BorderRadius::default().medium,
            dirty: true,
        }
    }

    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self.dirty = true;
        self
    }

    pub fn with_border_radius(mut self, radius: u32) -> Self {
        self.border_radius = radius;
        self.dirty = true;
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        let new_state = if enabled {
            ButtonState::Normal
        } else {
            ButtonState::Disabled
        };

        if self.state != new_state {
            self.state = new_state;
            self.dirty = true;
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.state, ButtonState::Disabled)
    }

    fn get_style(&self) -> Style {
        let base_style = self.variant.to_style(&self.palette);

        match self.state {
            ButtonState::Normal => base_style,
            ButtonState::Pressed => {
                let bg = base_style.background_color.unwrap_or(self.palette.primary);
                let darkened = Rgb565::new(
                    bg.r().saturating_sub(4),
                    bg.g().saturating_sub(8),
                    bg.b().saturating_sub(4),
                );
                base_style.with_background(darkened)
            }
            ButtonState::Disabled => base_style
                .with_background(self.palette.surface)
                .with_foreground(self.palette.text_secondary),
        }
    }

    /// Drop a press that will never see its release, e.g. when the page
    /// is switched away mid-touch.
    pub fn release(&mut self) {
        if self.state == ButtonState::Pressed {
            self.set_state(ButtonState::Normal);
        }
    }

    fn set_state(&mut self, state: ButtonState) {
        if self.state != state {
            self.state = state;
            self.dirty = true;
        }
    }
}

impl Drawable for Button {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let style = self.get_style();

        let corner_radius = Size::new(self.border_radius, self.border_radius);
        RoundedRectangle::with_equal_corners(self.bounds, corner_radius)
            .into_styled(style.to_primitive_style())
            .draw(display)?;

        let text_color = style.foreground_color.unwrap_or(Rgb565::WHITE);
        let character_style = MonoTextStyle::new(&FONT_6X10, text_color);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(&self.label, self.bounds.center(), character_style, text_style)
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

impl Touchable for Button {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        if !self.is_enabled() {
            return TouchResult::NotHandled;
        }

        match event {
            TouchEvent::Press(point) if self.contains_point(point) => {
                self.set_state(ButtonState::Pressed);

                // Fires on press; release only restores the look
                TouchResult::Action(self.action.clone())
            }
            TouchEvent::Drag(point) if self.state == ButtonState::Pressed => {
                if !self.contains_point(point) {
                    self.set_state(ButtonState::Normal);
                }
                TouchResult::Handled
            }
            TouchEvent::Release(_) if self.state == ButtonState::Pressed => {
                self.release();
                TouchResult::Handled
            }
            _ => TouchResult::NotHandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> Button {
        Button::new(
            Rectangle::new(Point::new(10, 10), Size::new(60, 30)),
            "Reset",
            Action::ResetSteps,
        )
    }

    #[test]
    fn test_press_inside_fires_action() {
        let mut button = button();
        button.mark_clean();

        let result = button.handle_touch(TouchEvent::Press(TouchPoint::new(20, 20)));
        assert_eq!(result, TouchResult::Action(Action::ResetSteps));
        assert!(button.is_dirty());

        button.mark_clean();
        let result = button.handle_touch(TouchEvent::Release(TouchPoint::new(20, 20)));
        assert_eq!(result, TouchResult::Handled);
        assert!(button.is_dirty());
    }

    #[test]
    fn test_release_without_touch() {
        let mut button = button();
        button.handle_touch(TouchEvent::Press(TouchPoint::new(20, 20)));
        button.mark_clean();

        button.release();
        assert!(button.is_dirty());
        button.mark_clean();
        button.release();
        assert!(!button.is_dirty());
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut button = button();
        let result = button.handle_touch(TouchEvent::Press(TouchPoint::new(200, 200)));
        assert_eq!(result, TouchResult::NotHandled);
    }

    #[test]
    fn test_disabled_button_ignores_touch() {
        let mut button = button();
        button.set_enabled(false);
        assert!(!button.is_enabled());

        let result = button.handle_touch(TouchEvent::Press(TouchPoint::new(20, 20)));
        assert_eq!(result, TouchResult::NotHandled);

        button.set_enabled(true);
        let result = button.handle_touch(TouchEvent::Press(TouchPoint::new(20, 20)));
        assert_eq!(result, TouchResult::Action(Action::ResetSteps));
    }
}
