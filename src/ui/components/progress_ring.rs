// src/ui/components/progress_ring.rs
//! Circular progress indicator
//!
//! A full circle is drawn as the track, then an arc starting at 12 o'clock
//! and sweeping clockwise by `360° * min(fraction, 1)`.

use crate::ui::core::Drawable;
use crate::ui::styling::{ACCENT, RING_TRACK};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Circle, PrimitiveStyle, Rectangle};

/// 12 o'clock; embedded-graphics measures angles clockwise from 3 o'clock
const START_ANGLE_DEG: f32 = -90.0;

pub struct ProgressRing {
    center: Point,
    diameter: u32,
    thickness: u32,
    fraction: Option<f32>,
    track_color: Rgb565,
    fill_color: Rgb565,
    dirty: bool,
}

impl ProgressRing {
    pub fn new(center: Point, diameter: u32, thickness: u32) -> Self {
        Self {
            center,
            diameter,
            thickness,
            fraction: None,
            track_color: RING_TRACK,
            fill_color: ACCENT,
            dirty: true,
        }
    }

    /// Set progress. `None` draws an empty ring.
    pub fn set_fraction(&mut self, fraction: Option<f32>) {
        if self.fraction != fraction {
            self.fraction = fraction;
            self.dirty = true;
        }
    }

    pub fn fraction(&self) -> Option<f32> {
        self.fraction
    }

    /// Arc length in degrees, saturating at a full circle
    pub fn sweep_degrees(&self) -> f32 {
        match self.fraction {
            Some(fraction) if fraction.is_finite() => fraction.clamp(0.0, 1.0) * 360.0,
            _ => 0.0,
        }
    }
}

impl Drawable for ProgressRing {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        Circle::with_center(self.center, self.diameter)
            .into_styled(PrimitiveStyle::with_stroke(self.track_color, self.thickness))
            .draw(display)?;

        let sweep = self.sweep_degrees();
        if sweep > 0.0 {
            Arc::with_center(
                self.center,
                self.diameter,
                Angle::from_degrees(START_ANGLE_DEG),
                Angle::from_degrees(sweep),
            )
            .into_styled(PrimitiveStyle::with_stroke(self.fill_color, self.thickness))
            .draw(display)?;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        let side = self.diameter + self.thickness;
        Rectangle::with_center(self.center, Size::new(side, side))
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
