//! Progress page: ring, "steps/goal" label and the two action buttons

use core::fmt::Write;

use embedded_graphics::prelude::*;
use embedded_graphics::{
    Drawable as EgDrawable,
    pixelcolor::Rgb565,
    primitives::{PrimitiveStyle, Rectangle},
    text::Alignment,
};

use super::constants::*;
use crate::app_state::AppView;
use crate::pages::page::Page;
use crate::ui::components::text::TEXT_CAPACITY;
use crate::ui::styling::{BACKGROUND, MUTED_TEXT};
use crate::ui::{
    Action, Button, ButtonVariant, Drawable, PageId, ProgressRing, Style, TextComponent,
    TextSize, TouchEvent, TouchResult, Touchable,
};

const TITLE: &str = "Progress";

pub fn reset_bounds() -> Rectangle {
    Rectangle::new(
        Point::new(ACTION_BUTTON_MARGIN_PX, ACTION_BUTTON_TOP_PX),
        Size::new(ACTION_BUTTON_WIDTH_PX, ACTION_BUTTON_HEIGHT_PX),
    )
}

pub fn change_goal_bounds(page_width: u32) -> Rectangle {
    let left = page_width as i32 - ACTION_BUTTON_MARGIN_PX - ACTION_BUTTON_WIDTH_PX as i32;
    Rectangle::new(
        Point::new(left, ACTION_BUTTON_TOP_PX),
        Size::new(ACTION_BUTTON_WIDTH_PX, ACTION_BUTTON_HEIGHT_PX),
    )
}

/// "steps/goal", with the goal shown verbatim
fn progress_label(steps: i64, goal: &str) -> heapless::String<TEXT_CAPACITY> {
    let mut label = heapless::String::new();
    write!(label, "{}/{}", steps, goal).ok();
    label
}

pub struct ProgressPage {
    bounds: Rectangle,
    ring: ProgressRing,
    label: TextComponent,
    caption: TextComponent,
    reset: Button,
    change_goal: Button,
    dirty: bool,
}

impl ProgressPage {
    pub fn new(bounds: Rectangle) -> Self {
        let center = Point::new(bounds.center().x, RING_CENTER_Y_PX);
        let ring = ProgressRing::new(center, RING_DIAMETER_PX, RING_THICKNESS_PX);

        let label = TextComponent::new(
            Rectangle::with_center(center, Size::new(RING_DIAMETER_PX, 20)),
            "",
            TextSize::Large,
        )
        .with_alignment(Alignment::Center);

        let caption = TextComponent::new(
            Rectangle::with_center(center + Point::new(0, 22), Size::new(RING_DIAMETER_PX, 12)),
            "steps",
            TextSize::Small,
        )
        .with_alignment(Alignment::Center)
        .with_style(Style::new().with_foreground(MUTED_TEXT));

        let reset = Button::new(reset_bounds(), "Reset", Action::ResetSteps)
            .with_variant(ButtonVariant::Primary);
        let change_goal = Button::new(
            change_goal_bounds(bounds.size.width),
            "Change goal",
            Action::ChangeGoal,
        )
        .with_variant(ButtonVariant::Secondary);

        Self {
            bounds,
            ring,
            label,
            caption,
            reset,
            change_goal,
            dirty: true,
        }
    }

    pub fn label(&self) -> &str {
        self.label.text()
    }

    pub fn ring(&self) -> &ProgressRing {
        &self.ring
    }
}

impl Page for ProgressPage {
    fn id(&self) -> PageId {
        PageId::Progress
    }

    fn title(&self) -> &str {
        TITLE
    }

    fn on_activate(&mut self, view: &AppView<'_>) {
        self.refresh(view);
        self.dirty = true;
    }

    fn on_deactivate(&mut self) {
        self.reset.release();
        self.change_goal.release();
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        for button in [&mut self.reset, &mut self.change_goal] {
            if let TouchResult::Action(action) = button.handle_touch(event) {
                return Some(action);
            }
        }
        None
    }

    fn refresh(&mut self, view: &AppView<'_>) -> bool {
        self.label
            .set_text(&progress_label(view.steps.displayed, view.goal.text()));
        self.ring.set_fraction(view.progress_fraction());
        self.label.is_dirty() || self.ring.is_dirty()
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(BACKGROUND))
            .draw(display)?;

        self.ring.draw(display)?;
        self.label.draw(display)?;
        self.caption.draw(display)?;
        self.reset.draw(display)?;
        self.change_goal.draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self.ring.is_dirty()
            || self.label.is_dirty()
            || self.reset.is_dirty()
            || self.change_goal.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.ring.mark_clean();
        self.label.mark_clean();
        self.caption.mark_clean();
        self.reset.mark_clean();
        self.change_goal.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
