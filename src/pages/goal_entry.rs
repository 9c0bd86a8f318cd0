//! Goal entry page: title, input box, numeric keypad and "Set Goal"

use embedded_graphics::prelude::*;
use embedded_graphics::{
    Drawable as EgDrawable,
    pixelcolor::Rgb565,
    primitives::{PrimitiveStyle, Rectangle},
    text::Alignment,
};
use heapless::Vec;
use log::debug;

use super::constants::*;
use crate::app_state::AppView;
use crate::pages::page::Page;
use crate::ui::styling::{BACKGROUND, BORDER, SURFACE};
use crate::ui::{
    Action, BorderRadius, Button, ButtonVariant, Drawable, GoalText, PageId, Style,
    TextComponent, TextSize, TouchEvent, TouchResult, Touchable,
};

const TITLE: &str = "Enter your step goal";
const CONFIRM_LABEL: &str = "Set Goal";
const BACKSPACE_LABEL: &str = "Del";

/// Key labels by row; an empty label leaves the slot blank
const KEYPAD_LABELS: [[&str; 3]; 4] = [
    ["1", "2", "3"],
    ["4", "5", "6"],
    ["7", "8", "9"],
    ["", "0", BACKSPACE_LABEL],
];

const KEY_COUNT: usize = 11;

/// Bounds of the keypad slot at `row`, `column`
pub fn key_bounds(row: usize, column: usize) -> Rectangle {
    Rectangle::new(
        Point::new(
            KEYPAD_LEFT_PX + column as i32 * KEY_COLUMN_STRIDE_PX,
            KEYPAD_TOP_PX + row as i32 * KEY_ROW_STRIDE_PX,
        ),
        Size::new(KEY_WIDTH_PX, KEY_HEIGHT_PX),
    )
}

/// Bounds of the "Set Goal" button, spanning the keypad width
pub fn confirm_bounds() -> Rectangle {
    let width = 2 * KEY_COLUMN_STRIDE_PX as u32 + KEY_WIDTH_PX;
    Rectangle::new(
        Point::new(KEYPAD_LEFT_PX, CONFIRM_TOP_PX),
        Size::new(width, CONFIRM_HEIGHT_PX),
    )
}

fn key_action(label: &str) -> Option<Action> {
    if label == BACKSPACE_LABEL {
        return Some(Action::Backspace);
    }
    label.parse::<u8>().ok().map(Action::Digit)
}

pub struct GoalEntryPage {
    bounds: Rectangle,
    title: TextComponent,
    input_box: TextComponent,
    input: GoalText,
    keys: Vec<Button, KEY_COUNT>,
    confirm: Button,
    dirty: bool,
}

impl GoalEntryPage {
    pub fn new(bounds: Rectangle) -> Self {
        let title = TextComponent::new(
            Rectangle::new(
                Point::new(bounds.top_left.x, TITLE_TOP_PX),
                Size::new(bounds.size.width, TITLE_ROW_HEIGHT_PX),
            ),
            TITLE,
            TextSize::Large,
        )
        .with_alignment(Alignment::Center);

        let input_box = TextComponent::new(
            Rectangle::new(
                Point::new(INPUT_LEFT_PX, INPUT_TOP_PX),
                Size::new(INPUT_WIDTH_PX, INPUT_HEIGHT_PX),
            ),
            "",
            TextSize::Large,
        )
        .with_alignment(Alignment::Center)
        .with_style(Style::new().with_background(SURFACE).with_border(BORDER, 1));

        let mut keys = Vec::new();
        for (row, labels) in KEYPAD_LABELS.iter().enumerate() {
            for (column, label) in labels.iter().enumerate() {
                let Some(action) = key_action(label) else {
                    continue;
                };
                let key = Button::new(key_bounds(row, column), label, action)
                    .with_variant(ButtonVariant::Key)
                    .with_border_radius(BorderRadius::default().small);
                keys.push(key).ok();
            }
        }

        let mut confirm = Button::new(confirm_bounds(), CONFIRM_LABEL, Action::SubmitGoal)
            .with_variant(ButtonVariant::Primary);
        confirm.set_enabled(false);

        Self {
            bounds,
            title,
            input_box,
            input: GoalText::new(),
            keys,
            confirm,
            dirty: true,
        }
    }

    /// Replace the typed text, e.g. to prefill the retained goal.
    pub fn set_input(&mut self, text: &str) {
        let mut input = GoalText::new();
        for c in text.chars() {
            if input.push(c).is_err() {
                break;
            }
        }
        self.input = input;
        self.sync_input();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn can_confirm(&self) -> bool {
        self.confirm.is_enabled()
    }

    fn sync_input(&mut self) {
        self.input_box.set_text(&self.input);
        self.confirm.set_enabled(!self.input.is_empty());
    }

    /// Resolve keypad actions locally; everything else goes to the app.
    fn apply(&mut self, action: Action) -> Option<Action> {
        match action {
            Action::Digit(digit) => {
                if self.input.len() >= MAX_GOAL_DIGITS {
                    debug!("Goal input full, ignoring digit {}", digit);
                    return None;
                }
                if let Some(c) = char::from_digit(digit as u32, 10) {
                    self.input.push(c).ok();
                    self.sync_input();
                }
                None
            }
            Action::Backspace => {
                self.input.pop();
                self.sync_input();
                None
            }
            Action::SubmitGoal if self.input.is_empty() => None,
            Action::SubmitGoal => Some(Action::SetGoal(self.input.clone())),
            other => Some(other),
        }
    }

    fn buttons_mut(&mut self) -> impl Iterator<Item = &mut Button> {
        self.keys.iter_mut().chain(core::iter::once(&mut self.confirm))
    }
}

impl Page for GoalEntryPage {
    fn id(&self) -> PageId {
        PageId::GoalEntry
    }

    fn title(&self) -> &str {
        TITLE
    }

    fn on_activate(&mut self, view: &AppView<'_>) {
        self.set_input(view.goal.text());
        self.dirty = true;
    }

    fn on_deactivate(&mut self) {
        for button in self.buttons_mut() {
            button.release();
        }
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        let mut fired = None;
        for button in self.buttons_mut() {
            if let TouchResult::Action(action) = button.handle_touch(event) {
                fired = Some(action);
                break;
            }
        }
        fired.and_then(|action| self.apply(action))
    }

    fn refresh(&mut self, _view: &AppView<'_>) -> bool {
        // The form only changes through touches
        false
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(BACKGROUND))
            .draw(display)?;

        self.title.draw(display)?;
        self.input_box.draw(display)?;
        for key in &self.keys {
            key.draw(display)?;
        }
        self.confirm.draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self.title.is_dirty()
            || self.input_box.is_dirty()
            || self.confirm.is_dirty()
            || self.keys.iter().any(|k| k.is_dirty())
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.title.mark_clean();
        self.input_box.mark_clean();
        for button in self.buttons_mut() {
            button.mark_clean();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::{GoalState, StepState};
    use crate::pages::test_display::CountingDisplay;
    use crate::ui::{TouchPoint, screen_bounds};

    fn tap(page: &mut GoalEntryPage, bounds: Rectangle) -> Option<Action> {
        let center = bounds.center();
        let point = TouchPoint::new(center.x as u16, center.y as u16);
        let action = page.handle_touch(TouchEvent::Press(point));
        page.handle_touch(TouchEvent::Release(point));
        action
    }

    fn type_digits(page: &mut GoalEntryPage, digits: &str) {
        for d in digits.chars() {
            let (row, column) = match d {
                '0' => (3, 1),
                d => {
                    let n = d.to_digit(10).unwrap() as usize - 1;
                    (n / 3, n % 3)
                }
            };
            assert_eq!(tap(page, key_bounds(row, column)), None);
        }
    }

    #[test]
    fn test_confirm_disabled_while_empty() {
        let mut page = GoalEntryPage::new(screen_bounds());
        assert!(!page.can_confirm());
        assert_eq!(tap(&mut page, confirm_bounds()), None);

        type_digits(&mut page, "5");
        assert!(page.can_confirm());

        tap(&mut page, key_bounds(3, 2));
        assert_eq!(page.input(), "");
        assert!(!page.can_confirm());
    }

    #[test]
    fn test_keypad_builds_goal() {
        let mut page = GoalEntryPage::new(screen_bounds());
        type_digits(&mut page, "5000");
        assert_eq!(page.input(), "5000");

        let mut expected = GoalText::new();
        expected.push_str("5000").unwrap();
        assert_eq!(
            tap(&mut page, confirm_bounds()),
            Some(Action::SetGoal(expected))
        );
    }

    #[test]
    fn test_input_is_capped() {
        let mut page = GoalEntryPage::new(screen_bounds());
        type_digits(&mut page, "1234567890");
        assert_eq!(page.input(), "1234567");
    }

    #[test]
    fn test_blank_slot_does_nothing() {
        let mut page = GoalEntryPage::new(screen_bounds());
        assert_eq!(tap(&mut page, key_bounds(3, 0)), None);
        assert_eq!(page.input(), "");
    }

    #[test]
    fn test_prefilled_on_activate() {
        let mut page = GoalEntryPage::new(screen_bounds());
        let mut goal = GoalState::default();
        goal.set_goal("8000").unwrap();
        goal.clear_goal();
        let steps = StepState::default();
        let view = AppView {
            steps: &steps,
            goal: &goal,
            notice: None,
        };

        page.on_activate(&view);
        assert_eq!(page.input(), "8000");
        assert!(page.can_confirm());
    }

    #[test]
    fn test_draw_clears_dirty() {
        let mut page = GoalEntryPage::new(screen_bounds());
        let mut display = CountingDisplay::default();
        assert!(page.is_dirty());

        page.draw_page(&mut display).unwrap();
        page.mark_clean();
        assert!(display.pixels > 0);
        assert!(!page.is_dirty());

        type_digits(&mut page, "3");
        assert!(page.is_dirty());
    }
}
