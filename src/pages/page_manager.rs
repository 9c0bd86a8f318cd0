// src/pages/page_manager.rs
//! Page manager: picks the page for the current goal state, forwards touches
//! and draws the notice toast over whichever page is visible.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;
use log::{debug, info};

use alloc::boxed::Box;

use super::constants::{TOAST_HEIGHT_PX, TOAST_MARGIN_PX, TOAST_TOP_PX};
use super::goal_entry::GoalEntryPage;
use super::page::{Page, PageWrapper};
use super::progress::ProgressPage;
use crate::app_state::AppView;
use crate::ui::core::{Action, PageId, TouchEvent};
use crate::ui::{Drawable, Toast};

const PAGE_COUNT: usize = 2;

pub struct PageManager {
    pages: Vec<PageWrapper, PAGE_COUNT>,
    current_page: PageId,
    toast: Toast,
}

impl PageManager {
    /// Build both pages and activate the one `view` selects.
    pub fn new(display_bounds: Rectangle, view: &AppView<'_>) -> Self {
        let toast_bounds = Rectangle::new(
            Point::new(display_bounds.top_left.x + TOAST_MARGIN_PX, TOAST_TOP_PX),
            Size::new(
                display_bounds.size.width - 2 * TOAST_MARGIN_PX as u32,
                TOAST_HEIGHT_PX,
            ),
        );

        let mut manager = Self {
            pages: Vec::new(),
            current_page: view.screen(),
            toast: Toast::new(toast_bounds),
        };
        manager.register_page(PageWrapper::GoalEntry(Box::new(GoalEntryPage::new(
            display_bounds,
        ))));
        manager.register_page(PageWrapper::Progress(Box::new(ProgressPage::new(
            display_bounds,
        ))));

        if let Some(page) = manager.get_current_page_mut() {
            page.on_activate(view);
        }
        manager.toast.set_message(view.notice.map(|n| n.message));
        manager
    }

    fn register_page(&mut self, page: PageWrapper) {
        self.pages.push(page).ok();
    }

    fn navigate_to(&mut self, page_id: PageId, view: &AppView<'_>) {
        if let Some(current) = self.get_current_page_mut() {
            current.on_deactivate();
        }

        self.current_page = page_id;

        if let Some(page) = self.get_current_page_mut() {
            info!("Showing {} page", page.title());
            page.on_activate(view);
        }
    }

    fn get_current_page_mut(&mut self) -> Option<&mut PageWrapper> {
        self.pages.iter_mut().find(|p| p.id() == self.current_page)
    }

    fn get_current_page(&self) -> Option<&PageWrapper> {
        self.pages.iter().find(|p| p.id() == self.current_page)
    }

    /// Bring pages and toast in line with the app. Returns `true` if a redraw
    /// is needed.
    pub fn sync(&mut self, view: &AppView<'_>) -> bool {
        let target = view.screen();
        if target != self.current_page {
            self.navigate_to(target, view);
        }

        let was_visible = self.toast.is_visible();
        self.toast.set_message(view.notice.map(|n| n.message));
        let hidden = was_visible && !self.toast.is_visible();

        if let Some(page) = self.get_current_page_mut() {
            page.refresh(view);
            if hidden {
                // Repaint what the toast covered
                page.mark_dirty();
            }
        }

        self.is_dirty()
    }

    /// Forward a touch to the visible page, returning any action for the app.
    pub fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        debug!("Processing touch event: {:?}", event);
        let action = self.get_current_page_mut()?.handle_touch(event);
        if action.is_some() {
            debug!("Touch result: {:?}", action);
        }
        action
    }

    /// Draw whatever changed. Returns `true` if anything was drawn.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        let toast_dirty = self.toast.is_dirty();
        let Some(page) = self.pages.iter_mut().find(|p| p.id() == self.current_page) else {
            return Ok(false);
        };

        if page.is_dirty() {
            // Full redraw, then the toast on top
            page.draw_page(display)?;
            page.mark_clean();
            self.toast.draw(display)?;
            self.toast.mark_clean();
            Ok(true)
        } else if toast_dirty {
            self.toast.draw(display)?;
            self.toast.mark_clean();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.toast.is_dirty() || self.get_current_page().is_some_and(|p| p.is_dirty())
    }

    pub fn current_page_id(&self) -> PageId {
        self.current_page
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::{NO_SENSOR_NOTICE, StepCounterApp};
    use crate::config::Config;
    use crate::pages::goal_entry::{confirm_bounds, key_bounds};
    use crate::pages::progress::reset_bounds;
    use crate::pages::test_display::CountingDisplay;
    use crate::sensors::{SensorAdapter, SensorChannel, SensorError, SensorEvent, StepCounter};
    use crate::storage::MemoryStore;
    use crate::ui::{TouchPoint, screen_bounds};

    struct FixedCounter(f32);

    impl StepCounter for FixedCounter {
        fn read(&mut self) -> Result<f32, SensorError> {
            Ok(self.0)
        }
    }

    fn tap(manager: &mut PageManager, bounds: Rectangle) -> Option<Action> {
        let c = bounds.center();
        let point = TouchPoint::new(c.x as u16, c.y as u16);
        let action = manager.handle_touch(TouchEvent::Press(point));
        manager.handle_touch(TouchEvent::Release(point));
        action
    }

    #[test]
    fn test_goal_flow_switches_pages() {
        let mut app = StepCounterApp::new(MemoryStore::new(), &Config::default());
        let mut manager = PageManager::new(screen_bounds(), &app.view());
        assert_eq!(manager.current_page_id(), PageId::GoalEntry);

        // 5, 0, 0, 0
        tap(&mut manager, key_bounds(1, 1));
        for _ in 0..3 {
            tap(&mut manager, key_bounds(3, 1));
        }
        let action = tap(&mut manager, confirm_bounds()).unwrap();
        assert!(app.handle_action(&action).unwrap());

        assert!(manager.sync(&app.view()));
        assert_eq!(manager.current_page_id(), PageId::Progress);
        assert_eq!(app.goal().text().as_str(), "5000");

        app.handle_action(&Action::ChangeGoal).unwrap();
        manager.sync(&app.view());
        assert_eq!(manager.current_page_id(), PageId::GoalEntry);
    }

    #[test]
    fn test_reset_from_progress_page() {
        let mut app = StepCounterApp::new(MemoryStore::new(), &Config::default());
        app.set_goal("1000").unwrap();
        let channel = SensorChannel::new();
        let receiver = channel.receiver();
        let mut adapter = SensorAdapter::new(Some(FixedCounter(250.0)), channel.sender());
        app.on_foreground(&mut adapter);
        adapter.poll().unwrap();
        app.process_events(&receiver);
        assert_eq!(app.view().steps.displayed, 250);

        let mut manager = PageManager::new(screen_bounds(), &app.view());
        let action = tap(&mut manager, reset_bounds()).unwrap();
        assert_eq!(action, Action::ResetSteps);
        manager.sync(&app.view());
        assert_eq!(manager.current_page_id(), PageId::Progress);

        app.handle_action(&action).unwrap();
        assert_eq!(app.view().steps.displayed, 0);
        assert_eq!(app.view().steps.baseline, 250.0);
    }

    #[test]
    fn test_toast_shows_and_hides() {
        let mut app = StepCounterApp::new(MemoryStore::new(), &Config::default());
        let mut manager = PageManager::new(screen_bounds(), &app.view());
        let mut display = CountingDisplay::default();
        assert!(manager.draw(&mut display).unwrap());
        assert!(!manager.draw(&mut display).unwrap());

        app.handle_event(SensorEvent::Unsupported);
        assert!(manager.sync(&app.view()));
        assert_eq!(manager.toast().message(), Some(NO_SENSOR_NOTICE));
        assert!(manager.draw(&mut display).unwrap());

        // Expiry repaints the page under the toast
        app.tick(Config::default().ui.notice_duration_ms);
        assert!(manager.sync(&app.view()));
        assert!(!manager.toast().is_visible());
        let before = display.pixels;
        assert!(manager.draw(&mut display).unwrap());
        assert!(display.pixels - before >= 320 * 240);
    }

    #[test]
    fn test_unusable_goal_warns_once_across_frames() {
        let mut app = StepCounterApp::new(MemoryStore::new(), &Config::default());
        let before = crate::test_log::warnings();
        app.set_goal("0").unwrap();

        let mut manager = PageManager::new(screen_bounds(), &app.view());
        for _ in 0..30 {
            manager.sync(&app.view());
        }
        assert_eq!(manager.current_page_id(), PageId::Progress);
        assert_eq!(crate::test_log::warnings() - before, 1);
    }
}
