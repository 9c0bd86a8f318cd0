// src/pages/page.rs
//! Page abstraction and the enum wrapper the page manager stores.
//!
//! [`PageWrapper`] delegates every [`Page`] method to the concrete page so
//! the manager can hold both pages without `dyn`.

use crate::app_state::AppView;
use crate::ui::core::{Action, PageId, TouchEvent};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use alloc::boxed::Box;

use super::goal_entry::GoalEntryPage;
use super::progress::ProgressPage;

/// Contract between a screen and the [`PageManager`](super::PageManager).
///
/// Call order per switch and frame:
///
/// 1. `on_activate` when the page becomes visible
/// 2. `refresh` every frame with the latest app state
/// 3. `handle_touch` for each touch while visible
/// 4. `draw_page` when `is_dirty()` is true
/// 5. `on_deactivate` when another page takes over
pub trait Page {
    fn id(&self) -> PageId;

    /// Human-readable title, used in logs
    fn title(&self) -> &str;

    fn on_activate(&mut self, _view: &AppView<'_>) {}

    fn on_deactivate(&mut self) {}

    /// Process a touch event. Actions the page cannot resolve itself are
    /// returned for the app to apply.
    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action>;

    /// Pull the latest state. Returns `true` if anything visible changed.
    fn refresh(&mut self, view: &AppView<'_>) -> bool;

    /// Render the whole page.
    fn draw_page<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D)
    -> Result<(), D::Error>;

    fn bounds(&self) -> Rectangle;

    fn is_dirty(&self) -> bool;

    fn mark_clean(&mut self);

    fn mark_dirty(&mut self);
}

/// One of the concrete pages. Boxed to keep the enum small.
pub enum PageWrapper {
    GoalEntry(Box<GoalEntryPage>),
    Progress(Box<ProgressPage>),
}

impl Page for PageWrapper {
    fn id(&self) -> PageId {
        match self {
            PageWrapper::GoalEntry(page) => page.id(),
            PageWrapper::Progress(page) => page.id(),
        }
    }

    fn title(&self) -> &str {
        match self {
            PageWrapper::GoalEntry(page) => page.title(),
            PageWrapper::Progress(page) => page.title(),
        }
    }

    fn on_activate(&mut self, view: &AppView<'_>) {
        match self {
            PageWrapper::GoalEntry(page) => page.on_activate(view),
            PageWrapper::Progress(page) => page.on_activate(view),
        }
    }

    fn on_deactivate(&mut self) {
        match self {
            PageWrapper::GoalEntry(page) => page.on_deactivate(),
            PageWrapper::Progress(page) => page.on_deactivate(),
        }
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        match self {
            PageWrapper::GoalEntry(page) => page.handle_touch(event),
            PageWrapper::Progress(page) => page.handle_touch(event),
        }
    }

    fn refresh(&mut self, view: &AppView<'_>) -> bool {
        match self {
            PageWrapper::GoalEntry(page) => page.refresh(view),
            PageWrapper::Progress(page) => page.refresh(view),
        }
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        match self {
            PageWrapper::GoalEntry(page) => page.draw_page(display),
            PageWrapper::Progress(page) => page.draw_page(display),
        }
    }

    fn bounds(&self) -> Rectangle {
        match self {
            PageWrapper::GoalEntry(page) => Page::bounds(page.as_ref()),
            PageWrapper::Progress(page) => Page::bounds(page.as_ref()),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            PageWrapper::GoalEntry(page) => Page::is_dirty(page.as_ref()),
            PageWrapper::Progress(page) => Page::is_dirty(page.as_ref()),
        }
    }

    fn mark_clean(&mut self) {
        match self {
            PageWrapper::GoalEntry(page) => Page::mark_clean(page.as_mut()),
            PageWrapper::Progress(page) => Page::mark_clean(page.as_mut()),
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            PageWrapper::GoalEntry(page) => Page::mark_dirty(page.as_mut()),
            PageWrapper::Progress(page) => Page::mark_dirty(page.as_mut()),
        }
    }
}
