//! Application-wide state and error types for stride
//!
//! [`StepCounterApp`] owns the step tracker, the goal state and the
//! persistence adapter. It applies sensor events and user actions, writes
//! through to storage, and hands the presentation layer a read-only
//! [`AppView`].

mod goal_state;
mod steps_state;

pub use goal_state::*;
pub use steps_state::*;

use log::{info, warn};
use thiserror_no_std::Error;

use crate::config::Config;
use crate::sensors::{SensorAdapter, SensorEvent, SensorReceiver, StepCounter};
use crate::storage::{KeyValueStore, Preferences};
use crate::ui::{Action, PageId};

/// Shown once when the device has no step counter
pub const NO_SENSOR_NOTICE: &str = "No sensor detected on this device";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    #[error("invalid goal: {0}")]
    Goal(GoalError),
}

impl From<GoalError> for AppError {
    fn from(value: GoalError) -> Self {
        AppError::Goal(value)
    }
}

/// A transient message drawn over the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub message: &'static str,
    remaining_ms: u32,
}

impl Notice {
    pub fn new(message: &'static str, duration_ms: u32) -> Self {
        Self {
            message,
            remaining_ms: duration_ms,
        }
    }

    /// Advance time; returns `true` once the notice has expired.
    fn elapse(&mut self, elapsed_ms: u32) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.remaining_ms == 0
    }
}

/// Read-only snapshot handed to the pages
#[derive(Debug, Clone, Copy)]
pub struct AppView<'a> {
    pub steps: &'a StepState,
    pub goal: &'a GoalState,
    pub notice: Option<&'a Notice>,
}

impl AppView<'_> {
    pub fn screen(&self) -> PageId {
        self.goal.screen()
    }

    pub fn progress_fraction(&self) -> Option<f32> {
        self.goal.progress_fraction(self.steps.displayed)
    }
}

/// Coordinates the tracker, goal state and persistence.
pub struct StepCounterApp<S: KeyValueStore> {
    tracker: StepTracker,
    goal: GoalState,
    prefs: Preferences<S>,
    notice: Option<Notice>,
    notice_duration_ms: u32,
}

impl<S: KeyValueStore> StepCounterApp<S> {
    /// Restore persisted state from `store`.
    pub fn new(store: S, config: &Config<'_>) -> Self {
        let prefs = Preferences::new(store, config.prefs.namespace);

        let baseline = prefs.load_baseline();
        info!("Loaded baseline {}", baseline);
        let goal = prefs.load_goal();
        info!(
            "Loaded goal {:?} (confirmed: {})",
            goal.text().as_str(),
            goal.is_confirmed()
        );

        Self {
            tracker: StepTracker::new(StepState::with_baseline(baseline)),
            goal,
            prefs,
            notice: None,
            notice_duration_ms: config.ui.notice_duration_ms,
        }
    }

    /// The screen became visible: subscribe to the sensor.
    pub fn on_foreground<C: StepCounter>(&mut self, adapter: &mut SensorAdapter<'_, C>) {
        self.tracker.activate();
        if let Err(e) = adapter.activate() {
            info!("Sensor unavailable: {}", e);
        }
    }

    /// The screen was hidden: unsubscribe. Counters stay in memory.
    pub fn on_background<C: StepCounter>(&mut self, adapter: &mut SensorAdapter<'_, C>) {
        adapter.deactivate();
        self.tracker.deactivate();
    }

    /// Apply every queued sensor event. Returns `true` if a redraw is needed.
    pub fn process_events(&mut self, receiver: &SensorReceiver<'_>) -> bool {
        let mut changed = false;
        while let Ok(event) = receiver.try_receive() {
            changed |= self.handle_event(event);
        }
        changed
    }

    /// Apply one sensor event. Returns `true` if a redraw is needed.
    pub fn handle_event(&mut self, event: SensorEvent) -> bool {
        match self.tracker.handle_event(event) {
            TrackerUpdate::Unchanged => false,
            TrackerUpdate::StepsChanged => true,
            TrackerUpdate::Rebased(baseline) => {
                self.prefs.save_baseline(baseline);
                true
            }
            TrackerUpdate::Unsupported => {
                self.notice = Some(Notice::new(NO_SENSOR_NOTICE, self.notice_duration_ms));
                true
            }
        }
    }

    pub fn reset_steps(&mut self) {
        let baseline = self.tracker.reset();
        self.prefs.save_baseline(baseline);
    }

    pub fn set_goal(&mut self, text: &str) -> Result<(), AppError> {
        self.goal.set_goal(text)?;
        info!("Goal set to {:?}", text);
        self.prefs.save_goal(&self.goal);
        Ok(())
    }

    pub fn change_goal(&mut self) {
        self.goal.clear_goal();
        self.prefs.save_goal_confirmed(false);
    }

    /// Apply a user action. Returns `true` if a redraw is needed.
    pub fn handle_action(&mut self, action: &Action) -> Result<bool, AppError> {
        match action {
            Action::ResetSteps => {
                self.reset_steps();
                Ok(true)
            }
            Action::ChangeGoal => {
                self.change_goal();
                Ok(true)
            }
            Action::SetGoal(text) => {
                self.set_goal(text).map_err(|e| {
                    warn!("Rejected goal {:?}: {}", text.as_str(), e);
                    e
                })?;
                Ok(true)
            }
            // Keypad input is handled inside the goal entry page
            Action::Digit(_) | Action::Backspace | Action::SubmitGoal => Ok(false),
        }
    }

    /// Advance the notice timer. Returns `true` when the notice disappears.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let expired = self
            .notice
            .as_mut()
            .is_some_and(|notice| notice.elapse(elapsed_ms));
        if expired {
            self.notice = None;
        }
        expired
    }

    pub fn view(&self) -> AppView<'_> {
        AppView {
            steps: self.tracker.state(),
            goal: &self.goal,
            notice: self.notice.as_ref(),
        }
    }

    pub fn screen(&self) -> PageId {
        self.goal.screen()
    }

    pub fn goal(&self) -> &GoalState {
        &self.goal
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn store(&self) -> &S {
        self.prefs.store()
    }

    pub fn into_store(self) -> S {
        self.prefs.into_store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{SensorChannel, SensorError};
    use crate::storage::MemoryStore;
    use core::cell::Cell;

    /// Step counter driven by the test through a shared cell
    struct CellCounter<'a>(&'a Cell<f32>);

    impl StepCounter for CellCounter<'_> {
        fn read(&mut self) -> Result<f32, SensorError> {
            Ok(self.0.get())
        }
    }

    fn goal_text(s: &str) -> crate::ui::GoalText {
        let mut text = crate::ui::GoalText::new();
        text.push_str(s).unwrap();
        text
    }

    fn new_app(store: MemoryStore) -> StepCounterApp<MemoryStore> {
        StepCounterApp::new(store, &Config::default())
    }

    #[test]
    fn test_goal_gating() {
        let mut app = new_app(MemoryStore::new());
        assert_eq!(app.screen(), PageId::GoalEntry);

        app.handle_action(&Action::SetGoal(goal_text("5000"))).unwrap();
        assert_eq!(app.screen(), PageId::Progress);
        assert_eq!(app.view().goal.text().as_str(), "5000");

        app.handle_action(&Action::ChangeGoal).unwrap();
        assert_eq!(app.screen(), PageId::GoalEntry);
    }

    #[test]
    fn test_empty_goal_is_an_error() {
        let mut app = new_app(MemoryStore::new());
        assert_eq!(
            app.handle_action(&Action::SetGoal(goal_text(""))),
            Err(AppError::Goal(GoalError::Empty))
        );
        assert_eq!(app.screen(), PageId::GoalEntry);
    }

    #[test]
    fn test_sensor_to_display_through_channel() {
        let steps = Cell::new(0.0);
        let channel = SensorChannel::new();
        let receiver = channel.receiver();
        let mut adapter = SensorAdapter::new(Some(CellCounter(&steps)), channel.sender());
        let mut app = new_app(MemoryStore::new());
        app.on_foreground(&mut adapter);

        let mut seen = Vec::new();
        for reading in [0.0, 120.0, 340.0] {
            steps.set(reading);
            adapter.poll().unwrap();
            app.process_events(&receiver);
            seen.push(app.view().steps.displayed);
        }
        assert_eq!(seen, vec![0, 120, 340]);

        app.handle_action(&Action::ResetSteps).unwrap();
        assert_eq!(app.view().steps.baseline, 340.0);
        assert_eq!(app.view().steps.displayed, 0);

        steps.set(400.0);
        adapter.poll().unwrap();
        assert!(app.process_events(&receiver));
        assert_eq!(app.view().steps.displayed, 60);
    }

    #[test]
    fn test_background_stops_updates() {
        let steps = Cell::new(10.0);
        let channel = SensorChannel::new();
        let receiver = channel.receiver();
        let mut adapter = SensorAdapter::new(Some(CellCounter(&steps)), channel.sender());
        let mut app = new_app(MemoryStore::new());

        app.on_foreground(&mut adapter);
        adapter.poll().unwrap();
        app.process_events(&receiver);
        app.on_background(&mut adapter);

        steps.set(90.0);
        adapter.poll().unwrap();
        assert!(!app.process_events(&receiver));
        assert_eq!(app.view().steps.displayed, 10);

        app.on_foreground(&mut adapter);
        adapter.poll().unwrap();
        app.process_events(&receiver);
        assert_eq!(app.view().steps.displayed, 90);
    }

    #[test]
    fn test_state_survives_restart() {
        let mut app = new_app(MemoryStore::new());
        app.set_goal("10000").unwrap();
        app.tracker.activate();
        app.handle_event(SensorEvent::StepCount(1_500.0));
        app.reset_steps();

        let bytes = app.into_store().to_bytes().unwrap();
        let mut restarted = new_app(MemoryStore::from_bytes(&bytes).unwrap());

        assert_eq!(restarted.view().steps.baseline, 1_500.0);
        assert_eq!(restarted.screen(), PageId::Progress);
        assert_eq!(restarted.goal().text().as_str(), "10000");

        restarted.tracker.activate();
        restarted.handle_event(SensorEvent::StepCount(6_500.0));
        assert_eq!(restarted.view().steps.displayed, 5_000);
        assert_eq!(restarted.view().progress_fraction(), Some(0.5));
    }

    #[test]
    fn test_change_goal_persists_and_prefills() {
        let mut app = new_app(MemoryStore::new());
        app.set_goal("7000").unwrap();
        app.change_goal();

        let restarted = new_app(app.store().clone());
        assert_eq!(restarted.screen(), PageId::GoalEntry);
        assert_eq!(restarted.goal().text().as_str(), "7000");
    }

    #[test]
    fn test_rebase_is_persisted() {
        let mut prefs = Preferences::new(MemoryStore::new(), "stride");
        prefs.save_baseline(2_000.0);
        let mut app = new_app(prefs.into_store());
        app.tracker.activate();

        assert!(app.handle_event(SensorEvent::StepCount(12.0)));
        assert_eq!(app.view().steps.displayed, 12);

        let restarted = new_app(app.store().clone());
        assert_eq!(restarted.view().steps.baseline, 0.0);
    }

    #[test]
    fn test_missing_sensor_shows_notice_once() {
        let channel = SensorChannel::new();
        let receiver = channel.receiver();
        let mut adapter: SensorAdapter<'_, CellCounter<'_>> =
            SensorAdapter::new(None, channel.sender());
        let mut app = new_app(MemoryStore::new());

        app.on_foreground(&mut adapter);
        assert!(app.process_events(&receiver));
        assert_eq!(app.notice().map(|n| n.message), Some(NO_SENSOR_NOTICE));

        // Expires after the configured duration
        assert!(!app.tick(1_000));
        assert!(app.tick(1_000));
        assert!(app.notice().is_none());

        // A later resume does not show it again
        app.on_background(&mut adapter);
        app.on_foreground(&mut adapter);
        assert!(!app.process_events(&receiver));
        assert!(app.notice().is_none());
        assert_eq!(app.view().steps.displayed, 0);
    }

    #[test]
    fn test_keypad_actions_do_not_touch_state() {
        let mut app = new_app(MemoryStore::new());
        assert_eq!(app.handle_action(&Action::Digit(4)), Ok(false));
        assert_eq!(app.handle_action(&Action::Backspace), Ok(false));
        assert!(app.store().is_empty());
    }
}
