//! Step-delta state machine
//!
//! Converts cumulative sensor readings and the stored baseline into the
//! "steps since reset" value shown to the user.

use log::{debug, info, warn};

use crate::sensors::SensorEvent;

/// Step counters owned by the tracker.
///
/// `displayed` is always derived from the other two, except that a reset
/// zeroes it directly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepState {
    /// Cumulative count recorded at the last reset (persisted)
    pub baseline: f32,
    /// Latest cumulative count reported by the sensor (memory only)
    pub cumulative: f32,
    /// Steps since the last reset
    pub displayed: i64,
}

impl StepState {
    /// Start from a baseline restored from storage.
    pub fn with_baseline(baseline: f32) -> Self {
        Self {
            baseline,
            cumulative: 0.0,
            displayed: 0,
        }
    }
}

/// Whole steps in a non-negative reading; truncation equals floor here.
fn whole_steps(value: f32) -> i64 {
    value as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    /// No sensor subscription
    Inactive,
    /// Subscribed and receiving events
    Active,
}

/// What changed as the result of a tracker operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackerUpdate {
    /// Nothing visible changed
    Unchanged,
    /// Displayed steps were recomputed
    StepsChanged,
    /// The sensor counter went backwards; the baseline was moved to the
    /// given value and must be persisted
    Rebased(f32),
    /// The device has no step counter
    Unsupported,
}

pub struct StepTracker {
    state: StepState,
    phase: TrackerPhase,
}

impl StepTracker {
    pub fn new(state: StepState) -> Self {
        Self {
            state,
            phase: TrackerPhase::Inactive,
        }
    }

    /// Read-only access for the presentation layer
    pub fn state(&self) -> &StepState {
        &self.state
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn displayed_steps(&self) -> i64 {
        self.state.displayed
    }

    pub fn activate(&mut self) {
        if self.phase == TrackerPhase::Inactive {
            debug!("Tracker active");
            self.phase = TrackerPhase::Active;
        }
    }

    /// Stop accepting readings. Baseline and cumulative count are kept.
    pub fn deactivate(&mut self) {
        if self.phase == TrackerPhase::Active {
            debug!("Tracker inactive");
            self.phase = TrackerPhase::Inactive;
        }
    }

    pub fn handle_event(&mut self, event: SensorEvent) -> TrackerUpdate {
        match event {
            SensorEvent::Unsupported => TrackerUpdate::Unsupported,
            SensorEvent::StepCount(_) if self.phase == TrackerPhase::Inactive => {
                debug!("Ignoring reading while inactive");
                TrackerUpdate::Unchanged
            }
            SensorEvent::StepCount(count) => self.apply_reading(count),
        }
    }

    fn apply_reading(&mut self, count: f32) -> TrackerUpdate {
        if !count.is_finite() || count < 0.0 {
            warn!("Discarding invalid step reading {}", count);
            return TrackerUpdate::Unchanged;
        }

        self.state.cumulative = count;
        let steps = whole_steps(count) - whole_steps(self.state.baseline);

        if steps < 0 {
            // The counter restarts from zero when the device reboots
            warn!(
                "Step counter dropped below baseline ({} < {}), rebasing to 0",
                count, self.state.baseline
            );
            self.state.baseline = 0.0;
            self.state.displayed = whole_steps(count);
            return TrackerUpdate::Rebased(0.0);
        }

        if steps == self.state.displayed {
            TrackerUpdate::Unchanged
        } else {
            self.state.displayed = steps;
            TrackerUpdate::StepsChanged
        }
    }

    /// Make the current cumulative count the new baseline.
    ///
    /// Returns the baseline to persist.
    pub fn reset(&mut self) -> f32 {
        self.state.baseline = self.state.cumulative;
        self.state.displayed = 0;
        info!("Steps reset, baseline now {}", self.state.baseline);
        self.state.baseline
    }
}
