//! User step goal and whether it has been confirmed

use log::warn;
use thiserror_no_std::Error;

use crate::storage::{MAX_TEXT_LEN, TextValue};
use crate::ui::PageId;

/// Maximum number of bytes in a goal
pub const GOAL_TEXT_CAPACITY: usize = MAX_TEXT_LEN;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalError {
    #[error("goal must not be empty")]
    Empty,
    #[error("goal is too long")]
    TooLong,
}

/// Goal text as entered plus its confirmation flag.
///
/// Invariant: `confirmed` implies the text is non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalState {
    text: TextValue,
    confirmed: bool,
}

impl GoalState {
    /// Rebuild from persisted fields, dropping a confirmation without a goal.
    pub fn restore(text: TextValue, confirmed: bool) -> Self {
        if confirmed && text.is_empty() {
            warn!("Stored goal is confirmed but empty, showing goal entry");
        }
        let goal = Self {
            confirmed: confirmed && !text.is_empty(),
            text,
        };
        goal.warn_if_not_numeric();
        goal
    }

    /// Store `text` verbatim and mark the goal confirmed.
    pub fn set_goal(&mut self, text: &str) -> Result<(), GoalError> {
        if text.is_empty() {
            return Err(GoalError::Empty);
        }
        let mut goal = TextValue::new();
        goal.push_str(text).map_err(|_| GoalError::TooLong)?;

        self.text = goal;
        self.confirmed = true;
        self.warn_if_not_numeric();
        Ok(())
    }

    /// Return to goal entry. The text is kept so the form can be prefilled.
    pub fn clear_goal(&mut self) {
        self.confirmed = false;
    }

    pub fn text(&self) -> &TextValue {
        &self.text
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Numeric goal, if the text is a positive integer
    pub fn target(&self) -> Option<u32> {
        self.text.parse::<u32>().ok().filter(|goal| *goal > 0)
    }

    /// Fraction of the goal reached; may exceed 1.0.
    ///
    /// `None` when the goal is not a positive integer.
    pub fn progress_fraction(&self, steps: i64) -> Option<f32> {
        self.target().map(|goal| steps as f32 / goal as f32)
    }

    fn warn_if_not_numeric(&self) {
        if self.confirmed && self.target().is_none() {
            warn!("Goal {:?} is not a positive number", self.text.as_str());
        }
    }

    /// Which page the goal state gates to
    pub fn screen(&self) -> PageId {
        if self.confirmed {
            PageId::Progress
        } else {
            PageId::GoalEntry
        }
    }
}
