//! Screens of the step counter and the manager that switches between them

pub mod constants;
pub mod goal_entry;
pub mod page;
pub mod page_manager;
pub mod progress;

pub use goal_entry::GoalEntryPage;
pub use page::{Page, PageWrapper};
pub use page_manager::PageManager;
pub use progress::ProgressPage;
