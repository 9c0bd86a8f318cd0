//! Hardware-independent core library for the stride pedometer.
//!
//! This crate contains all platform-agnostic logic: the step-delta state
//! machine, goal state, the sensor adapter and its event channel, the
//! key-value persistence adapter, and the UI pages that present progress.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on embedded
//! targets as well as desktop hosts (for the simulator and tests).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[cfg(test)]
use critical_section as _;

pub mod app_state;
pub mod config;
pub mod pages;
pub mod sensors;
pub mod storage;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_log {
    use core::cell::Cell;
    use std::sync::Once;

    use log::{Level, LevelFilter, Log, Metadata, Record};

    std::thread_local! {
        static WARNINGS: Cell<usize> = const { Cell::new(0) };
    }

    /// Counts warnings per test thread
    struct WarningCounter;

    impl Log for WarningCounter {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Warn
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                WARNINGS.with(|count| count.set(count.get() + 1));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: WarningCounter = WarningCounter;
    static INIT: Once = Once::new();

    /// Install the counter and return the warnings logged so far on this thread.
    pub fn warnings() -> usize {
        INIT.call_once(|| {
            if log::set_logger(&LOGGER).is_ok() {
                log::set_max_level(LevelFilter::Warn);
            }
        });
        WARNINGS.with(Cell::get)
    }
}
