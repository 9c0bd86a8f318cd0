//! Compiled-in configuration for the step counter

use serde::{Deserialize, Serialize};

/// Namespace prefixed to every preferences key.
pub const DEFAULT_NAMESPACE: &str = "stride";

/// How often the owner of the main loop should poll the step sensor.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 250;

/// How long the "no sensor" notice stays on screen.
pub const DEFAULT_NOTICE_DURATION_MS: u32 = 2_000;

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy)]
pub struct Config<'a> {
    #[serde(borrow)]
    pub prefs: PrefsConfig<'a>,
    pub sensor: SensorConfig,
    pub ui: UiConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct PrefsConfig<'a> {
    pub namespace: &'a str,
}

impl Default for PrefsConfig<'_> {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct SensorConfig {
    pub poll_interval_ms: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct UiConfig {
    pub notice_duration_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_duration_ms: DEFAULT_NOTICE_DURATION_MS,
        }
    }
}
