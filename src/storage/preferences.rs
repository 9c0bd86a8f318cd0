//! Typed persistence adapter over a [`KeyValueStore`].
//!
//! Reads fall back to a default when nothing was stored, when the backend
//! fails, or when the stored value has the wrong type. Writes are
//! fire-and-forget: failures are logged and otherwise ignored.

use alloc::format;
use alloc::string::String;
use core::mem::discriminant;

use log::{debug, warn};

use super::{KeyValueStore, TextValue, Value};
use crate::app_state::GoalState;

/// Keys of the persisted record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefKey {
    /// Cumulative step count at the last reset (float)
    Baseline,
    /// Whether the user confirmed a goal (bool)
    GoalConfirmed,
    /// The goal as entered (text)
    Goal,
}

impl PrefKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::GoalConfirmed => "goal_confirmed",
            Self::Goal => "goal",
        }
    }
}

pub struct Preferences<S: KeyValueStore> {
    store: S,
    namespace: String,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S, namespace: &str) -> Self {
        Self {
            store,
            namespace: String::from(namespace),
        }
    }

    fn qualified(&self, key: PrefKey) -> String {
        format!("{}.{}", self.namespace, key.as_str())
    }

    /// Load `key`, returning `default` if it is missing or unreadable.
    pub fn load(&self, key: PrefKey, default: Value) -> Value {
        let name = self.qualified(key);
        match self.store.read(&name) {
            Ok(Some(value)) if discriminant(&value) == discriminant(&default) => value,
            Ok(Some(value)) => {
                warn!(
                    "Stored {} has unexpected type {:?}, using default",
                    name, value
                );
                default
            }
            Ok(None) => default,
            Err(e) => {
                warn!("Failed to read {}: {}", name, e);
                default
            }
        }
    }

    /// Store `value` under `key`. Failures are logged, never surfaced.
    pub fn save(&mut self, key: PrefKey, value: Value) {
        let name = self.qualified(key);
        debug!("Saving {} = {:?}", name, value);
        if let Err(e) = self.store.write(&name, value) {
            warn!("Failed to write {}: {}", name, e);
        }
    }

    pub fn load_baseline(&self) -> f32 {
        match self.load(PrefKey::Baseline, Value::Float(0.0)) {
            Value::Float(b) if b.is_finite() && b >= 0.0 => b,
            Value::Float(b) => {
                warn!("Ignoring invalid stored baseline {}", b);
                0.0
            }
            _ => 0.0,
        }
    }

    pub fn save_baseline(&mut self, baseline: f32) {
        self.save(PrefKey::Baseline, Value::Float(baseline));
    }

    pub fn load_goal(&self) -> GoalState {
        let confirmed = matches!(
            self.load(PrefKey::GoalConfirmed, Value::Bool(false)),
            Value::Bool(true)
        );
        let text = match self.load(PrefKey::Goal, Value::Text(TextValue::new())) {
            Value::Text(text) => text,
            _ => TextValue::new(),
        };
        GoalState::restore(text, confirmed)
    }

    pub fn save_goal(&mut self, goal: &GoalState) {
        self.save(PrefKey::GoalConfirmed, Value::Bool(goal.is_confirmed()));
        self.save(PrefKey::Goal, Value::Text(goal.text().clone()));
    }

    /// Save only the confirmation flag, keeping the stored goal text.
    pub fn save_goal_confirmed(&mut self, confirmed: bool) {
        self.save(PrefKey::GoalConfirmed, Value::Bool(confirmed));
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    /// Store whose every operation fails
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<Value>, StorageError> {
            Err(StorageError::Io)
        }

        fn write(&mut self, _key: &str, _value: Value) -> Result<(), StorageError> {
            Err(StorageError::Io)
        }
    }

    #[test]
    fn test_keys_are_namespaced() {
        let mut prefs = Preferences::new(MemoryStore::new(), "stride");
        prefs.save_baseline(12.0);

        assert_eq!(
            prefs.store().read("stride.baseline"),
            Ok(Some(Value::Float(12.0)))
        );
    }

    #[test]
    fn test_load_defaults_on_first_run() {
        let prefs = Preferences::new(MemoryStore::new(), "stride");
        assert_eq!(prefs.load_baseline(), 0.0);

        let goal = prefs.load_goal();
        assert!(!goal.is_confirmed());
        assert!(goal.text().is_empty());
    }

    #[test]
    fn test_baseline_survives_restart() {
        let mut prefs = Preferences::new(MemoryStore::new(), "stride");
        prefs.save_baseline(340.0);

        // A fresh adapter over the same durable record
        let bytes = prefs.into_store().to_bytes().unwrap();
        let restarted = Preferences::new(MemoryStore::from_bytes(&bytes).unwrap(), "stride");

        assert_eq!(restarted.load_baseline(), 340.0);
    }

    #[test]
    fn test_goal_survives_restart() {
        let mut prefs = Preferences::new(MemoryStore::new(), "stride");
        let mut goal = GoalState::default();
        goal.set_goal("5000").unwrap();
        prefs.save_goal(&goal);

        let restarted = Preferences::new(prefs.store().clone(), "stride");
        let loaded = restarted.load_goal();

        assert!(loaded.is_confirmed());
        assert_eq!(loaded.text().as_str(), "5000");
    }

    #[test]
    fn test_type_mismatch_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store
            .write("stride.baseline", Value::Bool(true))
            .unwrap();
        let prefs = Preferences::new(store, "stride");

        assert_eq!(prefs.load_baseline(), 0.0);
    }

    #[test]
    fn test_negative_stored_baseline_is_ignored() {
        let mut store = MemoryStore::new();
        store
            .write("stride.baseline", Value::Float(-5.0))
            .unwrap();
        let prefs = Preferences::new(store, "stride");

        assert_eq!(prefs.load_baseline(), 0.0);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let mut prefs = Preferences::new(BrokenStore, "stride");
        prefs.save_baseline(99.0);

        assert_eq!(prefs.load_baseline(), 0.0);
        assert!(!prefs.load_goal().is_confirmed());
    }
}
