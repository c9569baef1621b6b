//! In-memory preference store.

use std::collections::HashMap;
use std::sync::Mutex;

use super::PreferenceStore;
use crate::error::{BiometricsError, BiometricsResult};

#[derive(Debug, Clone)]
enum Value {
    Text(String),
    Flag(bool),
}

/// [`PreferenceStore`] that keeps values for the lifetime of the instance.
///
/// Sharing one instance between two facades simulates a process restart:
/// persisted values survive while session state does not.
#[derive(Debug, Default, uniffi::Object)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, Value>>,
}

#[uniffi::export]
impl MemoryPreferenceStore {
    /// Creates an empty store.
    #[uniffi::constructor]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryPreferenceStore {
    fn with_values<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, Value>) -> T,
    ) -> BiometricsResult<T> {
        let mut guard = self
            .values
            .lock()
            .map_err(|_| BiometricsError::Preferences("mutex poisoned".to_string()))?;
        Ok(f(&mut guard))
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_string(&self, key: String) -> BiometricsResult<Option<String>> {
        self.with_values(|values| match values.get(&key) {
            Some(Value::Text(text)) => Some(text.clone()),
            _ => None,
        })
    }

    fn set_string(&self, key: String, value: String) -> BiometricsResult<()> {
        self.with_values(|values| {
            values.insert(key, Value::Text(value));
        })
    }

    fn get_bool(&self, key: String) -> BiometricsResult<bool> {
        self.with_values(|values| matches!(values.get(&key), Some(Value::Flag(true))))
    }

    fn set_bool(&self, key: String, value: bool) -> BiometricsResult<()> {
        self.with_values(|values| {
            values.insert(key, Value::Flag(value));
        })
    }
}
