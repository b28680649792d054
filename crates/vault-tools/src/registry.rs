//! Host plugin registry port
//!
//! The synthesizers run inside a host editor that keeps live in-memory
//! settings objects for installed plugins. This port abstracts that host:
//! production wires a real registry, tests and headless runs use
//! [`NullRegistry`] and everything degrades to on-disk JSON.

use serde_json::Map;
use serde_json::Value;

use crate::error::Result;

/// Access to the host's installed plugins and their live settings.
pub trait ToolRegistry {
    /// Apply a settings patch to the plugin's live in-memory object and
    /// invoke its own save routine.
    ///
    /// Returns `None` when no live object is available (plugin disabled or
    /// not loaded); the caller then falls back to the on-disk file.
    fn apply_live(&self, tool_id: &str, patch: &Map<String, Value>) -> Option<Result<()>>;

    /// Enable or disable a plugin by id. A no-op for plugins that are not
    /// installed.
    fn set_plugin_enabled(&self, plugin_id: &str, enabled: bool) -> Result<()>;
}

/// Registry with no host behind it. Nothing is live and plugin toggles go
/// nowhere; every adapter degrades to its on-disk settings file.
pub struct NullRegistry;

impl ToolRegistry for NullRegistry {
    fn apply_live(&self, _tool_id: &str, _patch: &Map<String, Value>) -> Option<Result<()>> {
        None
    }

    fn set_plugin_enabled(&self, _plugin_id: &str, _enabled: bool) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{BTreeMap, BTreeSet};

    /// In-memory registry for tests: records live settings per tool and
    /// plugin enable/disable calls.
    #[derive(Default)]
    pub struct MemoryRegistry {
        pub live: RefCell<BTreeMap<String, Map<String, Value>>>,
        pub enabled: RefCell<BTreeSet<String>>,
        pub disabled: RefCell<BTreeSet<String>>,
    }

    impl MemoryRegistry {
        pub fn with_live(tool_id: &str, settings: Map<String, Value>) -> Self {
            let registry = Self::default();
            registry.live.borrow_mut().insert(tool_id.to_string(), settings);
            registry
        }
    }

    impl ToolRegistry for MemoryRegistry {
        fn apply_live(&self, tool_id: &str, patch: &Map<String, Value>) -> Option<Result<()>> {
            let mut live = self.live.borrow_mut();
            let settings = live.get_mut(tool_id)?;
            for (key, value) in patch {
                settings.insert(key.clone(), value.clone());
            }
            Some(Ok(()))
        }

        fn set_plugin_enabled(&self, plugin_id: &str, enabled: bool) -> Result<()> {
            if enabled {
                self.enabled.borrow_mut().insert(plugin_id.to_string());
            } else {
                self.disabled.borrow_mut().insert(plugin_id.to_string());
            }
            Ok(())
        }
    }
}
