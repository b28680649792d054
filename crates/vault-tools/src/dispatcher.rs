//! Ordered tool dispatch
//!
//! Applies the finished draft to every downstream tool, one after another.
//! Each tool is attempted regardless of earlier failures; the caller gets
//! one outcome per tool and decides how to present partial success.

use tracing::{info, warn};

use vault_fs::NormalizedPath;
use vault_wizard::{preset_plugins, DraftConfig, FinishHandler, Preset, ToolOutcome};

use crate::adapter::{SynthContext, ToolAdapter};
use crate::banner::BannerAdapter;
use crate::bases_cms::BasesCmsAdapter;
use crate::commander::CommanderAdapter;
use crate::composer::ComposerAdapter;
use crate::image_inserter::ImageInserterAdapter;
use crate::property_promote::PropertyPromoteAdapter;
use crate::registry::ToolRegistry;
use crate::seo::SeoAdapter;

/// Name under which plugin enable/disable is reported.
pub const PLUGIN_STATES: &str = "plugin-states";

/// The built-in adapters, in application order. Property promotion runs
/// last so the key it promotes is the one the other tools settled on.
pub fn builtin_adapters() -> Vec<Box<dyn ToolAdapter>> {
    vec![
        Box::new(BasesCmsAdapter),
        Box::new(ComposerAdapter),
        Box::new(SeoAdapter),
        Box::new(CommanderAdapter),
        Box::new(ImageInserterAdapter),
        Box::new(BannerAdapter),
        Box::new(PropertyPromoteAdapter),
    ]
}

/// Drives every adapter against one vault.
pub struct ToolDispatcher<'r> {
    vault_root: NormalizedPath,
    registry: &'r dyn ToolRegistry,
    adapters: Vec<Box<dyn ToolAdapter>>,
}

impl<'r> ToolDispatcher<'r> {
    pub fn new(vault_root: NormalizedPath, registry: &'r dyn ToolRegistry) -> Self {
        Self {
            vault_root,
            registry,
            adapters: builtin_adapters(),
        }
    }

    pub fn with_adapters(
        vault_root: NormalizedPath,
        registry: &'r dyn ToolRegistry,
        adapters: Vec<Box<dyn ToolAdapter>>,
    ) -> Self {
        Self {
            vault_root,
            registry,
            adapters,
        }
    }

    /// Apply plugin states and every adapter. Never short-circuits.
    pub fn apply_all(&self, draft: &DraftConfig) -> Vec<ToolOutcome> {
        let mut outcomes = vec![self.apply_plugin_states(draft)];
        let ctx = SynthContext::new(draft, self.vault_root.clone());

        for adapter in &self.adapters {
            let outcome = match adapter.apply(&ctx, self.registry) {
                Ok(()) => {
                    info!(tool = adapter.id(), "configuration applied");
                    ToolOutcome::ok(adapter.id())
                }
                Err(e) => {
                    warn!(tool = adapter.id(), error = %e, "configuration failed");
                    ToolOutcome::failed(adapter.id(), e.to_string())
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Enable and disable plugins per the chosen preset, or per the
    /// draft's own lists when the preset is custom.
    fn apply_plugin_states(&self, draft: &DraftConfig) -> ToolOutcome {
        let (enabled, disabled) = match draft.preset {
            Preset::Custom => (draft.enabled_plugins.clone(), draft.disabled_plugins.clone()),
            preset => preset_plugins(preset),
        };

        let mut first_error = None;
        for plugin in &enabled {
            if let Err(e) = self.registry.set_plugin_enabled(plugin, true) {
                warn!(plugin, error = %e, "enable failed");
                first_error.get_or_insert_with(|| e.to_string());
            }
        }
        for plugin in &disabled {
            if let Err(e) = self.registry.set_plugin_enabled(plugin, false) {
                warn!(plugin, error = %e, "disable failed");
                first_error.get_or_insert_with(|| e.to_string());
            }
        }

        match first_error {
            Some(message) => ToolOutcome::failed(PLUGIN_STATES, message),
            None => ToolOutcome::ok(PLUGIN_STATES),
        }
    }
}

impl FinishHandler for ToolDispatcher<'_> {
    fn apply(&self, draft: &DraftConfig) -> Vec<ToolOutcome> {
        self.apply_all(draft)
    }
}
