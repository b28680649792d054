//! Persisted wizard settings
//!
//! The wizard's own saved snapshot: seeds a fresh session, resumes a
//! half-finished one, and records completion. Written opportunistically on
//! every validated forward transition and finally at finish.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use vault_detect::{ContentType, FrontmatterMapping};
use vault_fs::{io, NormalizedPath, ProjectTopology};

use crate::config::{
    CmsConfig, CommanderConfig, ComposerConfig, DraftConfig, ImageInserterConfig,
    PropertyPromotionConfig, SeoConfig,
};
use crate::error::Result;
use crate::presets::Preset;

/// Durable mirror of the draft configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology: Option<ProjectTopology>,
    #[serde(default)]
    pub content_types: Vec<ContentType>,
    #[serde(default)]
    pub frontmatter: BTreeMap<String, FrontmatterMapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_content_type: Option<String>,
    #[serde(default)]
    pub preset: Preset,
    #[serde(default)]
    pub enable_wysiwyg: bool,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub enabled_plugins: Vec<String>,
    #[serde(default)]
    pub disabled_plugins: Vec<String>,
    #[serde(default)]
    pub cms: CmsConfig,
    #[serde(default)]
    pub composer: ComposerConfig,
    #[serde(default)]
    pub seo: SeoConfig,
    #[serde(default)]
    pub commander: CommanderConfig,
    #[serde(default)]
    pub property_promotion: PropertyPromotionConfig,
    #[serde(default)]
    pub image_inserter: ImageInserterConfig,
    #[serde(default = "default_true")]
    pub run_wizard_on_startup: bool,
    #[serde(default)]
    pub wizard_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl WizardSettings {
    /// Snapshot the durable fields of a draft.
    pub fn from_draft(draft: &DraftConfig) -> Self {
        Self {
            topology: draft.topology.clone(),
            content_types: draft.content_types.clone(),
            frontmatter: draft.frontmatter.clone(),
            default_content_type: draft.default_content_type.clone(),
            preset: draft.preset,
            enable_wysiwyg: draft.enable_wysiwyg,
            theme: draft.theme.clone(),
            enabled_plugins: draft.enabled_plugins.clone(),
            disabled_plugins: draft.disabled_plugins.clone(),
            cms: draft.cms.clone(),
            composer: draft.composer.clone(),
            seo: draft.seo.clone(),
            commander: draft.commander.clone(),
            property_promotion: draft.property_promotion.clone(),
            image_inserter: draft.image_inserter.clone(),
            run_wizard_on_startup: true,
            wizard_completed: false,
            applied_at: None,
        }
    }
}

/// Persistence port for the wizard's own settings snapshot.
pub trait SettingsStore {
    fn load(&self) -> Result<Option<WizardSettings>>;
    fn save(&self, settings: &WizardSettings) -> Result<()>;
}

/// JSON-file settings store (the plugin's own `data.json`).
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: NormalizedPath,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<NormalizedPath>) -> Self {
        Self { path: path.into() }
    }

    /// The conventional settings path under a vault root.
    pub fn in_vault(vault_root: &NormalizedPath) -> Self {
        Self::new(vault_root.join(".obsidian/plugins/vault-site-wizard/data.json"))
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Result<Option<WizardSettings>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let content = io::read_text(&self.path)?;
        let settings = serde_json::from_str(&content)?;
        Ok(Some(settings))
    }

    fn save(&self, settings: &WizardSettings) -> Result<()> {
        let content = serde_json::to_string_pretty(settings)?;
        io::write_text(&self.path, &content)?;
        debug!(path = %self.path, "wizard settings saved");
        Ok(())
    }
}
