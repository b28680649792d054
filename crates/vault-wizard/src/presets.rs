//! Plugin preset catalog

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Preset selection for the optional-plugins step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Minimal look-and-feel plugins only.
    #[default]
    Vanilla,
    /// The full curated plugin set.
    Opinionated,
    /// User-managed enable/disable lists.
    Custom,
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vanilla" | "minimal" => Ok(Preset::Vanilla),
            "opinionated" | "default" => Ok(Preset::Opinionated),
            "custom" => Ok(Preset::Custom),
            _ => Err(Error::InvalidPreset {
                preset: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Vanilla => write!(f, "vanilla"),
            Preset::Opinionated => write!(f, "opinionated"),
            Preset::Custom => write!(f, "custom"),
        }
    }
}

/// Every plugin the wizard knows how to manage.
pub const ALL_PLUGINS: &[&str] = &[
    "astro-composer",
    "bases-cms",
    "insert-unsplash-image",
    "homepage",
    "new-tab-default-page",
    "custom-save",
    "title-only-tab",
    "seo",
    "property-over-file-name",
    "settings-search",
    "statusbar-organizer",
    "zenmode",
    "cmdr",
    "obsidian-paste-image-rename",
    "obsidian42-brat",
    "editing-toolbar",
    "simple-focus",
    "tag-wrangler",
    "obsidian-minimal-settings",
    "obsidian-hider",
    "disable-tabs",
    "obsidian-style-settings",
    "mdx-as-md-obsidian",
];

/// Look-and-feel plugins that make up the vanilla preset.
const MINIMAL_PLUGINS: &[&str] = &[
    "obsidian-minimal-settings",
    "obsidian-hider",
    "disable-tabs",
];

/// Plugin ids to enable and disable for a preset.
///
/// `Custom` returns empty lists; the user's own lists apply unchanged.
pub fn preset_plugins(preset: Preset) -> (Vec<String>, Vec<String>) {
    let minimal: Vec<String> = MINIMAL_PLUGINS.iter().map(|p| p.to_string()).collect();
    let rest: Vec<String> = ALL_PLUGINS
        .iter()
        .filter(|p| !MINIMAL_PLUGINS.contains(p))
        .map(|p| p.to_string())
        .collect();

    match preset {
        Preset::Opinionated => (rest, minimal),
        Preset::Vanilla => (minimal, rest),
        Preset::Custom => (Vec::new(), Vec::new()),
    }
}
