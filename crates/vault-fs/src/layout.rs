//! Vault/project topology classification
//!
//! Where the vault root sits relative to the detected project's content
//! directory decides both the content-type detection fallback and which
//! folder-path convention each downstream tool receives.

use serde::{Deserialize, Serialize};

use crate::NormalizedPath;

/// Position of the vault root relative to the project's content directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VaultLocation {
    /// The vault root is the project's `src/content` directory itself.
    Content,
    /// The vault root is nested inside one specific content-type folder
    /// (e.g. `src/content/posts`). The parent content directory and sibling
    /// content-type folders are outside the vault's own file access.
    NestedContent,
    /// The vault sits at the project root, or is unrelated to it.
    #[default]
    Root,
}

/// Result of project detection, freely editable by the user afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTopology {
    /// Absolute path to the project root.
    pub project_root: NormalizedPath,
    /// Absolute path to the project configuration file that was matched.
    pub config_file: NormalizedPath,
    /// Vault position relative to the project's content directory.
    pub vault_location: VaultLocation,
}

impl ProjectTopology {
    /// Topology for a manually entered project root and config file.
    ///
    /// Manual entry never guesses a content-relative position.
    pub fn manual(project_root: impl Into<NormalizedPath>, config_file: impl Into<NormalizedPath>) -> Self {
        Self {
            project_root: project_root.into(),
            config_file: config_file.into(),
            vault_location: VaultLocation::Root,
        }
    }
}
