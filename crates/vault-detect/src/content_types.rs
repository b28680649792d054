//! Content-type detection over the vault's folder structure

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use vault_fs::{resolve, NormalizedPath, ProjectTopology};

use crate::store::DocumentStore;

/// Tool-owned folders that never become content types.
const DENY_LIST: &[&str] = &["bases", "_bases", "node_modules", ".obsidian"];

/// How documents of a content type are organized on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrganizationMode {
    /// One markdown file per item.
    #[default]
    File,
    /// One folder per item, with an index file inside.
    Folder,
}

/// Where a content type's attachments live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttachmentMode {
    /// Next to the document itself.
    SameFolder,
    /// In a named subfolder of the document's folder.
    #[default]
    Subfolder,
    /// In one explicit folder for the whole content type.
    SpecifiedFolder,
}

/// A user-facing category of document bound to one folder.
///
/// Identifiers are generated once and survive re-detection; detection
/// reconciles by folder name so downstream per-type settings stay attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    pub id: String,
    pub name: String,
    pub folder: String,
    #[serde(default)]
    pub organization: OrganizationMode,
    /// Index file name for folder-based organization.
    #[serde(default = "default_index_file")]
    pub index_file_name: String,
    /// Explicit URL base path, e.g. `/posts/`. Derived from the folder
    /// name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default)]
    pub attachment_mode: AttachmentMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_folder: Option<String>,
    pub enabled: bool,
}

fn default_index_file() -> String {
    "index".to_string()
}

impl ContentType {
    /// A freshly discovered content type for `folder`, enabled by default.
    pub fn discovered(folder: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: display_name(folder),
            folder: folder.to_string(),
            organization: OrganizationMode::File,
            index_file_name: default_index_file(),
            base_path: None,
            attachment_mode: AttachmentMode::Subfolder,
            attachment_folder: None,
            enabled: true,
        }
    }

    /// URL base path, falling back to the folder name.
    pub fn link_base_path(&self) -> String {
        self.base_path
            .clone()
            .unwrap_or_else(|| format!("/{}/", self.folder))
    }
}

/// Canonical display name for recognized folder-name synonyms;
/// everything else is title-cased from the folder name.
fn display_name(folder: &str) -> String {
    match folder.to_lowercase().as_str() {
        "posts" | "post" | "blog" => "Posts".to_string(),
        "pages" | "page" => "Pages".to_string(),
        _ => {
            let mut chars = folder.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        }
    }
}

/// Discovers candidate content types under the project's content directory.
pub struct ContentTypeDetector<'a, S: DocumentStore> {
    store: &'a S,
}

impl<'a, S: DocumentStore> ContentTypeDetector<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Detect content types, reconciling against previously saved records.
    ///
    /// Enumerates top-level folders of the content directory; when that
    /// directory is not reachable through the vault (no detection yet, or
    /// the vault is nested inside one content-type folder) the vault root's
    /// own folders are scanned instead. Previous records are kept as-is,
    /// in order; newly discovered folders are appended. Records whose
    /// folders vanished are never removed here.
    pub fn detect(
        &self,
        topology: Option<&ProjectTopology>,
        previous: &[ContentType],
    ) -> Vec<ContentType> {
        let scan_root = self
            .content_dir(topology)
            .unwrap_or_else(|| self.store.vault_root().clone());

        let folders = match self.store.list_subfolders(&scan_root) {
            Ok(folders) => folders,
            Err(e) => {
                debug!(dir = %scan_root, error = %e, "content scan failed");
                Vec::new()
            }
        };

        let mut result: Vec<ContentType> = previous.to_vec();
        for folder in folders {
            if folder.starts_with('.') || DENY_LIST.contains(&folder.as_str()) {
                continue;
            }
            if result.iter().any(|ct| ct.folder == folder) {
                continue;
            }
            result.push(ContentType::discovered(&folder));
        }
        result
    }

    /// The content directory, if it exists and the vault can reach it.
    fn content_dir(&self, topology: Option<&ProjectTopology>) -> Option<NormalizedPath> {
        let topology = topology?;
        let project_root = resolve::resolve_project_root(topology, self.store.vault_root());
        let content = resolve::content_dir(&project_root);
        if self.store.is_dir(&content) {
            Some(content)
        } else {
            None
        }
    }
}
