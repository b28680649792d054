//! Tool adapter contract and the shared merge-write path
//!
//! Each downstream tool gets one adapter: a pure synthesizer that projects
//! the draft into the JSON fields this system owns, plus a merge that folds
//! those fields into whatever settings the tool already has. Foreign keys
//! are never touched, so hand-tuned tool settings survive re-runs.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use vault_fs::{io, NormalizedPath};
use vault_wizard::DraftConfig;

use crate::error::{Error, Result};
use crate::registry::ToolRegistry;

/// Read-only context every synthesizer receives.
pub struct SynthContext<'a> {
    pub draft: &'a DraftConfig,
    pub vault_root: NormalizedPath,
}

impl<'a> SynthContext<'a> {
    pub fn new(draft: &'a DraftConfig, vault_root: NormalizedPath) -> Self {
        Self { draft, vault_root }
    }

    /// Folder of a content type as a vault-relative path string.
    pub fn vault_folder(&self, folder: &str) -> String {
        vault_fs::resolve::vault_relative_folder(
            folder,
            self.draft.topology.as_ref(),
            &self.vault_root,
        )
        .to_string()
    }
}

/// One downstream tool's configuration adapter.
pub trait ToolAdapter {
    /// Plugin id, also the settings directory name.
    fn id(&self) -> &str;

    /// On-disk settings file, relative to the vault root.
    fn settings_path(&self) -> NormalizedPath {
        NormalizedPath::new(format!(".obsidian/plugins/{}/data.json", self.id()))
    }

    /// Project the draft into the settings fields this system owns.
    ///
    /// Pure. Returns `None` when the draft gives the adapter nothing to
    /// write, in which case apply is a no-op.
    fn synthesize(&self, ctx: &SynthContext<'_>) -> Option<Value>;

    /// Fold the synthesized patch into the existing settings object.
    ///
    /// The default is a shallow merge of top-level keys. Adapters whose
    /// tools keep arrays of records override this with a keyed merge.
    fn merge(&self, existing: &mut Map<String, Value>, patch: &Map<String, Value>) {
        shallow_merge(existing, patch);
    }

    /// Synthesize and persist, preferring the live settings object.
    fn apply(&self, ctx: &SynthContext<'_>, registry: &dyn ToolRegistry) -> Result<()> {
        let Some(patch) = self.synthesize(ctx) else {
            debug!(tool = self.id(), "nothing to synthesize, skipping");
            return Ok(());
        };
        let Value::Object(patch) = patch else {
            return Err(Error::InvalidPatch {
                tool: self.id().to_string(),
            });
        };

        if let Some(result) = registry.apply_live(self.id(), &patch) {
            debug!(tool = self.id(), "applied through live settings object");
            return result;
        }

        let path = ctx.vault_root.join(self.settings_path().as_str());
        self.merge_into_file(&path, &patch)
    }

    /// Read-merge-write against the on-disk settings file.
    fn merge_into_file(&self, path: &NormalizedPath, patch: &Map<String, Value>) -> Result<()> {
        if !path.is_file() {
            let mut fresh = Map::new();
            self.merge(&mut fresh, patch);
            let content = serde_json::to_string_pretty(&Value::Object(fresh))?;
            match io::create_new(path, &content) {
                Ok(()) => return Ok(()),
                // Someone created the file between our check and the
                // create; fall through and merge into it.
                Err(vault_fs::Error::AlreadyExists { .. }) => {
                    warn!(tool = self.id(), "settings file appeared concurrently, merging");
                }
                Err(e) => return Err(e.into()),
            }
        }

        let text = io::read_text(path)?;
        let mut existing = match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                warn!(tool = self.id(), "existing settings unreadable, rebuilding");
                Map::new()
            }
        };
        self.merge(&mut existing, patch);
        let content = serde_json::to_string_pretty(&Value::Object(existing))?;
        io::write_text(path, &content)?;
        Ok(())
    }
}

/// Overwrite top-level keys of `existing` with those of `patch`.
pub fn shallow_merge(existing: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        existing.insert(key.clone(), value.clone());
    }
}

/// Merge an array of record objects by a natural key.
///
/// Records in `patch_items` update the matching existing record in place
/// (preserving its position and foreign fields) or are appended. Existing
/// records with no counterpart are kept; this merge never deletes.
pub fn merge_keyed_array<K>(existing: &mut Vec<Value>, patch_items: &[Value], key_of: K)
where
    K: Fn(&Value) -> Option<String>,
{
    for item in patch_items {
        let key = key_of(item);
        let slot = existing
            .iter_mut()
            .find(|candidate| key.is_some() && key_of(candidate) == key);
        match slot {
            Some(slot) => match (slot.as_object_mut(), item.as_object()) {
                (Some(slot_map), Some(item_map)) => shallow_merge(slot_map, item_map),
                _ => *slot = item.clone(),
            },
            None => existing.push(item.clone()),
        }
    }
}

/// Natural key of a record identified by its `name` and `folder` fields.
pub fn name_folder_key(record: &Value) -> Option<String> {
    let name = record.get("name")?.as_str()?;
    let folder = record.get("folder")?.as_str()?;
    Some(format!("{name}\u{0}{folder}"))
}
