//! Composer tool synthesizer
//!
//! The composer creates new documents from per-type front-matter templates.
//! Posts and Pages map onto its two built-in slots; every other enabled
//! content type becomes a custom entry, merged by name and folder so
//! user-tuned fields on existing entries survive.

use serde_json::{Map, Value};

use vault_fs::resolve;
use vault_wizard::{generate_template, ComposerConfig, ComposerCustomType, DraftConfig};

use crate::adapter::{merge_keyed_array, name_folder_key, SynthContext, ToolAdapter};

pub struct ComposerAdapter;

impl ToolAdapter for ComposerAdapter {
    fn id(&self) -> &str {
        "astro-composer"
    }

    fn synthesize(&self, ctx: &SynthContext<'_>) -> Option<Value> {
        let config = synthesize_composer(ctx);
        if config == ComposerConfig::default() {
            return None;
        }
        serde_json::to_value(config).ok()
    }

    fn merge(&self, existing: &mut Map<String, Value>, patch: &Map<String, Value>) {
        for (key, value) in patch {
            if key == "customContentTypes" {
                let slot = existing
                    .entry(key.clone())
                    .or_insert_with(|| Value::Array(Vec::new()));
                if let (Some(current), Some(items)) = (slot.as_array_mut(), value.as_array()) {
                    merge_keyed_array(current, items, name_folder_key);
                    continue;
                }
            }
            existing.insert(key.clone(), value.clone());
        }
    }
}

/// Project the draft into the composer's settings shape.
pub fn synthesize_composer(ctx: &SynthContext<'_>) -> ComposerConfig {
    let draft = ctx.draft;
    let mut config = ComposerConfig::default();

    for ct in draft.enabled_types() {
        let mapping = draft.mapping_for(&ct.id);
        let folder = ctx.vault_folder(&ct.folder);
        let creation_mode = creation_mode(ct);
        match ct.name.as_str() {
            "Posts" => {
                config.posts_folder = Some(folder);
                config.posts_creation_mode = Some(creation_mode);
                config.posts_index_file_name = Some(ct.index_file_name.clone());
            }
            "Pages" => {
                config.enable_pages = Some(true);
                config.pages_folder = Some(folder);
                config.pages_creation_mode = Some(creation_mode);
                config.pages_index_file_name = Some(ct.index_file_name.clone());
                config.page_template = Some(template_for(draft, &ct.id, false));
            }
            _ => config.custom_content_types.push(ComposerCustomType {
                id: ct.id.clone(),
                name: ct.name.clone(),
                folder,
                template: template_for(draft, &ct.id, true),
                enabled: true,
                link_base_path: ct.link_base_path(),
                creation_mode,
                index_file_name: ct.index_file_name.clone(),
            }),
        }
    }

    if let Some(default) = draft.default_type() {
        config.default_template = template_for(draft, &default.id, true);
    }

    if let Some(topology) = &draft.topology {
        let project_root = resolve::resolve_project_root(topology, &ctx.vault_root);
        config.config_file_path = resolve::to_relative(&ctx.vault_root, &topology.config_file)
            .to_string();
        config.terminal_project_root_path =
            resolve::to_relative(&ctx.vault_root, &project_root).to_string();
    }

    config
}

fn creation_mode(ct: &vault_detect::ContentType) -> String {
    match ct.organization {
        vault_detect::OrganizationMode::File => "file".to_string(),
        vault_detect::OrganizationMode::Folder => "folder".to_string(),
    }
}

/// The user-edited template when the mapping carries one, otherwise a
/// fresh one generated from the mapped properties.
fn template_for(draft: &DraftConfig, content_type_id: &str, include_date: bool) -> String {
    let mapping = draft.mapping_for(content_type_id);
    if mapping.template.is_empty() {
        generate_template(&mapping, include_date)
    } else {
        mapping.template.clone()
    }
}
