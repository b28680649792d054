//! CMS view-definition file generator
//!
//! Writes `bases/Home.base`, a YAML database-view file over the vault's
//! markdown documents: one card view per enabled content type filtered on
//! its vault-relative folder prefix, plus a catch-all view over every
//! document. Views the user added by hand and `formula.*` property
//! definitions are carried over untouched on regeneration.

use serde_yaml::{Mapping, Value};
use tracing::debug;

use vault_fs::{io, NormalizedPath};
use vault_wizard::{CmsView, ImageFormat, SortDirection, SortSpec};

use crate::adapter::{SynthContext, ToolAdapter};
use crate::error::Result;
use crate::registry::ToolRegistry;

/// Vault-relative path of the generated view file.
pub const BASE_FILE: &str = "bases/Home.base";

/// Name of the generated view spanning every document.
pub const CATCH_ALL_VIEW: &str = "All content";

pub struct BasesCmsAdapter;

impl BasesCmsAdapter {
    fn base_path(&self, ctx: &SynthContext<'_>) -> NormalizedPath {
        ctx.vault_root.join(BASE_FILE)
    }
}

impl ToolAdapter for BasesCmsAdapter {
    fn id(&self) -> &str {
        "bases-cms"
    }

    fn settings_path(&self) -> NormalizedPath {
        NormalizedPath::new(BASE_FILE)
    }

    fn synthesize(&self, ctx: &SynthContext<'_>) -> Option<serde_json::Value> {
        let views = effective_views(ctx);
        if views.is_empty() {
            return None;
        }
        serde_json::to_value(Value::Mapping(base_document(&views))).ok()
    }

    /// The view file is YAML, not plugin JSON, so the whole apply path is
    /// replaced: regenerate the document and graft the user's foreign
    /// views and formula properties back in.
    fn apply(&self, ctx: &SynthContext<'_>, _registry: &dyn ToolRegistry) -> Result<()> {
        let views = effective_views(ctx);
        if views.is_empty() {
            debug!(tool = self.id(), "no enabled content types, skipping");
            return Ok(());
        }
        let mut document = base_document(&views);

        let path = self.base_path(ctx);
        let mut formulas = Vec::new();
        if path.is_file() {
            let text = io::read_text(&path)?;
            if let Ok(Value::Mapping(existing)) = serde_yaml::from_str::<Value>(&text) {
                preserve_foreign_views(&mut document, &existing, &views);
                formulas = formula_blocks(&text);
            }
        }

        let rendered = serde_yaml::to_string(&Value::Mapping(document))?;
        io::write_text(&path, &splice_formula_blocks(rendered, &formulas))?;
        Ok(())
    }
}

/// The views to materialize: the draft's reviewed list when the CMS step
/// produced one, otherwise a fresh projection of the content types.
fn effective_views(ctx: &SynthContext<'_>) -> Vec<CmsView> {
    if ctx.draft.cms.views.is_empty() {
        synthesize_views(ctx)
    } else {
        ctx.draft.cms.views.clone()
    }
}

/// One view per enabled content type plus the catch-all, newest first.
pub fn synthesize_views(ctx: &SynthContext<'_>) -> Vec<CmsView> {
    let mut views: Vec<CmsView> = ctx
        .draft
        .enabled_types()
        .map(|ct| {
            let mapping = ctx.draft.mapping_for(&ct.id);
            let folder = ctx.vault_folder(&ct.folder);
            CmsView {
                name: ct.name.clone(),
                folder: folder.clone(),
                title_property: mapping.title_or_default().to_string(),
                date_property: mapping.date_or_default().to_string(),
                description_property: mapping.description_property.clone(),
                image_format: if mapping.image_property.is_some() {
                    ImageFormat::Cover
                } else {
                    ImageFormat::None
                },
                show_date: true,
                show_draft_status: mapping.draft_property.is_some(),
                show_tags: mapping.tags_property.is_some(),
                tags_property: mapping.tags_property.clone(),
                customize_new_button: true,
                new_note_location: Some(folder),
                sort: vec![SortSpec {
                    property: mapping.date_or_default().to_string(),
                    direction: SortDirection::Desc,
                }],
            }
        })
        .collect();

    if views.is_empty() {
        return views;
    }

    // The catch-all spans every folder; it sorts by the default type's
    // date convention since a mixed view needs one to lead with.
    let default_mapping = ctx
        .draft
        .default_type()
        .map(|ct| ctx.draft.mapping_for(&ct.id))
        .unwrap_or_default();
    views.push(CmsView {
        name: CATCH_ALL_VIEW.to_string(),
        folder: String::new(),
        title_property: default_mapping.title_or_default().to_string(),
        date_property: default_mapping.date_or_default().to_string(),
        description_property: default_mapping.description_property.clone(),
        image_format: ImageFormat::None,
        show_date: true,
        show_draft_status: false,
        show_tags: false,
        tags_property: None,
        customize_new_button: false,
        new_note_location: None,
        sort: vec![SortSpec {
            property: default_mapping.date_or_default().to_string(),
            direction: SortDirection::Desc,
        }],
    });
    views
}

/// Build the full YAML document for the given views.
fn base_document(views: &[CmsView]) -> Mapping {
    let mut document = Mapping::new();
    document.insert(yaml("filters"), markdown_filter());
    document.insert(yaml("properties"), properties_block(views));
    document.insert(
        yaml("views"),
        Value::Sequence(views.iter().map(view_block).collect()),
    );
    document
}

/// Restrict the whole base to markdown documents.
fn markdown_filter() -> Value {
    let mut filters = Mapping::new();
    filters.insert(
        yaml("and"),
        Value::Sequence(vec![yaml("file.ext == \"md\"")]),
    );
    Value::Mapping(filters)
}

/// Display metadata for every property any view references.
fn properties_block(views: &[CmsView]) -> Value {
    let mut properties = Mapping::new();
    let mut add = |property: &str| {
        let key = yaml(&format!("note.{property}"));
        if !properties.contains_key(&key) {
            let mut meta = Mapping::new();
            meta.insert(yaml("displayName"), yaml(&display_name(property)));
            properties.insert(key, Value::Mapping(meta));
        }
    };
    for view in views {
        add(&view.title_property);
        add(&view.date_property);
        if let Some(description) = &view.description_property {
            add(description);
        }
        if let Some(tags) = &view.tags_property {
            add(tags);
        }
    }
    Value::Mapping(properties)
}

fn view_block(view: &CmsView) -> Value {
    let mut block = Mapping::new();
    block.insert(yaml("type"), yaml("cards"));
    block.insert(yaml("name"), yaml(&view.name));

    if !view.folder.is_empty() {
        let mut filters = Mapping::new();
        filters.insert(
            yaml("and"),
            Value::Sequence(vec![yaml(&format!(
                "file.folder.startsWith(\"{}\")",
                view.folder
            ))]),
        );
        block.insert(yaml("filters"), Value::Mapping(filters));
    }

    let mut order = vec![yaml(&format!("note.{}", view.title_property))];
    if view.show_date {
        order.push(yaml(&format!("note.{}", view.date_property)));
    }
    if let Some(tags) = view.tags_property.as_ref().filter(|_| view.show_tags) {
        order.push(yaml(&format!("note.{tags}")));
    }
    block.insert(yaml("order"), Value::Sequence(order));

    if !view.sort.is_empty() {
        let sort = view
            .sort
            .iter()
            .map(|spec| {
                let mut entry = Mapping::new();
                entry.insert(yaml("property"), yaml(&format!("note.{}", spec.property)));
                let direction = match spec.direction {
                    SortDirection::Asc => "ASC",
                    SortDirection::Desc => "DESC",
                };
                entry.insert(yaml("direction"), yaml(direction));
                Value::Mapping(entry)
            })
            .collect();
        block.insert(yaml("sort"), Value::Sequence(sort));
    }

    if view.image_format != ImageFormat::None {
        block.insert(yaml("image"), yaml("note.image"));
    }

    Value::Mapping(block)
}

/// Append the previous file's views whose names we do not own to the
/// regenerated document.
fn preserve_foreign_views(document: &mut Mapping, existing: &Mapping, owned: &[CmsView]) {
    let owned_names: Vec<&str> = owned.iter().map(|v| v.name.as_str()).collect();

    if let Some(Value::Sequence(previous_views)) = existing.get(yaml("views")) {
        let foreign: Vec<Value> = previous_views
            .iter()
            .filter(|view| {
                view.get("name")
                    .and_then(Value::as_str)
                    .map(|name| !owned_names.contains(&name))
                    .unwrap_or(true)
            })
            .cloned()
            .collect();
        if let Some(Value::Sequence(views)) = document.get_mut(yaml("views")) {
            views.extend(foreign);
        }
    }
}

/// Raw lines of each `formula.*` entry under the previous file's top-level
/// `properties:` key.
///
/// Formula definitions are carried as text, never through parsed YAML:
/// re-serializing the parsed value can reflow the user's quoting.
fn formula_blocks(text: &str) -> Vec<String> {
    let mut blocks: Vec<String> = Vec::new();
    let mut current: Option<Vec<&str>> = None;
    let mut in_properties = false;
    let mut entry_indent = None;

    let flush = |current: &mut Option<Vec<&str>>, blocks: &mut Vec<String>| {
        if let Some(block) = current.take() {
            blocks.push(block.join("\n"));
        }
    };

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let indent = line.len() - line.trim_start().len();
        if indent == 0 {
            flush(&mut current, &mut blocks);
            in_properties = line.trim_end() == "properties:";
            entry_indent = None;
            continue;
        }
        if !in_properties {
            continue;
        }
        let first = *entry_indent.get_or_insert(indent);
        if indent == first {
            flush(&mut current, &mut blocks);
            if line.trim_start().starts_with("formula.") {
                current = Some(vec![line]);
            }
        } else if let Some(block) = current.as_mut() {
            block.push(line);
        }
    }
    flush(&mut current, &mut blocks);
    blocks
}

/// Re-insert raw formula entries at the end of the rendered document's
/// `properties:` section.
fn splice_formula_blocks(rendered: String, blocks: &[String]) -> String {
    if blocks.is_empty() {
        return rendered;
    }
    let mut out = String::new();
    let mut in_properties = false;
    let mut spliced = false;

    for line in rendered.lines() {
        let top_level = !line.starts_with(' ') && !line.trim().is_empty();
        if top_level && in_properties && !spliced {
            for block in blocks {
                out.push_str(block);
                out.push('\n');
            }
            spliced = true;
        }
        if top_level {
            in_properties = line.trim_end() == "properties:";
        }
        out.push_str(line);
        out.push('\n');
    }
    if in_properties && !spliced {
        for block in blocks {
            out.push_str(block);
            out.push('\n');
        }
    }
    out
}

fn display_name(property: &str) -> String {
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn yaml(s: &str) -> Value {
    Value::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use vault_detect::{ContentType, FrontmatterMapping, OrganizationMode};
    use vault_fs::{NormalizedPath, ProjectTopology, VaultLocation};
    use vault_wizard::DraftConfig;

    use crate::registry::NullRegistry;

    fn draft_with_types() -> DraftConfig {
        let mut draft = DraftConfig::default();
        let posts = ContentType::discovered("posts");
        let mut docs = ContentType::discovered("docs");
        docs.organization = OrganizationMode::Folder;
        draft.frontmatter.insert(
            posts.id.clone(),
            FrontmatterMapping {
                date_property: Some("pubDate".to_string()),
                description_property: Some("summary".to_string()),
                tags_property: Some("tags".to_string()),
                ..Default::default()
            },
        );
        draft
            .frontmatter
            .insert(docs.id.clone(), FrontmatterMapping::default());
        draft.content_types = vec![posts, docs];
        draft
    }

    fn content_topology(vault: &NormalizedPath) -> ProjectTopology {
        // Vault root is the content directory itself.
        let project = vault.parent().unwrap().parent().unwrap();
        ProjectTopology {
            project_root: project.clone(),
            config_file: project.join("astro.config.mjs"),
            vault_location: VaultLocation::Content,
        }
    }

    #[test]
    fn test_synthesizes_one_view_per_type_plus_catch_all() {
        let mut draft = draft_with_types();
        let vault = NormalizedPath::new("/site/src/content");
        draft.topology = Some(content_topology(&vault));
        let ctx = SynthContext::new(&draft, vault);

        let views = synthesize_views(&ctx);
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].name, "Posts");
        assert_eq!(views[0].folder, "posts");
        assert_eq!(views[0].date_property, "pubDate");
        assert_eq!(views[1].name, "Docs");
        assert_eq!(views[2].name, CATCH_ALL_VIEW);
        assert_eq!(views[2].folder, "");
        // Catch-all sorts by the default (first enabled) type's date.
        assert_eq!(views[2].sort[0].property, "pubDate");
        assert_eq!(views[2].sort[0].direction, SortDirection::Desc);
    }

    #[test]
    fn test_disabled_types_get_no_view() {
        let mut draft = draft_with_types();
        draft.content_types[1].enabled = false;
        let ctx = SynthContext::new(&draft, NormalizedPath::new("/vault"));

        let views = synthesize_views(&ctx);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].name, "Posts");
    }

    #[test]
    fn test_apply_writes_base_file() {
        let temp = TempDir::new().unwrap();
        let vault = NormalizedPath::new(temp.path());
        let draft = draft_with_types();
        let ctx = SynthContext::new(&draft, vault.clone());

        BasesCmsAdapter.apply(&ctx, &NullRegistry).unwrap();

        let text = io::read_text(&vault.join(BASE_FILE)).unwrap();
        let value: Value = serde_yaml::from_str(&text).unwrap();
        let views = value.get("views").and_then(Value::as_sequence).unwrap();
        assert_eq!(views.len(), 3);
        assert_eq!(
            views[0].get("filters").unwrap()["and"][0],
            yaml("file.folder.startsWith(\"posts\")")
        );
        assert_eq!(
            value.get("filters").unwrap()["and"][0],
            yaml("file.ext == \"md\"")
        );
    }

    #[test]
    fn test_regeneration_preserves_foreign_views_and_formulas() {
        let temp = TempDir::new().unwrap();
        let vault = NormalizedPath::new(temp.path());
        let existing = r#"
filters:
  and:
    - file.ext == "md"
properties:
  note.title:
    displayName: Old Title
  formula.age:
    displayName: "Age"
    formula: 'dateDiff(now(), note.pubDate, "days")'
views:
  - type: table
    name: My private view
    order:
      - file.name
  - type: cards
    name: Posts
"#;
        io::write_text(&vault.join(BASE_FILE), existing).unwrap();

        let draft = draft_with_types();
        let ctx = SynthContext::new(&draft, vault.clone());
        BasesCmsAdapter.apply(&ctx, &NullRegistry).unwrap();

        let text = io::read_text(&vault.join(BASE_FILE)).unwrap();
        let value: Value = serde_yaml::from_str(&text).unwrap();
        let views = value.get("views").and_then(Value::as_sequence).unwrap();
        let names: Vec<&str> = views
            .iter()
            .filter_map(|v| v.get("name").and_then(Value::as_str))
            .collect();
        // Owned views regenerated once, the foreign one appended.
        assert_eq!(names, vec!["Posts", "Docs", CATCH_ALL_VIEW, "My private view"]);

        let properties = value.get("properties").unwrap();
        assert_eq!(
            properties["formula.age"]["displayName"],
            yaml("Age")
        );
        // Owned property metadata is regenerated, not carried over.
        assert_eq!(properties["note.title"]["displayName"], yaml("Title"));

        // Formula text survives with its original quoting, not a
        // reflowed re-serialization of the parsed value.
        assert!(text.contains("  formula.age:\n    displayName: \"Age\"\n    formula: 'dateDiff(now(), note.pubDate, \"days\")'"));
    }

    #[test]
    fn test_apply_without_types_is_a_no_op() {
        let temp = TempDir::new().unwrap();
        let vault = NormalizedPath::new(temp.path());
        let draft = DraftConfig::default();
        let ctx = SynthContext::new(&draft, vault.clone());

        BasesCmsAdapter.apply(&ctx, &NullRegistry).unwrap();
        assert!(!vault.join(BASE_FILE).is_file());
    }
}
