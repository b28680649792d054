//! Draft configuration aggregate
//!
//! The single mutable object a wizard session owns. Created at open time
//! (seeded from saved settings when present), mutated step by step, and
//! either discarded or committed through the finish transition. Field
//! names serialize in the camelCase form the downstream plugin stores use.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use vault_detect::{ContentType, FrontmatterMapping};
use vault_fs::ProjectTopology;

use crate::presets::Preset;
use crate::settings::WizardSettings;

/// Sort direction in a CMS view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

/// One sort criterion of a CMS view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub property: String,
    pub direction: SortDirection,
}

/// Image display mode of a CMS view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Cover,
    Thumbnail,
    None,
}

/// One view of the CMS view-definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsView {
    pub name: String,
    /// Vault-relative folder prefix the view filters on.
    pub folder: String,
    pub title_property: String,
    pub date_property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_property: Option<String>,
    #[serde(default)]
    pub image_format: ImageFormat,
    pub show_date: bool,
    pub show_draft_status: bool,
    pub show_tags: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_property: Option<String>,
    pub customize_new_button: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_note_location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortSpec>,
}

/// CMS view generator sub-configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CmsConfig {
    #[serde(default)]
    pub views: Vec<CmsView>,
}

/// One custom content type entry of the composer tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposerCustomType {
    pub id: String,
    pub name: String,
    pub folder: String,
    pub template: String,
    pub enabled: bool,
    pub link_base_path: String,
    pub creation_mode: String,
    pub index_file_name: String,
}

/// Composer/template engine sub-configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts_creation_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts_index_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_pages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages_creation_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages_index_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_template: Option<String>,
    #[serde(default)]
    pub custom_content_types: Vec<ComposerCustomType>,
    #[serde(default)]
    pub default_template: String,
    /// Vault-relative path of the project configuration file.
    #[serde(default)]
    pub config_file_path: String,
    /// Vault-relative path of the project root, for the terminal pane.
    #[serde(default)]
    pub terminal_project_root_path: String,
}

/// SEO indexer sub-configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoConfig {
    pub title_property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_property: Option<String>,
    /// Comma-joined vault-relative directories to scan.
    pub scan_directories: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_property: Option<String>,
    pub use_filename_as_title: bool,
    pub use_filename_as_slug: bool,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            title_property: "title".to_string(),
            description_property: None,
            scan_directories: String::new(),
            keyword_property: None,
            use_filename_as_title: false,
            use_filename_as_slug: true,
        }
    }
}

/// One page-header command of the command-palette organizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommanderCommand {
    pub id: String,
    pub icon: String,
    pub name: String,
    pub mode: String,
}

/// Command-palette organizer sub-configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommanderConfig {
    #[serde(default)]
    pub page_header_commands: Vec<CommanderCommand>,
}

/// Property-promotion sub-configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPromotionConfig {
    pub property_key: String,
}

impl Default for PropertyPromotionConfig {
    fn default() -> Self {
        Self {
            property_key: "title".to_string(),
        }
    }
}

/// Image-insertion helper sub-configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInserterConfig {
    pub value_format: String,
    pub insert_format: String,
}

impl Default for ImageInserterConfig {
    fn default() -> Self {
        Self {
            value_format: "[[attachments/{image-url}]]".to_string(),
            insert_format: "[[attachments/{image-url}]]".to_string(),
        }
    }
}

/// The draft configuration owned by an active wizard session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DraftConfig {
    pub topology: Option<ProjectTopology>,
    /// Ordered content-type records, detection order preserved.
    pub content_types: Vec<ContentType>,
    /// Front-matter mapping per content-type id.
    pub frontmatter: BTreeMap<String, FrontmatterMapping>,
    pub default_content_type: Option<String>,
    pub preset: Preset,
    pub enable_wysiwyg: bool,
    pub theme: String,
    pub enabled_plugins: Vec<String>,
    pub disabled_plugins: Vec<String>,
    pub cms: CmsConfig,
    pub composer: ComposerConfig,
    pub seo: SeoConfig,
    pub commander: CommanderConfig,
    pub property_promotion: PropertyPromotionConfig,
    pub image_inserter: ImageInserterConfig,
}

impl DraftConfig {
    /// Seed a fresh draft from previously saved settings, if any.
    pub fn seed(settings: Option<&WizardSettings>) -> Self {
        match settings {
            Some(s) => Self {
                topology: s.topology.clone(),
                content_types: s.content_types.clone(),
                frontmatter: s.frontmatter.clone(),
                default_content_type: s.default_content_type.clone(),
                preset: s.preset,
                enable_wysiwyg: s.enable_wysiwyg,
                theme: s.theme.clone(),
                enabled_plugins: s.enabled_plugins.clone(),
                disabled_plugins: s.disabled_plugins.clone(),
                cms: s.cms.clone(),
                composer: s.composer.clone(),
                seo: s.seo.clone(),
                commander: s.commander.clone(),
                property_promotion: s.property_promotion.clone(),
                image_inserter: s.image_inserter.clone(),
            },
            None => Self::default(),
        }
    }

    /// Enabled content types, in order.
    pub fn enabled_types(&self) -> impl Iterator<Item = &ContentType> {
        self.content_types.iter().filter(|ct| ct.enabled)
    }

    /// The default content type, falling back to the first enabled one.
    pub fn default_type(&self) -> Option<&ContentType> {
        self.default_content_type
            .as_ref()
            .and_then(|id| self.content_types.iter().find(|ct| &ct.id == id))
            .or_else(|| self.enabled_types().next())
    }

    /// Front-matter mapping for a content type, default (all fallbacks)
    /// when the step has not produced one yet.
    pub fn mapping_for(&self, content_type_id: &str) -> FrontmatterMapping {
        self.frontmatter
            .get(content_type_id)
            .cloned()
            .unwrap_or_default()
    }
}

/// Generate the composer's front-matter document template for one mapping.
pub fn generate_template(mapping: &FrontmatterMapping, include_date: bool) -> String {
    let mut template = String::from("---\n");
    template.push_str(&format!("{}: \"{{{{title}}}}\"\n", mapping.title_or_default()));
    if include_date {
        template.push_str(&format!("{}: {{{{date}}}}\n", mapping.date_or_default()));
    }
    if let Some(description) = &mapping.description_property {
        template.push_str(&format!("{description}: \"\"\n"));
    }
    template.push_str("tags: []\n");
    match (&mapping.draft_property, mapping.draft_polarity) {
        (Some(prop), Some(vault_detect::DraftPolarity::FalseMeansDraft)) => {
            template.push_str(&format!("{prop}: false\n"));
        }
        (Some(prop), _) => {
            template.push_str(&format!("{prop}: true\n"));
        }
        (None, _) => template.push_str("draft: true\n"),
    }
    template.push_str("---\n");
    template
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vault_detect::DraftPolarity;

    #[test]
    fn test_generate_template_defaults() {
        let template = generate_template(&FrontmatterMapping::default(), true);
        assert_eq!(
            template,
            "---\ntitle: \"{{title}}\"\ndate: {{date}}\ntags: []\ndraft: true\n---\n"
        );
    }

    #[test]
    fn test_generate_template_with_mapped_properties() {
        let mapping = FrontmatterMapping {
            title_property: Some("heading".to_string()),
            date_property: Some("pubDate".to_string()),
            description_property: Some("summary".to_string()),
            draft_property: Some("published".to_string()),
            draft_polarity: Some(DraftPolarity::FalseMeansDraft),
            ..Default::default()
        };
        let template = generate_template(&mapping, true);
        assert!(template.contains("heading: \"{{title}}\""));
        assert!(template.contains("pubDate: {{date}}"));
        assert!(template.contains("summary: \"\""));
        assert!(template.contains("published: false"));
    }

    #[test]
    fn test_generate_template_without_date() {
        let template = generate_template(&FrontmatterMapping::default(), false);
        assert!(!template.contains("{{date}}"));
    }

    #[test]
    fn test_default_type_falls_back_to_first_enabled() {
        let mut draft = DraftConfig::default();
        let mut a = ContentType::discovered("posts");
        a.enabled = false;
        let b = ContentType::discovered("docs");
        draft.content_types = vec![a, b.clone()];
        assert_eq!(draft.default_type().unwrap().id, b.id);
    }

    #[test]
    fn test_default_type_respects_choice() {
        let mut draft = DraftConfig::default();
        let a = ContentType::discovered("posts");
        let b = ContentType::discovered("docs");
        draft.default_content_type = Some(b.id.clone());
        draft.content_types = vec![a, b.clone()];
        assert_eq!(draft.default_type().unwrap().id, b.id);
    }
}
