//! SEO indexer synthesizer
//!
//! Points the indexer at every enabled content folder and tells it which
//! front-matter properties carry the title and description. Property
//! choices follow the first enabled content type; a mixed-convention vault
//! still gets one coherent indexer configuration.

use serde_json::Value;

use vault_wizard::SeoConfig;

use crate::adapter::{SynthContext, ToolAdapter};

pub struct SeoAdapter;

impl ToolAdapter for SeoAdapter {
    fn id(&self) -> &str {
        "seo"
    }

    fn synthesize(&self, ctx: &SynthContext<'_>) -> Option<Value> {
        let config = synthesize_seo(ctx)?;
        serde_json::to_value(config).ok()
    }
}

/// Project the draft into the indexer's settings shape, or `None` when no
/// content type is enabled.
pub fn synthesize_seo(ctx: &SynthContext<'_>) -> Option<SeoConfig> {
    let draft = ctx.draft;
    let first = draft.enabled_types().next()?;
    let mapping = draft.mapping_for(&first.id);

    let scan_directories = draft
        .enabled_types()
        .map(|ct| ctx.vault_folder(&ct.folder))
        .collect::<Vec<_>>()
        .join(",");

    Some(SeoConfig {
        title_property: mapping.title_or_default().to_string(),
        description_property: mapping.description_property.clone(),
        scan_directories,
        keyword_property: Some("targetKeyword".to_string()),
        use_filename_as_title: mapping.title_property.is_none(),
        use_filename_as_slug: true,
    })
}
