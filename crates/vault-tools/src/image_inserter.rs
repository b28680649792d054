//! Image-insertion helper synthesizer
//!
//! Fixes the wiki-link insertion formats and, when the default content
//! type maps an image property, routes inserted images into it.

use serde_json::{json, Value};

use crate::adapter::{SynthContext, ToolAdapter};

pub struct ImageInserterAdapter;

impl ToolAdapter for ImageInserterAdapter {
    fn id(&self) -> &str {
        "insert-unsplash-image"
    }

    fn synthesize(&self, ctx: &SynthContext<'_>) -> Option<Value> {
        let config = &ctx.draft.image_inserter;
        let mut patch = json!({
            "valueFormat": config.value_format,
            "insertFormat": config.insert_format,
        });

        let image_property = ctx
            .draft
            .default_type()
            .and_then(|ct| ctx.draft.mapping_for(&ct.id).image_property);
        if let Some(property) = image_property {
            patch["insertIntoProperty"] = json!(property);
        }
        Some(patch)
    }
}
