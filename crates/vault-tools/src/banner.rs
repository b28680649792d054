//! Banner tool synthesizer
//!
//! Points the banner renderer at the mapped image property. The banner
//! settings nest the property name under a `properties` object, so the
//! merge recurses one level instead of replacing the whole object.

use serde_json::{json, Map, Value};

use crate::adapter::{shallow_merge, SynthContext, ToolAdapter};

pub struct BannerAdapter;

impl ToolAdapter for BannerAdapter {
    fn id(&self) -> &str {
        "simple-banner"
    }

    fn synthesize(&self, ctx: &SynthContext<'_>) -> Option<Value> {
        let image_property = ctx
            .draft
            .default_type()
            .and_then(|ct| ctx.draft.mapping_for(&ct.id).image_property)?;
        Some(json!({ "properties": { "image": image_property } }))
    }

    fn merge(&self, existing: &mut Map<String, Value>, patch: &Map<String, Value>) {
        for (key, value) in patch {
            if key == "properties" {
                let slot = existing
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if let (Some(current), Some(nested)) = (slot.as_object_mut(), value.as_object()) {
                    shallow_merge(current, nested);
                    continue;
                }
            }
            existing.insert(key.clone(), value.clone());
        }
    }
}
