//! Property-promotion synthesizer
//!
//! Promotes the mapped title property into the displayed note title. Runs
//! after the content-facing tools so the property key it promotes is the
//! one the rest of the configuration agreed on.

use serde_json::{json, Value};

use crate::adapter::{SynthContext, ToolAdapter};

pub struct PropertyPromoteAdapter;

impl ToolAdapter for PropertyPromoteAdapter {
    fn id(&self) -> &str {
        "property-over-file-name"
    }

    fn synthesize(&self, ctx: &SynthContext<'_>) -> Option<Value> {
        let first = ctx.draft.enabled_types().next()?;
        let mapping = ctx.draft.mapping_for(&first.id);
        Some(json!({ "propertyKey": mapping.title_or_default() }))
    }
}
