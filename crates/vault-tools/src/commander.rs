//! Command-palette organizer synthesizer
//!
//! Owns exactly one record in the organizer's page-header command list: the
//! editing-toolbar toggle, present when WYSIWYG editing is on and removed
//! when it is off. Every other command in the list belongs to the user.

use serde_json::{json, Map, Value};

use vault_wizard::CommanderCommand;

use crate::adapter::{SynthContext, ToolAdapter};

/// The one page-header command this system manages.
pub const TOOLBAR_COMMAND_ID: &str = "editing-toolbar:hide-show-menu";

pub struct CommanderAdapter;

impl CommanderAdapter {
    fn toolbar_command() -> CommanderCommand {
        CommanderCommand {
            id: TOOLBAR_COMMAND_ID.to_string(),
            icon: "lucide-pencil-line".to_string(),
            name: "Toggle editing toolbar".to_string(),
            mode: "any".to_string(),
        }
    }
}

impl ToolAdapter for CommanderAdapter {
    fn id(&self) -> &str {
        "cmdr"
    }

    fn synthesize(&self, ctx: &SynthContext<'_>) -> Option<Value> {
        let commands: Vec<CommanderCommand> = if ctx.draft.enable_wysiwyg {
            vec![Self::toolbar_command()]
        } else {
            Vec::new()
        };
        Some(json!({ "pageHeader": commands }))
    }

    /// The page-header list is an upsert-or-remove on our command id, never
    /// a replacement of the whole list.
    fn merge(&self, existing: &mut Map<String, Value>, patch: &Map<String, Value>) {
        for (key, value) in patch {
            if key == "pageHeader" {
                let slot = existing
                    .entry(key.clone())
                    .or_insert_with(|| Value::Array(Vec::new()));
                if let (Some(current), Some(items)) = (slot.as_array_mut(), value.as_array()) {
                    current.retain(|command| {
                        command.get("id").and_then(Value::as_str) != Some(TOOLBAR_COMMAND_ID)
                    });
                    current.extend(items.iter().cloned());
                    continue;
                }
            }
            existing.insert(key.clone(), value.clone());
        }
    }
}
