//! Front-matter inference over a sample document
//!
//! Parses the fenced YAML preamble of one sample document per content type
//! and guesses which property plays which semantic role. Best-effort: a
//! role with no match is a valid terminal state, and the user can override
//! everything afterwards.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use vault_fs::NormalizedPath;

use crate::store::DocumentStore;

/// Candidate property names per semantic role, first match wins.
pub const TITLE_PROPERTIES: &[&str] = &["title"];
pub const DATE_PROPERTIES: &[&str] = &["date", "pubDate", "publishedDate", "publishDate"];
pub const DESCRIPTION_PROPERTIES: &[&str] =
    &["description", "summary", "excerpt", "intro", "snippet", "blurb"];
pub const TAGS_PROPERTIES: &[&str] = &["tags", "tag", "categories", "category"];
pub const IMAGE_PROPERTIES: &[&str] = &["image", "cover", "coverImage", "thumbnail", "featuredImage"];

/// Boolean polarity convention of the draft flag.
///
/// Derived from which key name was found, not configured independently:
/// a `draft` key means true marks a draft, a `published` key means false
/// marks a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DraftPolarity {
    TrueMeansDraft,
    FalseMeansDraft,
}

/// Front-matter property mapping for one content type.
///
/// `None` for title/date means the agreed fallback (file name and creation
/// time respectively); `None` elsewhere means the role is unmapped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontmatterMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_polarity: Option<DraftPolarity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_property: Option<String>,
    /// Generated document template for the composer tool.
    #[serde(default)]
    pub template: String,
}

impl FrontmatterMapping {
    /// Title property for display purposes, with the agreed fallback.
    pub fn title_or_default(&self) -> &str {
        self.title_property.as_deref().unwrap_or("title")
    }

    /// Date property for display purposes, with the agreed fallback.
    pub fn date_or_default(&self) -> &str {
        self.date_property.as_deref().unwrap_or("date")
    }
}

/// A sample document's parsed front-matter block.
#[derive(Debug, Clone)]
pub struct SampleDocument {
    pub file: NormalizedPath,
    pub fields: Mapping,
    pub raw: String,
}

/// Extract the fenced YAML preamble from document text.
///
/// The block must start at the first line; returns the raw YAML and its
/// parsed mapping, or `None` when the document has no usable preamble.
pub fn extract_front_matter(content: &str) -> Option<(String, Mapping)> {
    let mut lines = content.lines();
    if lines.next()?.trim_end() != "---" {
        return None;
    }
    let mut raw_lines = Vec::new();
    let mut closed = false;
    for line in lines {
        if line.trim_end() == "---" {
            closed = true;
            break;
        }
        raw_lines.push(line);
    }
    if !closed {
        return None;
    }
    let raw = raw_lines.join("\n");
    match serde_yaml::from_str::<Value>(&raw) {
        Ok(Value::Mapping(map)) => Some((raw, map)),
        _ => None,
    }
}

/// Analyzes documents under a folder to infer a front-matter mapping.
pub struct FrontmatterAnalyzer<'a, S: DocumentStore> {
    store: &'a S,
}

impl<'a, S: DocumentStore> FrontmatterAnalyzer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// First document under `folder` with a parseable front-matter block.
    pub fn find_sample(&self, folder: &NormalizedPath) -> Option<SampleDocument> {
        let files = self.store.list_markdown_files(folder).ok()?;
        for file in files {
            let Ok(content) = self.store.read_text(&file) else {
                continue;
            };
            if let Some((raw, fields)) = extract_front_matter(&content) {
                return Some(SampleDocument { file, fields, raw });
            }
        }
        debug!(folder = %folder, "no sample document with front matter");
        None
    }

    /// Infer a mapping from a folder's sample document, or an empty
    /// mapping (all fallbacks) when no sample exists.
    pub fn infer_for_folder(&self, folder: &NormalizedPath) -> FrontmatterMapping {
        match self.find_sample(folder) {
            Some(sample) => infer_mapping(&sample.fields),
            None => FrontmatterMapping::default(),
        }
    }
}

/// Apply the per-role candidate lists to a parsed front-matter map.
pub fn infer_mapping(fields: &Mapping) -> FrontmatterMapping {
    let (draft_property, draft_polarity) = infer_draft(fields);
    FrontmatterMapping {
        title_property: first_match(fields, TITLE_PROPERTIES),
        date_property: first_match(fields, DATE_PROPERTIES),
        description_property: first_match(fields, DESCRIPTION_PROPERTIES),
        tags_property: first_match(fields, TAGS_PROPERTIES),
        draft_property,
        draft_polarity,
        image_property: first_match(fields, IMAGE_PROPERTIES),
        template: String::new(),
    }
}

fn first_match(fields: &Mapping, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find(|c| fields.contains_key(Value::String((**c).to_string())))
        .map(|c| (*c).to_string())
}

fn infer_draft(fields: &Mapping) -> (Option<String>, Option<DraftPolarity>) {
    if fields.contains_key(Value::String("draft".to_string())) {
        (Some("draft".to_string()), Some(DraftPolarity::TrueMeansDraft))
    } else if fields.contains_key(Value::String("published".to_string())) {
        (
            Some("published".to_string()),
            Some(DraftPolarity::FalseMeansDraft),
        )
    } else {
        (None, None)
    }
}
