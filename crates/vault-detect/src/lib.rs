//! Project topology detection and content inference
//!
//! Walks the filesystem upward to find the adjacent static-site project,
//! classifies the vault's position relative to its content directory,
//! discovers candidate content types, and infers front-matter property
//! roles from sample documents.

pub mod content_types;
pub mod error;
pub mod frontmatter;
pub mod markers;
pub mod project;
pub mod store;

pub use content_types::{AttachmentMode, ContentType, ContentTypeDetector, OrganizationMode};
pub use error::{Error, Result};
pub use frontmatter::{
    extract_front_matter, infer_mapping, DraftPolarity, FrontmatterAnalyzer, FrontmatterMapping,
    SampleDocument,
};
pub use markers::{MarkerKind, ProjectMarker, PROJECT_MARKERS};
pub use project::{classify_vault_location, ProjectDetector};
pub use store::{DocumentStore, FsDocumentStore};
