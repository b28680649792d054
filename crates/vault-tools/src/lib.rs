//! Downstream tool configuration for Vault Site Wizard
//!
//! One adapter per tool projects the finished draft into the settings
//! fields this system owns and merges them into the tool's existing
//! configuration, live when the host exposes it and on disk otherwise.
//! The dispatcher runs every adapter in order and reports per-tool
//! outcomes, so one broken tool never blocks the rest.

pub mod adapter;
pub mod banner;
pub mod bases_cms;
pub mod commander;
pub mod composer;
pub mod dispatcher;
pub mod error;
pub mod image_inserter;
pub mod logging;
pub mod property_promote;
pub mod registry;
pub mod seo;

pub use adapter::{merge_keyed_array, name_folder_key, shallow_merge, SynthContext, ToolAdapter};
pub use banner::BannerAdapter;
pub use bases_cms::{synthesize_views, BasesCmsAdapter, BASE_FILE, CATCH_ALL_VIEW};
pub use commander::{CommanderAdapter, TOOLBAR_COMMAND_ID};
pub use composer::{synthesize_composer, ComposerAdapter};
pub use dispatcher::{builtin_adapters, ToolDispatcher, PLUGIN_STATES};
pub use error::{Error, Result};
pub use image_inserter::ImageInserterAdapter;
pub use property_promote::PropertyPromoteAdapter;
pub use registry::{NullRegistry, ToolRegistry};
pub use seo::{synthesize_seo, SeoAdapter};
