//! Setup wizard core for Vault Site Wizard
//!
//! The ordered step pipeline, the draft configuration it edits, the
//! persisted settings snapshot, and the session state machine that drives
//! advance/retreat/skip/finish transitions.

pub mod config;
pub mod error;
pub mod presets;
pub mod session;
pub mod settings;
pub mod steps;

pub use config::{
    generate_template, CmsConfig, CmsView, CommanderCommand, CommanderConfig, ComposerConfig,
    ComposerCustomType, DraftConfig, ImageFormat, ImageInserterConfig, PropertyPromotionConfig,
    SeoConfig, SortDirection, SortSpec,
};
pub use error::{Error, Result};
pub use presets::{preset_plugins, Preset, ALL_PLUGINS};
pub use session::{FinishHandler, FinishReport, ToolOutcome, Transition, WizardSession};
pub use settings::{JsonSettingsStore, SettingsStore, WizardSettings};
pub use steps::{builtin_steps, StepId, StepView, WizardStep};
