//! Error types for vault-wizard

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] vault_fs::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown preset: {preset}")]
    InvalidPreset { preset: String },

    #[error("Wizard finished without validating step {step}")]
    StepValidation { step: String },
}
