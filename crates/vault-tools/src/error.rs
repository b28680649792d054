//! Error types for vault-tools

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] vault_fs::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Registry error for {tool}: {message}")]
    Registry { tool: String, message: String },

    #[error("Synthesized settings for {tool} are not a JSON object")]
    InvalidPatch { tool: String },
}
