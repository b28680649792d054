//! Error types for vault-detect

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] vault_fs::Error),

    #[error("Path {path} is outside the vault root")]
    OutsideVault { path: PathBuf },
}
