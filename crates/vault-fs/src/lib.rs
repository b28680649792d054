//! Filesystem primitives for Vault Site Wizard
//!
//! Normalized cross-platform paths, the vault/project topology model, the
//! pure path resolver between vault-relative and project-relative
//! conventions, and safe atomic I/O.

pub mod error;
pub mod io;
pub mod layout;
pub mod path;
pub mod resolve;

pub use error::{Error, Result};
pub use layout::{ProjectTopology, VaultLocation};
pub use path::NormalizedPath;
