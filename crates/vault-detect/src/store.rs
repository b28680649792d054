//! Document store capability port
//!
//! Detection and inference never touch the filesystem directly; they go
//! through this port so the core can be unit-tested without a live host,
//! and so the vault's access boundary is enforced in one place.

use std::fs;

use vault_fs::{io, NormalizedPath};

use crate::error::{Error, Result};

/// Read access to the vault's documents and folders.
///
/// All paths are absolute. Implementations refuse paths outside the vault
/// root; the unreachable-parent topology case surfaces as `OutsideVault`
/// and callers degrade to scanning the vault root instead.
pub trait DocumentStore {
    /// Absolute path of the vault root.
    fn vault_root(&self) -> &NormalizedPath;

    /// Names of the immediate subfolders of `dir`, sorted.
    fn list_subfolders(&self, dir: &NormalizedPath) -> Result<Vec<String>>;

    /// Markdown files under `dir`, recursively, sorted.
    fn list_markdown_files(&self, dir: &NormalizedPath) -> Result<Vec<NormalizedPath>>;

    /// Text content of a file.
    fn read_text(&self, file: &NormalizedPath) -> Result<String>;

    /// Whether `path` exists and is a directory reachable through the vault.
    fn is_dir(&self, path: &NormalizedPath) -> bool;
}

/// Filesystem-backed store rooted at the vault directory.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    vault_root: NormalizedPath,
}

impl FsDocumentStore {
    pub fn new(vault_root: impl Into<NormalizedPath>) -> Self {
        Self {
            vault_root: vault_root.into(),
        }
    }

    fn check_inside(&self, path: &NormalizedPath) -> Result<()> {
        if path.starts_with(&self.vault_root) {
            Ok(())
        } else {
            Err(Error::OutsideVault {
                path: path.to_native(),
            })
        }
    }

    fn collect_markdown(&self, dir: &NormalizedPath, out: &mut Vec<NormalizedPath>) -> Result<()> {
        let entries =
            fs::read_dir(dir.to_native()).map_err(|e| vault_fs::Error::io(dir.to_native(), e))?;
        for entry in entries {
            let entry = entry.map_err(|e| vault_fs::Error::io(dir.to_native(), e))?;
            let path = NormalizedPath::new(entry.path());
            let file_type = entry
                .file_type()
                .map_err(|e| vault_fs::Error::io(entry.path(), e))?;
            if file_type.is_dir() {
                self.collect_markdown(&path, out)?;
            } else if path.extension() == Some("md") {
                out.push(path);
            }
        }
        Ok(())
    }
}

impl DocumentStore for FsDocumentStore {
    fn vault_root(&self) -> &NormalizedPath {
        &self.vault_root
    }

    fn list_subfolders(&self, dir: &NormalizedPath) -> Result<Vec<String>> {
        self.check_inside(dir)?;
        let entries =
            fs::read_dir(dir.to_native()).map_err(|e| vault_fs::Error::io(dir.to_native(), e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| vault_fs::Error::io(dir.to_native(), e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| vault_fs::Error::io(entry.path(), e))?;
            if file_type.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn list_markdown_files(&self, dir: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
        self.check_inside(dir)?;
        let mut files = Vec::new();
        self.collect_markdown(dir, &mut files)?;
        files.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(files)
    }

    fn read_text(&self, file: &NormalizedPath) -> Result<String> {
        self.check_inside(file)?;
        Ok(io::read_text(file)?)
    }

    fn is_dir(&self, path: &NormalizedPath) -> bool {
        path.starts_with(&self.vault_root) && path.is_dir()
    }
}
