//! Path resolution between the three coordinate systems
//!
//! Converts between absolute filesystem paths, vault-relative paths, and
//! project-relative paths. Pure and stateless; the topology classification
//! from detection decides which convention a downstream tool receives.

use crate::layout::ProjectTopology;
use crate::NormalizedPath;

/// Content directory under the project root, per the static-site convention.
pub const CONTENT_DIR: &str = "src/content";

/// Absolute path of the project's content directory.
pub fn content_dir(project_root: &NormalizedPath) -> NormalizedPath {
    project_root.join(CONTENT_DIR)
}

/// Resolve a possibly-relative project root against the vault root.
pub fn resolve_project_root(topology: &ProjectTopology, vault_root: &NormalizedPath) -> NormalizedPath {
    if topology.project_root.is_absolute() {
        topology.project_root.clone()
    } else {
        to_absolute(vault_root, &topology.project_root)
    }
}

/// Convert `target` to a path relative to `base`.
///
/// Descendants yield a plain relative path; non-descendants yield a
/// `../`-climb path when one exists. When no relative form exists the
/// original value is returned unchanged so downstream synthesis stays
/// defensive instead of failing.
pub fn to_relative(base: &NormalizedPath, target: &NormalizedPath) -> NormalizedPath {
    target.relative_to(base).unwrap_or_else(|| target.clone())
}

/// Convert a relative path back to an absolute path under `base`.
///
/// Already-absolute inputs pass through unchanged. `..` segments in the
/// relative path are folded away against the base.
pub fn to_absolute(base: &NormalizedPath, relative: &NormalizedPath) -> NormalizedPath {
    if relative.is_absolute() {
        return relative.clone();
    }
    fold_dots(&base.join(relative.as_str()))
}

/// Fold `..` segments against their preceding components.
fn fold_dots(path: &NormalizedPath) -> NormalizedPath {
    let s = path.as_str();
    let absolute = s.starts_with('/');
    let mut out: Vec<&str> = Vec::new();
    for seg in s.split('/') {
        if seg.is_empty() {
            continue;
        }
        if seg == ".." && matches!(out.last(), Some(&last) if last != "..") {
            out.pop();
        } else {
            out.push(seg);
        }
    }
    let joined = out.join("/");
    if absolute {
        NormalizedPath::new(format!("/{joined}"))
    } else {
        NormalizedPath::new(joined)
    }
}

/// Folder path from the vault root to a content-type folder.
///
/// Used by tools that operate on vault file paths (CMS view filters,
/// composer folders, SEO scan directories). Per topology:
/// vault at src: `src/content/docs`; vault at src/content: `docs`;
/// vault inside src/content/posts: `../docs`.
///
/// Without a detected project the folder name passes through unchanged.
pub fn vault_relative_folder(
    folder: &str,
    topology: Option<&ProjectTopology>,
    vault_root: &NormalizedPath,
) -> NormalizedPath {
    let Some(topology) = topology else {
        return NormalizedPath::new(folder);
    };
    let project_root = resolve_project_root(topology, vault_root);
    let target = content_dir(&project_root).join(folder);
    match target.relative_to(vault_root) {
        Some(rel) => rel,
        None => NormalizedPath::new(folder),
    }
}

/// Folder path from the project root to a content-type folder.
///
/// Used by tools that operate on project source paths. Always
/// `src/content/<folder>`.
pub fn project_relative_folder(folder: &str) -> NormalizedPath {
    NormalizedPath::new(CONTENT_DIR).join(folder)
}
