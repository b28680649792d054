//! Upward project detection and vault-location classification

use tracing::debug;

use vault_fs::resolve::CONTENT_DIR;
use vault_fs::{NormalizedPath, ProjectTopology, VaultLocation};

use crate::markers::PROJECT_MARKERS;

/// Detects the adjacent static-site project by walking upward from the
/// vault root, then classifies where the vault sits relative to the
/// project's content directory.
#[derive(Debug, Default)]
pub struct ProjectDetector;

impl ProjectDetector {
    pub fn new() -> Self {
        Self
    }

    /// Walk upward from the vault root looking for a project marker.
    ///
    /// Single pass: both marker kinds are checked at each directory, root
    /// markers first, so the nearest project wins. `None` means no project
    /// was found and the wizard must fall back to manual path entry; a root
    /// is never guessed.
    pub fn detect(&self, vault_root: &NormalizedPath) -> Option<ProjectTopology> {
        let start = dunce::canonicalize(vault_root.to_native())
            .map(NormalizedPath::new)
            .unwrap_or_else(|_| vault_root.clone());

        let mut current = Some(start.clone());
        while let Some(dir) = current {
            for marker in PROJECT_MARKERS {
                let candidate = dir.join(marker.file);
                if candidate.is_file() {
                    debug!(root = %dir, marker = marker.file, "project marker found");
                    return Some(ProjectTopology {
                        vault_location: classify_vault_location(&start, &dir),
                        project_root: dir,
                        config_file: candidate,
                    });
                }
            }
            current = dir.parent();
        }

        debug!(vault = %start, "no project marker found");
        None
    }
}

/// Classify the vault root against the project's content directory.
///
/// `src/content` exactly is `Content`; anything deeper under `src/content`
/// is `NestedContent` (the parent content directory is outside the vault's
/// file access); everything else, including a vault outside the project,
/// is `Root`.
pub fn classify_vault_location(
    vault_root: &NormalizedPath,
    project_root: &NormalizedPath,
) -> VaultLocation {
    let Some(rel) = vault_root.relative_to(project_root) else {
        return VaultLocation::Root;
    };
    if rel.segments().any(|s| s == "..") {
        return VaultLocation::Root;
    }
    let rel_lower = rel.as_str().to_lowercase();
    if rel_lower == CONTENT_DIR {
        VaultLocation::Content
    } else if rel_lower.starts_with(&format!("{CONTENT_DIR}/")) {
        VaultLocation::NestedContent
    } else {
        VaultLocation::Root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn site_with(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src/content/posts")).unwrap();
        if let Some(parent) = root.join(config).parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(root.join(config), "export default {};").unwrap();
        temp
    }

    #[rstest]
    #[case("astro.config.mjs")]
    #[case("astro.config.ts")]
    #[case("src/config.ts")]
    fn test_detects_marker_from_nested_vault(#[case] config: &str) {
        let temp = site_with(config);
        let vault = NormalizedPath::new(temp.path().join("src/content"));

        let topo = ProjectDetector::new().detect(&vault).unwrap();
        assert_eq!(topo.project_root, NormalizedPath::new(temp.path()));
        assert_eq!(topo.config_file.file_name(), NormalizedPath::new(config).file_name());
        assert_eq!(topo.vault_location, VaultLocation::Content);
    }

    #[test]
    fn test_prefers_root_marker_within_directory() {
        let temp = site_with("astro.config.ts");
        fs::write(temp.path().join("astro.config.mjs"), "export default {};").unwrap();
        fs::write(temp.path().join("src/config.ts"), "export const x = 1;").unwrap();

        let vault = NormalizedPath::new(temp.path().join("src/content"));
        let topo = ProjectDetector::new().detect(&vault).unwrap();
        assert_eq!(topo.config_file.file_name(), Some("astro.config.mjs"));
    }

    #[test]
    fn test_no_marker_reports_none() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("notes")).unwrap();
        let vault = NormalizedPath::new(temp.path().join("notes"));
        assert!(ProjectDetector::new().detect(&vault).is_none());
    }

    #[rstest]
    #[case("src/content", VaultLocation::Content)]
    #[case("src/content/posts", VaultLocation::NestedContent)]
    #[case("src", VaultLocation::Root)]
    #[case("", VaultLocation::Root)]
    fn test_classification(#[case] rel: &str, #[case] expected: VaultLocation) {
        let project = NormalizedPath::new("/site");
        let vault = if rel.is_empty() {
            project.clone()
        } else {
            project.join(rel)
        };
        assert_eq!(classify_vault_location(&vault, &project), expected);
    }

    #[test]
    fn test_vault_outside_project_is_root() {
        let project = NormalizedPath::new("/site");
        let vault = NormalizedPath::new("/elsewhere/vault");
        assert_eq!(classify_vault_location(&vault, &project), VaultLocation::Root);
    }
}
