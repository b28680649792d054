//! Project marker files, as an ordered strategy table
//!
//! Evaluated directory by directory during the upward walk. Root-level
//! markers come before the nested fallback marker, so within any one
//! directory a root config always wins over `src/config.ts`.

/// Where a marker sits relative to the directory being inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Marker file directly in the candidate project root.
    Root,
    /// Fallback marker nested under the candidate root.
    Nested,
}

/// One known project marker.
#[derive(Debug, Clone, Copy)]
pub struct ProjectMarker {
    /// Path relative to the candidate project root.
    pub file: &'static str,
    pub kind: MarkerKind,
}

/// Ordered marker list. `.mjs` is preferred among root configs.
pub const PROJECT_MARKERS: &[ProjectMarker] = &[
    ProjectMarker { file: "astro.config.mjs", kind: MarkerKind::Root },
    ProjectMarker { file: "astro.config.ts", kind: MarkerKind::Root },
    ProjectMarker { file: "astro.config.js", kind: MarkerKind::Root },
    ProjectMarker { file: "astro.config.mts", kind: MarkerKind::Root },
    ProjectMarker { file: "astro.config.cjs", kind: MarkerKind::Root },
    ProjectMarker { file: "src/config.ts", kind: MarkerKind::Nested },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_markers_precede_nested() {
        let first_nested = PROJECT_MARKERS
            .iter()
            .position(|m| m.kind == MarkerKind::Nested)
            .unwrap();
        assert!(PROJECT_MARKERS[..first_nested]
            .iter()
            .all(|m| m.kind == MarkerKind::Root));
        assert_eq!(first_nested, PROJECT_MARKERS.len() - 1);
    }

    #[test]
    fn test_mjs_is_preferred() {
        assert_eq!(PROJECT_MARKERS[0].file, "astro.config.mjs");
    }
}
