//! Normalized path handling for cross-platform comparison

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// All comparison and relativization happens on the normalized form;
/// conversion to the platform-native format only occurs at I/O boundaries.
/// Windows- and POSIX-style inputs therefore behave identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes, collapses duplicate
    /// separators, and strips a trailing slash (except for the root).
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether this path is absolute (POSIX root or Windows drive prefix).
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/') || has_drive_prefix(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        if self.inner.is_empty() {
            return Self { inner: clean(&segment) };
        }
        Self {
            inner: clean(&format!("{}/{}", self.inner, segment)),
        }
    }

    /// Get the parent directory, or `None` at a filesystem root.
    pub fn parent(&self) -> Option<Self> {
        if self.inner == "/" || has_drive_prefix(&self.inner) && self.inner.len() <= 3 {
            return None;
        }
        match self.inner.rfind('/') {
            Some(0) => Some(Self { inner: "/".to_string() }),
            Some(idx) => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.rsplit('/').next().filter(|s| !s.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Path segments, skipping empty components and a drive prefix.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner
            .split('/')
            .filter(|s| !s.is_empty() && !has_drive_prefix(s))
    }

    /// Whether `self` is `base` or a descendant of `base`.
    pub fn starts_with(&self, base: &NormalizedPath) -> bool {
        if self.inner == base.inner {
            return true;
        }
        let prefix = if base.inner.ends_with('/') {
            base.inner.clone()
        } else {
            format!("{}/", base.inner)
        };
        self.inner.starts_with(&prefix)
    }

    /// Compute the path of `self` relative to `base`.
    ///
    /// Descendants produce a plain relative path. Non-descendants produce a
    /// "climb up N levels, then descend" path using `../` segments when the
    /// two share a common ancestor. Returns `None` when no relative form
    /// exists (mixed absolute/relative inputs, or different drive roots);
    /// callers fall back to the original value unchanged.
    pub fn relative_to(&self, base: &NormalizedPath) -> Option<NormalizedPath> {
        if self.inner == base.inner {
            return Some(NormalizedPath { inner: String::new() });
        }
        if self.starts_with(base) {
            let skip = if base.inner.ends_with('/') {
                base.inner.len()
            } else {
                base.inner.len() + 1
            };
            return Some(NormalizedPath {
                inner: self.inner[skip..].to_string(),
            });
        }

        if self.is_absolute() != base.is_absolute() {
            return None;
        }
        if root_of(&self.inner) != root_of(&base.inner) {
            return None;
        }

        let target: Vec<&str> = self.segments().collect();
        let from: Vec<&str> = base.segments().collect();
        let common = target
            .iter()
            .zip(from.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = Vec::new();
        for _ in common..from.len() {
            parts.push("..");
        }
        parts.extend(&target[common..]);
        Some(NormalizedPath {
            inner: parts.join("/"),
        })
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Whether this path is empty (the relative "here").
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Collapse duplicate separators, drop `.` segments, strip trailing slash.
fn clean(s: &str) -> String {
    let absolute = s.starts_with('/');
    let mut out: Vec<&str> = Vec::new();
    for seg in s.split('/') {
        if seg.is_empty() || seg == "." {
            continue;
        }
        out.push(seg);
    }
    let joined = out.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

fn has_drive_prefix(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// The root portion used to decide whether two absolute paths are comparable.
fn root_of(s: &str) -> &str {
    if has_drive_prefix(s) { &s[..2] } else if s.starts_with('/') { "/" } else { "" }
}

// Serializes as the forward-slash string form.
impl serde::Serialize for NormalizedPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for NormalizedPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NormalizedPath::new(s))
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
