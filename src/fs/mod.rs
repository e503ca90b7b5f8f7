//! File system access used by discovery and extraction.
//!
//! Discovery never touches the disk directly; it goes through the
//! [`FileSystem`] trait so the same code runs against the real disk
//! ([`PhysicalFileSystem`]) or an in-memory fixture ([`MemoryFileSystem`]).
//!
//! ## Module Structure
//!
//! - `physical`: `std::fs` + `walkdir` backed implementation
//! - `memory`: in-memory implementation that records the calls it receives

mod memory;
mod physical;

use std::{
    io,
    path::{Component, Path, PathBuf},
};

pub use memory::{FsCall, MemoryFileSystem};
pub use physical::PhysicalFileSystem;

/// Read-only file system operations required by the type lister.
///
/// Implementations must be safe to call repeatedly and from whichever
/// thread runs the listing.
pub trait FileSystem: Send + Sync {
    /// Join `parts` onto `base`.
    fn combine(&self, base: &Path, parts: &[&str]) -> PathBuf {
        parts.iter().fold(base.to_path_buf(), |acc, part| acc.join(part))
    }

    /// Resolve `path` to an absolute, lexically normalized path.
    fn full_path(&self, path: &Path) -> PathBuf;

    fn directory_exists(&self, path: &Path) -> bool;

    fn file_exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// List files under `dir` whose extension is one of `extensions`.
    ///
    /// Extensions are given without the leading dot and compared
    /// case-insensitively. Results come back in a stable order.
    fn get_files(&self, dir: &Path, extensions: &[&str], recursive: bool)
    -> io::Result<Vec<PathBuf>>;

    /// File name component of `path`, if any.
    fn file_name(&self, path: &Path) -> Option<String> {
        path.file_name().map(|name| name.to_string_lossy().into_owned())
    }
}

/// Remove `.` components and fold `..` components without touching the disk.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Whether `path` has one of `extensions` (case-insensitive, no leading dot).
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crate::fs::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/proj/./Modules/../Imports/a.ts")),
            PathBuf::from("/proj/Imports/a.ts")
        );
        assert_eq!(normalize_path(Path::new("/proj/.")), PathBuf::from("/proj"));
        assert_eq!(normalize_path(Path::new("../a")), PathBuf::from("../a"));
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a.ts"), &["ts"]));
        assert!(has_extension(Path::new("A.TS"), &["ts"]));
        assert!(has_extension(Path::new("a.d.ts"), &["ts"]));
        assert!(has_extension(Path::new("a.tsx"), &["ts", "tsx"]));
        assert!(!has_extension(Path::new("a.tsx"), &["ts"]));
        assert!(!has_extension(Path::new("a.js"), &["ts"]));
        assert!(!has_extension(Path::new("ts"), &["ts"]));
    }

    #[test]
    fn test_default_combine_and_file_name() {
        let fs = MemoryFileSystem::new();
        let combined = fs.combine(Path::new("/proj"), &["typings", "serenity"]);
        assert_eq!(combined, PathBuf::from("/proj/typings/serenity"));
        assert_eq!(
            fs.file_name(Path::new("/proj/a/Serenity.CoreLib.d.ts")),
            Some("Serenity.CoreLib.d.ts".to_string())
        );
        assert_eq!(fs.file_name(Path::new("/")), None);
    }
}
