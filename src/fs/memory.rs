use std::{
    collections::{BTreeMap, BTreeSet},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use super::{FileSystem, has_extension, normalize_path};

/// A file system call observed by [`MemoryFileSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    DirectoryExists(PathBuf),
    FileExists(PathBuf),
    ReadFile(PathBuf),
    GetFiles(PathBuf),
}

/// In-memory [`FileSystem`] fixture.
///
/// Relative paths are resolved against `/`. Every directory that is an
/// ancestor of a stored file exists implicitly; empty directories can be
/// added with [`MemoryFileSystem::with_dir`].
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    calls: Mutex<Vec<FsCall>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = self.resolve(path.as_ref());
        self.dirs.insert(path);
        self
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = self.resolve(path.as_ref());
        self.files.insert(path, content.into());
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<FsCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear_calls(&self) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    fn record(&self, call: FsCall) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize_path(path)
        } else {
            normalize_path(&Path::new("/").join(path))
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn full_path(&self, path: &Path) -> PathBuf {
        self.resolve(path)
    }

    fn directory_exists(&self, path: &Path) -> bool {
        let path = self.resolve(path);
        self.record(FsCall::DirectoryExists(path.clone()));

        self.dirs.iter().any(|dir| dir.starts_with(&path))
            || self
                .files
                .keys()
                .any(|file| file != &path && file.starts_with(&path))
    }

    fn file_exists(&self, path: &Path) -> bool {
        let path = self.resolve(path);
        self.record(FsCall::FileExists(path.clone()));
        self.files.contains_key(&path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let path = self.resolve(path);
        self.record(FsCall::ReadFile(path.clone()));
        self.files.get(&path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
        })
    }

    fn get_files(
        &self,
        dir: &Path,
        extensions: &[&str],
        recursive: bool,
    ) -> io::Result<Vec<PathBuf>> {
        let dir = self.resolve(dir);
        self.record(FsCall::GetFiles(dir.clone()));

        Ok(self
            .files
            .keys()
            .filter(|file| file.starts_with(&dir) && *file != &dir)
            .filter(|file| recursive || file.parent() == Some(dir.as_path()))
            .filter(|file| has_extension(file, extensions))
            .cloned()
            .collect())
    }
}
