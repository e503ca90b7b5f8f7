use std::{
    fs, io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use super::{FileSystem, has_extension, normalize_path};

/// [`FileSystem`] backed by the real disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicalFileSystem;

impl PhysicalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for PhysicalFileSystem {
    fn full_path(&self, path: &Path) -> PathBuf {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        normalize_path(&absolute)
    }

    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn get_files(
        &self,
        dir: &Path,
        extensions: &[&str],
        recursive: bool,
    ) -> io::Result<Vec<PathBuf>> {
        let mut walker = WalkDir::new(dir).sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}
