//! Convention-based discovery for projects without a usable tsconfig.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    core::{CancellationToken, corelib::dedupe_corelib},
    error::{ListError, Result},
    fs::FileSystem,
    utils::{ends_with_ignore_case, starts_with_ignore_case},
};

/// Directories scanned, relative to the project root.
pub const LEGACY_DIRECTORIES: &[&[&str]] = &[
    &["Modules"],
    &["Imports"],
    &["typings", "serenity"],
    &["wwwroot", "Scripts", "serenity"],
];

const DECLARATION_SUFFIX: &str = ".d.ts";

/// Declaration files whose name starts with one of these are kept.
const CORELIB_PREFIXES: &[&str] = &["Serenity.", "Serenity-"];

/// Collect `.ts` files from the conventional directories.
///
/// Declaration files are dropped unless they belong to the core library,
/// the core library duplicate is resolved, and the result is sorted by
/// full path (ordinal, case-sensitive).
pub fn discover_legacy_files(
    fs: &dyn FileSystem,
    project_dir: &Path,
    cancel: &CancellationToken,
) -> Result<Vec<PathBuf>> {
    cancel.check()?;

    let directories: Vec<PathBuf> = LEGACY_DIRECTORIES
        .iter()
        .map(|parts| fs.combine(project_dir, parts))
        .filter(|dir| fs.directory_exists(dir))
        .collect();

    debug!(count = directories.len(), "scanning legacy directories");
    cancel.check()?;

    let mut files = Vec::new();
    for dir in &directories {
        let found = fs
            .get_files(dir, &["ts"], true)
            .map_err(|err| ListError::io(dir, err))?;
        files.extend(found);
    }

    cancel.check()?;

    files.retain(|file| is_legacy_source(fs, file));
    let mut files = dedupe_corelib(fs, files);
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

    info!(count = files.len(), "resolved files from legacy layout");
    Ok(files)
}

/// Plain `.ts` files always qualify; `.d.ts` files only for the core library.
pub fn is_legacy_source(fs: &dyn FileSystem, path: &Path) -> bool {
    if !ends_with_ignore_case(&path.to_string_lossy(), DECLARATION_SUFFIX) {
        return true;
    }
    fs.file_name(path).is_some_and(|name| {
        CORELIB_PREFIXES
            .iter()
            .any(|prefix| starts_with_ignore_case(&name, prefix))
    })
}
