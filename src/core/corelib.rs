//! Duplicate core library declaration handling.
//!
//! `Serenity.CoreLib.d.ts` ships in `typings/serenity` but projects often
//! carry an overriding copy somewhere else. When both are discovered the
//! override wins; redundant canonical copies are tolerated.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    fs::FileSystem,
    utils::{ends_with_ignore_case, to_slash},
};

pub const CORELIB_FILE_NAME: &str = "Serenity.CoreLib.d.ts";

const CANONICAL_CORELIB_SUFFIX: &str = "/typings/serenity/Serenity.CoreLib.d.ts";

/// Whether `path` is the core library at its canonical typings location.
pub fn is_canonical_corelib(path: &Path) -> bool {
    ends_with_ignore_case(&to_slash(path), CANONICAL_CORELIB_SUFFIX)
}

fn is_corelib(fs: &dyn FileSystem, path: &Path) -> bool {
    fs.file_name(path)
        .is_some_and(|name| name.eq_ignore_ascii_case(CORELIB_FILE_NAME))
}

/// Drop canonical core library copies when an override is also present.
///
/// Filtering only happens when there is more than one copy and at least
/// one of them lives outside `typings/serenity`.
pub fn dedupe_corelib(fs: &dyn FileSystem, files: Vec<PathBuf>) -> Vec<PathBuf> {
    let has_override = {
        let copies: Vec<&PathBuf> = files.iter().filter(|file| is_corelib(fs, file)).collect();
        copies.len() > 1 && copies.iter().any(|copy| !is_canonical_corelib(copy))
    };

    if !has_override {
        return files;
    }

    debug!("core library override found, dropping typings/serenity copies");
    files
        .into_iter()
        .filter(|file| !is_canonical_corelib(file))
        .collect()
}
