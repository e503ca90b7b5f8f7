//! Config-driven file resolution.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    config::{TS_CONFIG_FILE_NAME, read_ts_config},
    core::{CancellationToken, ModulePosture},
    error::Result,
    fs::FileSystem,
};

/// Directory probed for a secondary tsconfig in namespace-style projects.
pub const MODULES_DIR: &str = "Modules";

/// Outcome of reading the project's tsconfig files.
#[derive(Debug, Default)]
pub struct ConfigResolution {
    /// `None` when the project has no root tsconfig.
    pub files: Option<Vec<PathBuf>>,
    /// Flags contributed by the configs; the closing rule is not applied yet.
    pub posture: ModulePosture,
}

impl ConfigResolution {
    /// Whether the configs produced at least one file.
    pub fn has_files(&self) -> bool {
        self.files.as_ref().is_some_and(|files| !files.is_empty())
    }
}

/// Read `<project>/tsconfig.json` and, for namespace-style roots,
/// `<project>/Modules/tsconfig.json`.
///
/// Both configs' `files`/`include`/`exclude` rules resolve against the
/// project root. The secondary config's files are appended to the root's
/// with duplicates removed; the resulting order is not sorted.
pub fn resolve_config(
    fs: &dyn FileSystem,
    project_dir: &Path,
    cancel: &CancellationToken,
) -> Result<ConfigResolution> {
    let mut posture = ModulePosture::default();

    let root_path = fs.combine(project_dir, &[TS_CONFIG_FILE_NAME]);
    let Some(root) = read_ts_config(fs, &root_path) else {
        return Ok(ConfigResolution {
            files: None,
            posture,
        });
    };

    let root_mode = root.module_mode();
    debug!(path = %root_path.display(), mode = ?root_mode, "read root tsconfig");
    posture.absorb(&root_mode);

    let mut files = root.list_files(fs, project_dir, cancel)?;

    if root_mode.is_namespace_style() {
        let modules_path = fs.combine(project_dir, &[MODULES_DIR, TS_CONFIG_FILE_NAME]);
        if let Some(modules) = read_ts_config(fs, &modules_path) {
            let modules_mode = modules.module_mode();
            debug!(path = %modules_path.display(), mode = ?modules_mode, "read modules tsconfig");
            posture.absorb(&modules_mode);

            let module_files = modules.list_files(fs, project_dir, cancel)?;
            append_distinct(&mut files, module_files);
        }
    }

    info!(count = files.len(), "resolved files from tsconfig");
    Ok(ConfigResolution {
        files: Some(files),
        posture,
    })
}

fn append_distinct(files: &mut Vec<PathBuf>, extra: Vec<PathBuf>) {
    let mut seen: HashSet<PathBuf> = files.iter().cloned().collect();
    for file in extra {
        if seen.insert(file.clone()) {
            files.push(file);
        }
    }
}
