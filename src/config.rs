//! `tsconfig.json` reading and file enumeration.
//!
//! Only the parts of a tsconfig that decide which files belong to the
//! project are modelled: `compilerOptions.module`, `compilerOptions.outDir`,
//! `files`, `include`, `exclude` and `extends`.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use glob::{MatchOptions, Pattern};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    core::{CancellationToken, ModuleMode},
    error::{ListError, Result},
    fs::{FileSystem, normalize_path},
    utils::to_slash,
};

pub const TS_CONFIG_FILE_NAME: &str = "tsconfig.json";

/// Extensions enumerated for `include` patterns.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx"];

const DEFAULT_INCLUDE: &str = "**/*";

const DEFAULT_EXCLUDES: &[&str] = &["node_modules", "bower_components", "jspm_packages"];

/// Guards against `extends` cycles.
const MAX_EXTENDS_DEPTH: usize = 8;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub out_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    /// Directory holding the config file; `extends` and `outDir` resolve
    /// against it.
    #[serde(skip)]
    pub base_dir: PathBuf,
    #[serde(skip)]
    pub path: PathBuf,
    /// `outDir` made absolute against the config that declared it.
    #[serde(skip)]
    pub out_dir_path: Option<PathBuf>,
}

impl TsConfig {
    pub fn module_mode(&self) -> ModuleMode {
        ModuleMode::from_field(
            self.compiler_options
                .as_ref()
                .and_then(|options| options.module.as_deref()),
        )
    }

    fn out_dir(&self) -> Option<&str> {
        self.compiler_options
            .as_ref()
            .and_then(|options| options.out_dir.as_deref())
    }

    /// Fill `module` and `outDir` from the base config when this config
    /// leaves them unset. The base `outDir` keeps its own resolution.
    fn inherit_from(&mut self, base: TsConfig) {
        if self.out_dir_path.is_none() {
            self.out_dir_path = base.out_dir_path;
        }
        let Some(base_options) = base.compiler_options else {
            return;
        };
        let options = self.compiler_options.get_or_insert_with(Default::default);
        if options.module.is_none() {
            options.module = base_options.module;
        }
    }

    /// Include patterns in effect: `["**/*"]` when neither `files` nor
    /// `include` is given.
    pub fn effective_includes(&self) -> Vec<String> {
        match (&self.include, &self.files) {
            (Some(include), _) => include.clone(),
            (None, None) => vec![DEFAULT_INCLUDE.to_string()],
            (None, Some(_)) => Vec::new(),
        }
    }

    /// Exclude patterns in effect: the package manager directories when
    /// `exclude` is not given. `outDir` is handled by path, see
    /// [`TsConfig::is_in_out_dir`].
    pub fn effective_excludes(&self) -> Vec<String> {
        match &self.exclude {
            Some(exclude) => exclude.clone(),
            None => DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Whether `path` lies under `outDir`; only applies without `exclude`.
    fn is_in_out_dir(&self, path: &Path) -> bool {
        self.exclude.is_none()
            && self
                .out_dir_path
                .as_ref()
                .is_some_and(|out_dir| path.starts_with(out_dir))
    }

    /// Enumerate the absolute paths of the files this config selects.
    ///
    /// `files`, `include` and `exclude` resolve against `base_dir`, which
    /// is the project root for both the root and the `Modules` config.
    /// `files` entries come first, then files matched by `include` in
    /// enumeration order. Duplicates are dropped.
    pub fn list_files(
        &self,
        fs: &dyn FileSystem,
        base_dir: &Path,
        cancel: &CancellationToken,
    ) -> Result<Vec<PathBuf>> {
        cancel.check()?;

        let mut files = Vec::new();
        let mut seen = HashSet::new();

        for file in self.files.iter().flatten() {
            let path = normalize_path(&base_dir.join(file));
            if fs.file_exists(&path) {
                if seen.insert(path.clone()) {
                    files.push(path);
                }
            } else {
                debug!(config = %self.path.display(), file = %file, "listed file does not exist");
            }
        }

        let includes = self.compile_patterns(&self.effective_includes(), true)?;
        if includes.is_empty() || !fs.directory_exists(base_dir) {
            return Ok(files);
        }
        let excludes = self.compile_patterns(&self.effective_excludes(), false)?;

        cancel.check()?;

        let candidates = fs
            .get_files(base_dir, SOURCE_EXTENSIONS, true)
            .map_err(|err| ListError::io(base_dir, err))?;

        for candidate in candidates {
            let Ok(relative) = candidate.strip_prefix(base_dir) else {
                continue;
            };
            let relative = to_slash(relative);
            if is_excluded(&relative, &excludes) || self.is_in_out_dir(&candidate) {
                continue;
            }
            if includes
                .iter()
                .any(|pattern| pattern.matches_with(&relative, MATCH_OPTIONS))
                && seen.insert(candidate.clone())
            {
                files.push(candidate);
            }
        }

        debug!(config = %self.path.display(), count = files.len(), "listed config files");
        Ok(files)
    }

    fn compile_patterns(&self, patterns: &[String], include: bool) -> Result<Vec<Pattern>> {
        patterns
            .iter()
            .map(|raw| {
                let normalized = normalize_pattern(raw, include);
                Pattern::new(&normalized).map_err(|err| ListError::InvalidPattern {
                    config: self.path.clone(),
                    pattern: raw.clone(),
                    message: err.msg.to_string(),
                })
            })
            .collect()
    }
}

/// Strip `./`, trailing slashes, and turn directory-like include entries
/// (no wildcard and no extension in the last segment) into `dir/**/*`.
fn normalize_pattern(raw: &str, include: bool) -> String {
    let mut pattern = raw.replace('\\', "/");
    while let Some(rest) = pattern.strip_prefix("./") {
        pattern = rest.to_string();
    }
    let pattern = pattern.trim_end_matches('/').to_string();
    if pattern.is_empty() {
        return DEFAULT_INCLUDE.to_string();
    }

    let last = pattern.rsplit('/').next().unwrap_or(&pattern);
    let is_wildcard = last.contains('*') || last.contains('?');
    if include && !is_wildcard && !last.contains('.') {
        format!("{pattern}/**/*")
    } else {
        pattern
    }
}

/// A path is excluded when it, or one of its parent directories, matches.
fn is_excluded(relative: &str, excludes: &[Pattern]) -> bool {
    if excludes.is_empty() {
        return false;
    }
    let mut prefix_end = 0;
    loop {
        let candidate = match relative[prefix_end..].find('/') {
            Some(offset) => {
                prefix_end += offset;
                let candidate = &relative[..prefix_end];
                prefix_end += 1;
                candidate
            }
            None => relative,
        };
        if excludes
            .iter()
            .any(|pattern| pattern.matches_with(candidate, MATCH_OPTIONS))
        {
            return true;
        }
        if candidate.len() == relative.len() {
            return false;
        }
    }
}

/// Read the tsconfig at `path`.
///
/// A missing, unreadable or unparsable file yields `None`; it is never an
/// error. `extends` chains contribute their compiler options.
pub fn read_ts_config(fs: &dyn FileSystem, path: &Path) -> Option<TsConfig> {
    read_with_depth(fs, path, 0)
}

fn read_with_depth(fs: &dyn FileSystem, path: &Path, depth: usize) -> Option<TsConfig> {
    if !fs.file_exists(path) {
        debug!(path = %path.display(), "no tsconfig");
        return None;
    }

    let content = match fs.read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read tsconfig, treating as absent");
            return None;
        }
    };

    let mut config = match parse_ts_config(&content) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot parse tsconfig, treating as absent");
            return None;
        }
    };

    config.path = path.to_path_buf();
    config.base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    config.out_dir_path = config
        .out_dir()
        .map(|out_dir| normalize_path(&config.base_dir.join(out_dir)));

    if let Some(extends) = config.extends.clone() {
        if depth >= MAX_EXTENDS_DEPTH {
            warn!(path = %path.display(), "tsconfig extends chain too deep, ignoring base");
        } else if let Some(base_path) = resolve_extends(fs, &config.base_dir, &extends)
            && let Some(base) = read_with_depth(fs, &base_path, depth + 1)
        {
            config.inherit_from(base);
        } else {
            debug!(path = %path.display(), extends = %extends, "tsconfig base not found");
        }
    }

    Some(config)
}

/// Parse tsconfig text, which may contain comments and trailing commas.
pub fn parse_ts_config(content: &str) -> serde_json::Result<TsConfig> {
    let json = strip_trailing_commas(&strip_json_comments(content));
    serde_json::from_str(&json)
}

fn resolve_extends(fs: &dyn FileSystem, base_dir: &Path, extends: &str) -> Option<PathBuf> {
    let is_relative = extends.starts_with('.') || Path::new(extends).is_absolute();
    let target = if is_relative {
        normalize_path(&base_dir.join(extends))
    } else {
        base_dir.join("node_modules").join(extends)
    };

    let mut candidates = vec![target.clone()];
    if !extends.ends_with(".json") {
        candidates.push(target.with_file_name(format!(
            "{}.json",
            target
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        )));
        candidates.push(target.join(TS_CONFIG_FILE_NAME));
    }

    candidates.into_iter().find(|candidate| fs.file_exists(candidate))
}

/// Replace `//` and `/* */` comments outside string literals with spaces.
pub fn strip_json_comments(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            output.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        output.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                output.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        output.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        output.push('\n');
                    }
                    prev = next;
                }
                output.push(' ');
            }
            _ => output.push(c),
        }
    }

    output
}

/// Drop commas that directly precede a closing `}` or `]`.
pub fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut output = String::with_capacity(input.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            output.push(c);
            if c == '\\' {
                if let Some(&escaped) = chars.get(i + 1) {
                    output.push(escaped);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            output.push(c);
        } else if c == ',' {
            let next = chars[i + 1..].iter().copied().find(|ch| !ch.is_whitespace());
            if !matches!(next, Some('}') | Some(']')) {
                output.push(c);
            }
        } else {
            output.push(c);
        }
        i += 1;
    }

    output
}
