//! Entry point of the library: discover a project's source files and list
//! the types they declare.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    core::{
        AstTypeExtractor, CancellationToken, ExternalType, ModulePosture, TypeExtractor,
        legacy::discover_legacy_files, resolver::resolve_config,
    },
    error::{ListError, Result},
    fs::FileSystem,
};

/// How the file set was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryStrategy {
    /// From `tsconfig.json` (and `Modules/tsconfig.json`).
    Config,
    /// From the conventional directory layout.
    Legacy,
}

impl fmt::Display for DiscoveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryStrategy::Config => write!(f, "tsconfig"),
            DiscoveryStrategy::Legacy => write!(f, "legacy"),
        }
    }
}

/// Files selected for extraction, before any parsing happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub posture: ModulePosture,
    pub strategy: DiscoveryStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeListing {
    pub has_modules: bool,
    pub has_namespaces: bool,
    pub types: Vec<ExternalType>,
}

/// Lists the client-side types of one project.
///
/// Every call re-reads the file system; nothing is cached between calls.
pub struct TypeLister {
    fs: Arc<dyn FileSystem>,
    project_dir: PathBuf,
    cancel: CancellationToken,
}

impl TypeLister {
    /// `project_dir` is resolved to a full path through `fs`.
    pub fn new(fs: Arc<dyn FileSystem>, project_dir: impl AsRef<Path>) -> Self {
        let project_dir = fs.full_path(project_dir.as_ref());
        Self {
            fs,
            project_dir,
            cancel: CancellationToken::new(),
        }
    }

    pub fn builder() -> TypeListerBuilder {
        TypeListerBuilder::default()
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Resolve the file set and module posture without extracting types.
    pub fn discover(&self) -> Result<Discovery> {
        self.cancel.check()?;

        let resolution = resolve_config(self.fs.as_ref(), &self.project_dir, &self.cancel)?;
        let posture = resolution.posture.finish();

        if resolution.has_files() {
            let files = resolution.files.unwrap_or_default();
            info!(count = files.len(), "using tsconfig file set");
            return Ok(Discovery {
                files,
                posture,
                strategy: DiscoveryStrategy::Config,
            });
        }

        debug!("no tsconfig file set, falling back to legacy layout");
        let files = discover_legacy_files(self.fs.as_ref(), &self.project_dir, &self.cancel)?;
        Ok(Discovery {
            files,
            posture,
            strategy: DiscoveryStrategy::Legacy,
        })
    }

    /// List types with the swc based extractor.
    pub fn list(&self) -> Result<TypeListing> {
        let mut extractor = AstTypeExtractor::new(self.fs.clone(), &self.project_dir);
        self.list_with(&mut extractor)
    }

    /// List types with a caller supplied extractor.
    pub fn list_with<E: TypeExtractor>(&self, extractor: &mut E) -> Result<TypeListing> {
        let discovery = self.discover()?;

        for file in &discovery.files {
            extractor.add_input_file(file);
        }

        self.cancel.check()?;
        let types = extractor.extract_types(&self.cancel)?;

        info!(
            files = discovery.files.len(),
            types = types.len(),
            strategy = %discovery.strategy,
            "listed types"
        );
        Ok(TypeListing {
            has_modules: discovery.posture.has_modules,
            has_namespaces: discovery.posture.has_namespaces,
            types,
        })
    }
}

#[derive(Default)]
pub struct TypeListerBuilder {
    fs: Option<Arc<dyn FileSystem>>,
    project_dir: Option<PathBuf>,
    cancel: Option<CancellationToken>,
}

impl TypeListerBuilder {
    pub fn file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = Some(fs);
        self
    }

    pub fn project_dir(mut self, project_dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(project_dir.into());
        self
    }

    pub fn cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Fails with [`ListError::MissingFileSystem`] when no file system was set.
    /// The project directory defaults to the current directory.
    pub fn build(self) -> Result<TypeLister> {
        let fs = self.fs.ok_or(ListError::MissingFileSystem)?;
        let project_dir = self.project_dir.unwrap_or_else(|| PathBuf::from("."));
        let lister = TypeLister::new(fs, project_dir);
        Ok(match self.cancel {
            Some(cancel) => lister.with_cancellation(cancel),
            None => lister,
        })
    }
}
