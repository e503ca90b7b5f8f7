//! Type extraction from discovered source files.
//!
//! The lister hands files to a [`TypeExtractor`] one at a time, then asks
//! for the collected types. [`AstTypeExtractor`] parses each file with swc
//! and walks the AST with a [`TypeCollector`].

pub mod parser;
pub mod render;
pub mod types;
pub mod visitor;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use swc_common::SourceMap;
use tracing::{debug, warn};

use crate::{
    core::CancellationToken,
    error::Result,
    fs::FileSystem,
    utils::{ends_with_ignore_case, relative_display},
};

pub use parser::parse_ts_source;
pub use types::{
    ExternalArgument, ExternalEnumMember, ExternalMember, ExternalMethod, ExternalType, TypeKind,
};
pub use visitor::{TypeCollector, is_module_file};

pub trait TypeExtractor {
    fn add_input_file(&mut self, path: &Path);

    /// Produce the types declared in every added file, in file order and
    /// then source order.
    fn extract_types(&mut self, cancel: &CancellationToken) -> Result<Vec<ExternalType>>;
}

pub struct AstTypeExtractor {
    fs: Arc<dyn FileSystem>,
    project_dir: PathBuf,
    files: Vec<PathBuf>,
}

impl AstTypeExtractor {
    pub fn new(fs: Arc<dyn FileSystem>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            project_dir: project_dir.into(),
            files: Vec::new(),
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// `/Modules/Orders/OrderGrid` for `<project>/Modules/Orders/OrderGrid.ts`.
    pub fn module_path(&self, path: &Path) -> String {
        let relative = relative_display(path, &self.project_dir);
        let stem = [".d.ts", ".tsx", ".ts"]
            .iter()
            .find(|ext| ends_with_ignore_case(&relative, ext))
            .map_or(relative.as_str(), |ext| &relative[..relative.len() - ext.len()]);
        format!("/{}", stem.trim_start_matches('/'))
    }

    fn extract_file(&self, path: &Path) -> Option<Vec<ExternalType>> {
        let code = match self.fs.read_to_string(path) {
            Ok(code) => code,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable file");
                return None;
            }
        };

        let module = match parse_ts_source(code, path, Arc::new(SourceMap::default())) {
            Ok(module) => module,
            Err(err) => {
                warn!("skipping file: {}", err);
                return None;
            }
        };

        let is_dts = ends_with_ignore_case(&path.to_string_lossy(), ".d.ts");
        let module_path = is_module_file(&module).then(|| self.module_path(path));
        let collector = TypeCollector::new(path.to_string_lossy(), is_dts, module_path);
        Some(collector.collect(&module))
    }
}

impl TypeExtractor for AstTypeExtractor {
    fn add_input_file(&mut self, path: &Path) {
        self.files.push(path.to_path_buf());
    }

    fn extract_types(&mut self, cancel: &CancellationToken) -> Result<Vec<ExternalType>> {
        let mut types = Vec::new();
        for path in &self.files {
            cancel.check()?;
            if let Some(found) = self.extract_file(path) {
                debug!(path = %path.display(), count = found.len(), "extracted types");
                types.extend(found);
            }
        }
        Ok(types)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fs::{FsCall, MemoryFileSystem};

    fn extractor(fs: MemoryFileSystem) -> AstTypeExtractor {
        AstTypeExtractor::new(Arc::new(fs), "/proj")
    }

    #[test]
    fn test_module_path() {
        let ext = extractor(MemoryFileSystem::new());
        assert_eq!(
            ext.module_path(Path::new("/proj/Modules/Orders/OrderGrid.ts")),
            "/Modules/Orders/OrderGrid"
        );
        assert_eq!(
            ext.module_path(Path::new("/proj/Modules/View.TSX")),
            "/Modules/View"
        );
        assert_eq!(
            ext.module_path(Path::new("/proj/types/api.d.ts")),
            "/types/api"
        );
    }

    #[test]
    fn test_types_follow_file_order() {
        let fs = MemoryFileSystem::new()
            .with_file("/proj/Modules/B.ts", "namespace App { export class B1 {} export class B2 {} }")
            .with_file("/proj/Modules/A.ts", "export class A1 {}");
        let mut ext = extractor(fs);
        ext.add_input_file(Path::new("/proj/Modules/B.ts"));
        ext.add_input_file(Path::new("/proj/Modules/A.ts"));

        let types = ext.extract_types(&CancellationToken::new()).unwrap();

        assert_eq!(
            types.iter().map(ExternalType::full_name).collect::<Vec<_>>(),
            vec!["App.B1", "App.B2", "A1"]
        );
        assert_eq!(types[2].module.as_deref(), Some("/Modules/A"));
        assert_eq!(types[0].source_file, "/proj/Modules/B.ts");
    }

    #[test]
    fn test_skips_unparsable_and_missing_files() {
        let fs = MemoryFileSystem::new()
            .with_file("/proj/Modules/Broken.ts", "export class {")
            .with_file("/proj/Modules/Ok.ts", "class Ok {}");
        let mut ext = extractor(fs);
        ext.add_input_file(Path::new("/proj/Modules/Broken.ts"));
        ext.add_input_file(Path::new("/proj/Modules/Missing.ts"));
        ext.add_input_file(Path::new("/proj/Modules/Ok.ts"));

        let types = ext.extract_types(&CancellationToken::new()).unwrap();

        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "Ok");
    }

    #[test]
    fn test_cancelled_extraction_reads_nothing() {
        let fs = Arc::new(MemoryFileSystem::new().with_file("/proj/A.ts", "class A {}"));
        let mut ext = AstTypeExtractor::new(fs.clone(), "/proj");
        ext.add_input_file(Path::new("/proj/A.ts"));
        let token = CancellationToken::new();
        token.cancel();

        let err = ext.extract_types(&token).unwrap_err();

        assert!(err.is_cancelled());
        assert!(
            !fs.calls()
                .iter()
                .any(|call| matches!(call, FsCall::ReadFile(_)))
        );
    }
}
