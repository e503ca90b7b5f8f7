use std::{path::Path, sync::Arc};

use swc_common::{FileName, Globals, SourceMap, comments::SingleThreadedComments};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::{
    error::{ListError, Result},
    utils::ends_with_ignore_case,
};

/// Parse TypeScript source into an AST.
///
/// `.tsx` files enable JSX and `.d.ts` files are parsed in declaration mode.
/// Each call sets its own swc globals, so files can be parsed from any thread.
pub fn parse_ts_source(code: String, file_path: &Path, source_map: Arc<SourceMap>) -> Result<Module> {
    use swc_common::GLOBALS;

    let file_name = file_path.to_string_lossy();
    let is_tsx = file_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tsx"));
    let is_dts = ends_with_ignore_case(&file_name, ".d.ts");

    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.to_path_buf()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: is_tsx,
            dts: is_dts,
            decorators: true,
            ..Default::default()
        });

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), Some(&comments));

        parser.parse_module().map_err(|e| ListError::Parse {
            path: file_path.to_path_buf(),
            message: format!("{:?}", e),
        })
    })
}
