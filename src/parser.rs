// src/parser.rs
use swc_common::{FileName, SourceMap, sync::Lrc};
use swc_ecma_ast::*;
use swc_ecma_parser::{Parser as SwcParser, StringInput, Syntax, TsConfig, lexer::Lexer};
use swc_ecma_visit::{Visit, VisitWith};

use std::fs;
use std::path::Path;

use crate::error::{CodegenError, Result};

/// TypeScript / TSX のソース文字列をモジュールとしてパースする。
/// 回復可能なエラーも含め、1 つでもエラーがあれば `Format` エラーとする
pub fn parse_typescript(file_path: &Path, src: String, tsx: bool) -> Result<Module> {
    let cm: Lrc<SourceMap> = Default::default();

    let fm = cm.new_source_file(FileName::Real(file_path.to_path_buf()), src);

    let syntax = Syntax::Typescript(TsConfig {
        tsx,
        decorators: true,
        dts: false,
        no_early_errors: true,
        disallow_ambiguous_jsx_like: true,
    });

    let lexer = Lexer::new(
        syntax,
        Default::default(), // es version
        StringInput::from(&*fm),
        None,
    );

    let mut parser = SwcParser::new_from(lexer);

    let to_format_error = |e: swc_ecma_parser::error::Error| CodegenError::Format {
        path: file_path.to_path_buf(),
        message: e.kind().msg().to_string(),
    };

    let module = parser.parse_module().map_err(to_format_error)?;

    if let Some(e) = parser.take_errors().into_iter().next() {
        return Err(to_format_error(e));
    }

    Ok(module)
}

/// 拡張子から TSX として扱うかを判定してファイルを読み込み、パースする
pub fn parse_source_file(file_path: &Path) -> Result<Module> {
    let src = fs::read_to_string(file_path).map_err(CodegenError::io(file_path))?;
    let tsx = file_path.extension().is_some_and(|ext| ext == "tsx");
    tracing::trace!("parsing {:?} ({} bytes)", file_path, src.len());
    parse_typescript(file_path, src, tsx)
}

/// AST をトラバースして import 元のモジュール指定子を集める Visitor
#[derive(Debug, Default)]
struct ImportVisitor {
    /// 見つかった指定子 (出現順)
    specifiers: Vec<String>,
}

impl ImportVisitor {
    fn push(&mut self, specifier: &Str) {
        self.specifiers.push(specifier.value.to_string());
    }
}

impl Visit for ImportVisitor {
    /// `import x from "./x"` / `import type { X } from "./x"` / `import "./x"`
    fn visit_import_decl(&mut self, import: &ImportDecl) {
        self.push(&import.src);
    }

    /// `export { x } from "./x"`
    fn visit_named_export(&mut self, export: &NamedExport) {
        if let Some(src) = &export.src {
            self.push(src);
        }
    }

    /// `export * from "./x"`
    fn visit_export_all(&mut self, export: &ExportAll) {
        self.push(&export.src);
    }

    /// `import("./x")` (next/dynamic など)
    fn visit_call_expr(&mut self, call: &CallExpr) {
        if let Callee::Import(_) = &call.callee {
            if let Some(arg) = call.args.first() {
                if let Expr::Lit(Lit::Str(src)) = &*arg.expr {
                    self.push(src);
                }
            }
        }
        call.visit_children_with(self);
    }
}

/// ファイル内のすべての import 指定子を返す
pub fn collect_import_specifiers(module: &Module) -> Vec<String> {
    let mut visitor = ImportVisitor::default();
    visitor.visit_module(module);
    visitor.specifiers
}
