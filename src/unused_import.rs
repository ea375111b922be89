// src/unused_import.rs
//! ワークスペース内で、どこからも import されていないローカルファイルを検出する。
//!
//! Next.js が規約で読み込むファイル (page, layout, middleware など) は除外する。

use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

use crate::config::to_slash;
use crate::error::{CodegenError, Result};
use crate::parser::{collect_import_specifiers, parse_source_file};
use crate::resolver::{PathAliases, resolve_import};

/// フレームワークが直接読み込むため import されなくても未使用扱いしないファイル
static FRAMEWORK_ENTRY_FILES: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(
            r"src/((manifest|mdx-components|middleware|instrumentation|instrumentation-client)\.(ts|tsx))$",
        )
        .expect("static regex"),
        Regex::new(
            r"src/app/.*((layout|page|loading|not-found|error|global-error|default|route|template)\.(ts|tsx))$",
        )
        .expect("static regex"),
    ]
});

/// 1 ファイル分の解析結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalImports {
    /// ワークスペースからの相対パス
    pub file_path: String,
    /// このファイルが import しているローカルファイル (ワークスペースからの相対パス)
    pub imports: Vec<String>,
}

pub fn is_framework_entry(path: &str) -> bool {
    FRAMEWORK_ENTRY_FILES.iter().any(|re| re.is_match(path))
}

/// `workspace/src` 以下の .ts / .tsx ファイルを列挙する (.d.ts は除く)
fn source_files(workspace: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(workspace.join("src"))
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy();
            (name.ends_with(".ts") || name.ends_with(".tsx")) && !name.ends_with(".d.ts")
        })
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// 各ソースファイルが import しているローカルファイルを集める
pub fn collect_local_imports(workspace: &Path) -> Result<Vec<LocalImports>> {
    let aliases = PathAliases::from_tsconfig(workspace)?;
    let mut result = Vec::new();

    for file in source_files(workspace) {
        let relative = file.strip_prefix(workspace).unwrap_or(&file);
        // 構文エラーのファイルは import 無しとして扱い、解析は続ける
        let specifiers = match parse_source_file(&file) {
            Ok(module) => collect_import_specifiers(&module),
            Err(CodegenError::Format { message, .. }) => {
                tracing::warn!("skipping imports of {}: {message}", to_slash(relative));
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        let mut imports = Vec::new();

        for specifier in specifiers {
            let Some(resolved) = resolve_import(&specifier, &file, &aliases)? else {
                continue;
            };
            // ワークスペース外 (node_modules や他パッケージ) は対象外
            if let Ok(imported) = resolved.strip_prefix(workspace) {
                imports.push(to_slash(imported));
            }
        }

        result.push(LocalImports {
            file_path: to_slash(relative),
            imports,
        });
    }

    Ok(result)
}

/// どのファイルからも import されていないファイルを返す (フレームワーク規約ファイルは除外)
pub fn find_unused_imports(local_imports: &[LocalImports]) -> Vec<String> {
    let imported: BTreeSet<&str> = local_imports
        .iter()
        .flat_map(|item| item.imports.iter().map(String::as_str))
        .collect();

    let files: BTreeSet<&str> = local_imports
        .iter()
        .map(|item| item.file_path.as_str())
        .collect();

    files
        .difference(&imported)
        .filter(|path| !is_framework_entry(path))
        .map(|path| path.to_string())
        .collect()
}

/// ワークスペースを解析し、未使用ファイルの一覧を返す
pub fn unused_imports(workspace: &Path) -> Result<Vec<String>> {
    if !workspace.join("tsconfig.json").is_file() {
        return Err(CodegenError::WorkspaceNotFound(workspace.to_path_buf()));
    }

    let workspace = workspace
        .canonicalize()
        .map_err(CodegenError::io(workspace))?;
    tracing::info!("collecting local imports in {}", workspace.display());
    let local_imports = collect_local_imports(&workspace)?;
    tracing::debug!("parsed {} source files", local_imports.len());

    Ok(find_unused_imports(&local_imports))
}
