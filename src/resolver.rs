// src/resolver.rs
use path_absolutize::Absolutize;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CodegenError, Result};

/// import 指定子に付け足して試す拡張子
const SOURCE_EXTENSIONS: [&str; 2] = ["ts", "tsx"];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfig {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    base_url: Option<String>,
    #[serde(default)]
    paths: BTreeMap<String, Vec<String>>,
}

/// tsconfig.json の `compilerOptions.paths` から読み取ったエイリアス
#[derive(Debug, Clone, Default)]
pub struct PathAliases {
    /// (パターン, 置換先) の組。パターン・置換先とも末尾の `*` を含み得る
    entries: Vec<(String, Vec<PathBuf>)>,
}

impl PathAliases {
    /// `workspace/tsconfig.json` を読み込む。tsconfig はコメントや末尾カンマを含む
    /// JSONC なので json5 として読み、それでも読めなければエイリアス無しとして扱う
    pub fn from_tsconfig(workspace: &Path) -> Result<Self> {
        let tsconfig_path = workspace.join("tsconfig.json");
        let raw = fs::read_to_string(&tsconfig_path).map_err(CodegenError::io(&tsconfig_path))?;

        let tsconfig: TsConfig = match json5::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "could not read path aliases from {}: {e}",
                    tsconfig_path.display()
                );
                return Ok(PathAliases::default());
            }
        };

        let base = workspace.join(tsconfig.compiler_options.base_url.as_deref().unwrap_or("."));
        let entries = tsconfig
            .compiler_options
            .paths
            .into_iter()
            .map(|(pattern, targets)| {
                let targets: Vec<PathBuf> = targets.iter().map(|target| base.join(target)).collect();
                (pattern, targets)
            })
            .collect();

        Ok(PathAliases { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// エイリアスに一致した場合の候補ベースパスを返す
    fn expand(&self, specifier: &str) -> Vec<PathBuf> {
        let mut bases = Vec::new();
        for (pattern, targets) in &self.entries {
            let rest = match pattern.strip_suffix('*') {
                Some(prefix) => match specifier.strip_prefix(prefix) {
                    Some(rest) => rest,
                    None => continue,
                },
                None if pattern == specifier => "",
                None => continue,
            };

            for target in targets {
                let target = target.to_string_lossy();
                bases.push(PathBuf::from(target.replacen('*', rest, 1)));
            }
        }
        bases
    }
}

/// import 指定子を実際のソースファイルに解決する。
///
/// - `specifier`: import 文に書かれた文字列 (例: "./button", "@/lib/utils")
/// - `importing_file`: その import を含むファイルの絶対パス
/// - `aliases`: tsconfig のパスエイリアス
///
/// 戻り値:
/// - Ok(Some(path)) → 見つかったファイルの絶対パス
/// - Ok(None)       → 外部パッケージ、もしくは見つからなかった
pub fn resolve_import(
    specifier: &str,
    importing_file: &Path,
    aliases: &PathAliases,
) -> Result<Option<PathBuf>> {
    // 1) 相対指定ならファイルのディレクトリ、そうでなければエイリアスを基準にする
    let bases: Vec<PathBuf> = if specifier.starts_with("./") || specifier.starts_with("../") {
        let parent_dir = importing_file.parent().ok_or_else(|| {
            CodegenError::io(importing_file)(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "importing file has no parent directory",
            ))
        })?;
        vec![parent_dir.join(specifier)]
    } else {
        aliases.expand(specifier)
    };

    // 2) 典型的な候補を列挙する
    let mut candidates: Vec<PathBuf> = Vec::new();
    for base in bases {
        // A) 拡張子付きでそのまま指定されている
        candidates.push(base.clone());
        // B) ./button → ./button.ts / ./button.tsx
        for ext in SOURCE_EXTENSIONS {
            let mut with_ext = base.clone().into_os_string();
            with_ext.push(format!(".{ext}"));
            candidates.push(PathBuf::from(with_ext));
        }
        // C) ./button → ./button/index.ts / ./button/index.tsx
        for ext in SOURCE_EXTENSIONS {
            candidates.push(base.join(format!("index.{ext}")));
        }
    }

    // 3) 絶対パス化し、最初に存在するファイルを返す
    for cand in candidates {
        let abs = cand.absolutize().map_err(CodegenError::io(&cand))?.to_path_buf();
        if fs::metadata(&abs).is_ok_and(|meta| meta.is_file()) {
            return Ok(Some(abs));
        }
    }

    Ok(None)
}
