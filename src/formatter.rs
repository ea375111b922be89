// src/formatter.rs
//! 生成した TypeScript ソースの整形と検証。
//!
//! 空白を正規化したうえで実際に TypeScript としてパースし、
//! 失敗した場合は書き込み前にエラーを返す。

use std::fs;
use std::path::Path;

use crate::error::{CodegenError, Result};
use crate::parser::parse_typescript;

/// 行末の空白を除去し、連続する空行を 1 行にまとめ、末尾を改行 1 つに揃える
pub fn normalize_whitespace(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut blank_run = 0;

    for line in source.trim().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}

/// 生成コードを整形し、TypeScript として妥当か検証する。
/// `target` はエラーメッセージと TSX 判定にのみ使う
pub fn format_typescript(source: &str, target: &Path) -> Result<String> {
    let formatted = normalize_whitespace(source);
    let tsx = target.extension().is_some_and(|ext| ext == "tsx");
    parse_typescript(target, formatted.clone(), tsx)?;
    Ok(formatted)
}

/// 整形と検証に通った場合だけ `target` に書き出す。失敗時は既存ファイルに触れない
pub fn write_generated(source: &str, target: &Path) -> Result<()> {
    let contents = format_typescript(source, target)?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(CodegenError::io(parent))?;
    }
    fs::write(target, contents).map_err(CodegenError::io(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn collapses_blank_lines_and_trailing_spaces() {
        let src = "\n\n  export type A = 1;   \n\n\n\nexport type B = 2;\n\n";
        assert_eq!(normalize_whitespace(src), "export type A = 1;\n\nexport type B = 2;\n");
    }

    #[test]
    fn rejects_invalid_typescript() {
        let err = format_typescript("export const x = ;", &PathBuf::from("out.ts")).unwrap_err();
        match err {
            CodegenError::Format { path, .. } => assert_eq!(path, PathBuf::from("out.ts")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_typescript() {
        let out = format_typescript("export default { a: 1 } as const;", &PathBuf::from("en.ts"));
        assert_eq!(out.unwrap(), "export default { a: 1 } as const;\n");
    }

    #[test]
    fn rejected_source_leaves_existing_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("en.tsx");
        fs::write(&target, "// previous\n").unwrap();

        // TSX では `<T>` が JSX 要素として解釈され、閉じタグが無いため失敗する
        let err = write_generated("export default <T>(value) as const;", &target).unwrap_err();
        assert!(matches!(err, CodegenError::Format { .. }));
        assert_eq!(fs::read_to_string(&target).unwrap(), "// previous\n");
    }

    #[test]
    fn accepted_source_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("generated/nested/out.ts");
        write_generated("export const a = 1;  \n\n\n", &target).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "export const a = 1;\n");
    }
}
