// src/dictionaries.rs
//! 辞書 YAML から `export default {...} as const` 形式の TypeScript を生成する。

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{CodegenError, Result};
use crate::formatter::write_generated;
use crate::routes::GENERATED_HEADER;

/// `dir` 以下の `*.yaml` を列挙する。ディレクトリが無ければ空
pub fn find_yaml_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "yaml")
        })
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// YAML 文書 1 つを TypeScript モジュールの本文に変換する
pub fn render_dictionary(yaml_path: &Path, yaml: &str) -> Result<String> {
    let data: serde_yaml::Value =
        serde_yaml::from_str(yaml).map_err(|e| CodegenError::Yaml(yaml_path.to_path_buf(), e))?;
    let json = serde_json::to_string_pretty(&data)?;
    Ok(format!("{GENERATED_HEADER}\nexport default {json} as const;\n"))
}

/// 辞書ディレクトリ内のすべての YAML から `.ts` を生成し、書き出したパスを返す
pub fn generate_dictionaries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for yaml_file in find_yaml_files(dir) {
        let target = yaml_file.with_extension("ts");
        let yaml = fs::read_to_string(&yaml_file).map_err(CodegenError::io(&yaml_file))?;
        write_generated(&render_dictionary(&yaml_file, &yaml)?, &target)?;
        tracing::debug!("generated dictionary {}", target.display());
        written.push(target);
    }

    if !written.is_empty() {
        tracing::info!("generated {} dictionaries in {}", written.len(), dir.display());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_yaml_as_const_object() {
        let yaml = "common:\n  hello: Hello\n  items:\n    - one\n    - two\n";
        let out = render_dictionary(Path::new("en.yaml"), yaml).unwrap();
        assert!(out.starts_with(GENERATED_HEADER));
        assert!(out.contains("\"hello\": \"Hello\""));
        assert!(out.trim_end().ends_with("as const;"));
    }

    #[test]
    fn invalid_yaml_is_reported_with_path() {
        let err = render_dictionary(Path::new("ko.yaml"), "a: [1, 2").unwrap_err();
        assert!(matches!(err, CodegenError::Yaml(ref p, _) if p == Path::new("ko.yaml")));
    }

    #[test]
    fn missing_directory_generates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let written = generate_dictionaries(&dir.path().join("nope")).unwrap();
        assert!(written.is_empty());
    }
}
