// src/discovery.rs
use std::path::Path;
use walkdir::WalkDir;

use crate::config::to_slash;
use crate::model::SpecialKind;

/// 発見された特殊ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub kind: SpecialKind,
    /// project_root からの '/' 区切り相対パス
    pub path: String,
}

/// ファイル名が特殊ファイル規約 (`{page,layout,...}.{ts,tsx,mdx}`) に合致すれば種別を返す
pub fn match_special_file(file_name: &str) -> Option<SpecialKind> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    let kind = SpecialKind::from_stem(stem)?;
    kind.extensions().contains(&ext).then_some(kind)
}

/// `app_root` 以下を再帰的に探索し、特殊ファイルを集める。
/// ディレクトリが存在しない場合は空を返す (呼び出し側は「該当なし」と同じ扱い)
pub fn discover_special_files(project_root: &Path, app_root: &Path) -> Vec<DiscoveredFile> {
    let mut files: Vec<DiscoveredFile> = WalkDir::new(app_root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|entry| {
            let kind = entry.file_name().to_str().and_then(match_special_file)?;
            let relative = entry.path().strip_prefix(project_root).ok()?;
            Some(DiscoveredFile {
                kind,
                path: to_slash(relative),
            })
        })
        .collect();

    // 実行ごとの結果を安定させるため並べ替える
    files.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!("discovered {} special files under {}", files.len(), app_root.display());
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn matches_only_the_naming_convention() {
        assert_eq!(match_special_file("page.tsx"), Some(SpecialKind::Page));
        assert_eq!(match_special_file("page.mdx"), Some(SpecialKind::Page));
        assert_eq!(match_special_file("not-found.tsx"), Some(SpecialKind::NotFound));
        assert_eq!(match_special_file("layout.ts"), Some(SpecialKind::Layout));
        assert_eq!(match_special_file("layout.mdx"), None);
        assert_eq!(match_special_file("route.ts"), None);
        assert_eq!(match_special_file("page.test.tsx"), None);
        assert_eq!(match_special_file("page"), None);
    }

    #[test]
    fn missing_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let files = discover_special_files(dir.path(), &dir.path().join("src/app"));
        assert!(files.is_empty());
    }

    #[test]
    fn collects_relative_slash_paths() {
        let dir = tempfile::tempdir().unwrap();
        let users = dir.path().join("src/app/users/[id]");
        fs::create_dir_all(&users).unwrap();
        fs::write(dir.path().join("src/app/layout.tsx"), "").unwrap();
        fs::write(users.join("page.tsx"), "").unwrap();
        fs::write(users.join("utils.ts"), "").unwrap();

        let files = discover_special_files(dir.path(), &dir.path().join("src/app"));
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["src/app/layout.tsx", "src/app/users/[id]/page.tsx"]);
        assert_eq!(files[0].kind, SpecialKind::Layout);
    }
}
