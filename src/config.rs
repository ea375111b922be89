// src/config.rs
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::error::{CodegenError, Result};

pub const DEFAULT_APP_DIR: &str = "src/app";
pub const DEFAULT_OUTPUT: &str = "src/app-path-types.ts";
pub const DEFAULT_DICTIONARIES_DIR: &str = "src/dictionaries";
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// 実行モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    /// 一度だけ生成して終了 (ビルド時)
    #[default]
    Build,
    /// 初回生成後、ファイル変更のたびに再生成 (開発時)
    Watch,
}

/// パイプライン全体に渡す設定。CLI で一度だけ解決される
#[derive(Debug, Clone)]
pub struct Config {
    /// プロジェクトルート (絶対パス)
    pub project_root: PathBuf,
    /// ルート定義ディレクトリ (project_root からの相対パス)
    pub app_dir: PathBuf,
    /// 生成する TypeScript ファイル (project_root からの相対パス)
    pub output: PathBuf,
    /// 辞書 YAML を置くディレクトリ (project_root からの相対パス)
    pub dictionaries_dir: PathBuf,
    pub mode: Mode,
    pub debounce: Duration,
}

impl Config {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Config {
            project_root: project_root.into(),
            app_dir: PathBuf::from(DEFAULT_APP_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            dictionaries_dir: PathBuf::from(DEFAULT_DICTIONARIES_DIR),
            mode: Mode::default(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }

    /// 相対パス指定が project_root の内側を指しているか確認する
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("app_dir", &self.app_dir),
            ("output", &self.output),
            ("dictionaries_dir", &self.dictionaries_dir),
        ] {
            if normalize_relative(path).is_none() {
                return Err(CodegenError::InvalidPath {
                    name,
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn app_root(&self) -> PathBuf {
        self.resolve(&self.app_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }

    pub fn dictionaries_root(&self) -> PathBuf {
        self.resolve(&self.dictionaries_dir)
    }

    /// 生成物に書き出す際の app_dir 表記 (区切り文字は常に '/', `.` は除く)
    pub fn app_dir_str(&self) -> String {
        to_slash(&self.app_dir)
    }

    fn resolve(&self, relative: &Path) -> PathBuf {
        match normalize_relative(relative) {
            Some(normalized) => self.project_root.join(normalized),
            None => self.project_root.join(relative),
        }
    }
}

/// `./src/app` → `src/app`。`..` や絶対パスを含む場合は None
pub fn normalize_relative(path: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(segment) => normalized.push(segment),
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(normalized)
}

/// OS に依存しない '/' 区切りの文字列に変換する (`.` セグメントは捨てる)
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter(|c| *c != Component::CurDir)
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_next_conventions() {
        let config = Config::new("/proj");
        assert_eq!(config.app_root(), PathBuf::from("/proj/src/app"));
        assert_eq!(config.output_path(), PathBuf::from("/proj/src/app-path-types.ts"));
        assert_eq!(config.app_dir_str(), "src/app");
        assert_eq!(config.mode, Mode::Build);
        assert_eq!(config.debounce, Duration::from_millis(1000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn leading_cur_dir_is_dropped() {
        let mut config = Config::new("/proj");
        config.app_dir = PathBuf::from("./src/app");
        config.output = PathBuf::from("./src/./routes.ts");
        assert!(config.validate().is_ok());
        assert_eq!(config.app_dir_str(), "src/app");
        assert_eq!(config.app_root(), PathBuf::from("/proj/src/app"));
        assert_eq!(config.output_path(), PathBuf::from("/proj/src/routes.ts"));
    }

    #[test]
    fn paths_outside_project_root_are_rejected() {
        let mut config = Config::new("/proj");
        config.app_dir = PathBuf::from("../other/app");
        assert!(matches!(
            config.validate(),
            Err(CodegenError::InvalidPath { name: "app_dir", .. })
        ));

        let mut config = Config::new("/proj");
        config.dictionaries_dir = PathBuf::from("/abs/dictionaries");
        assert!(matches!(
            config.validate(),
            Err(CodegenError::InvalidPath { name: "dictionaries_dir", .. })
        ));
    }
}
