// src/error.rs
//! コード生成処理のエラー型

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    /// マージ対象のツリーが 1 つもない
    #[error("empty input: at least one component tree is required to merge")]
    EmptyInput,

    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid TypeScript in `{path}`: {message}")]
    Format { path: PathBuf, message: String },

    #[error("invalid YAML in `{0}`")]
    Yaml(PathBuf, #[source] serde_yaml::Error),

    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),

    /// 設定のパスが project_root の外を指している
    #[error("`{name}` must be a path inside the project root, got `{path}`")]
    InvalidPath { name: &'static str, path: PathBuf },

    #[error("workspace `{0}` not found (tsconfig.json is missing)")]
    WorkspaceNotFound(PathBuf),

    #[error("file watcher error")]
    Watch(#[from] notify::Error),
}

pub type Result<T, E = CodegenError> = std::result::Result<T, E>;

impl CodegenError {
    /// `map_err` 用のヘルパー
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |err| CodegenError::Io(path, err)
    }
}
