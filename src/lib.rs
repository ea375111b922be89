// src/lib.rs
//! Next.js App Router のファイル規約を走査し、型付きルート表
//! (`StaticPath` / `TypedRoute` / `appPathRoutes`) を生成するライブラリ。
//! 辞書 YAML の TypeScript 化と、未使用ローカルファイルの検出も含む。

pub mod classifier;
pub mod composition;
pub mod config;
pub mod dictionaries;
pub mod discovery;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod merge;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod routes;
pub mod tree;
pub mod unused_import;
pub mod watch;

use std::path::PathBuf;

pub use config::{Config, Mode};
pub use error::{CodegenError, Result};
pub use model::{ComponentTreeJson, Fallback, NodeType, PageRoute, RouteStructure};

/// 1 回分の生成結果
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    pub routes: Vec<RouteStructure>,
    pub dictionaries: Vec<PathBuf>,
}

/// ルート型ファイルと辞書をまとめて生成する
pub fn generate_all(config: &Config) -> Result<GenerateSummary> {
    let routes = routes::generate_routes(config)?;
    let dictionaries = dictionaries::generate_dictionaries(&config.dictionaries_root())?;
    Ok(GenerateSummary {
        routes,
        dictionaries,
    })
}

/// 設定されたモードで実行する。Build は 1 回だけ、Watch は初回生成後に監視を続ける
pub fn run(config: &Config) -> Result<()> {
    tracing::info!("generating routes and dictionaries...");
    match generate_all(config) {
        Ok(_) => tracing::info!("generated all successfully"),
        // watch モードでは初回の失敗でも監視を開始する
        Err(e) if config.mode == Mode::Watch => tracing::error!("generation failed: {e}"),
        Err(e) => return Err(e),
    }

    if config.mode == Mode::Watch {
        watch::watch_blocking(config, |_changed| {
            generate_all(config)?;
            tracing::info!("generated all successfully");
            Ok(())
        })?;
    }

    Ok(())
}
