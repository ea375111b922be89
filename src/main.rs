// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use next_route_codegen::config::DEFAULT_DEBOUNCE_MS;
use next_route_codegen::{Config, Mode, dictionaries, logging, routes, tree, unused_import};

/// CLI 引数定義
#[derive(Parser, Debug)]
#[command(
    name = "next-route-codegen",
    version,
    about = "Next.js App Router のルート構造から型付きルート表を生成する CLI ツール"
)]
struct Cli {
    /// 対象プロジェクトのルート (既定はカレントディレクトリ)
    /// 例: `--project-root apps/web`
    #[arg(short = 'r', long = "project-root", value_name = "DIR", default_value = ".")]
    project_root: PathBuf,

    /// debug レベルのログを出力する
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// ルート型ファイル (StaticPath / TypedRoute / appPathRoutes) を生成する
    Routes {
        /// 出力先 (プロジェクトルートからの相対パス)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// ルート定義ディレクトリ (プロジェクトルートからの相対パス)
        #[arg(long, value_name = "DIR")]
        app_dir: Option<PathBuf>,
    },

    /// 辞書 YAML から TypeScript モジュールを生成する
    Dictionaries {
        /// 辞書ディレクトリ (プロジェクトルートからの相対パス)
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// ルート型ファイルと辞書をまとめて生成する
    Generate {
        /// build: 1 回だけ生成 / watch: 変更を監視して再生成
        #[arg(short, long, value_enum, default_value_t = Mode::Build)]
        mode: Mode,

        /// watch モードで変更をまとめる待ち時間 (ミリ秒)
        #[arg(long, value_name = "MS", default_value_t = DEFAULT_DEBOUNCE_MS)]
        debounce_ms: u64,
    },

    /// 静的ルートのフォルダツリーを JSON で出力する
    Tree,

    /// どこからも import されていないローカルファイルを一覧表示する
    UnusedImport {
        /// 解析対象のワークスペース (tsconfig.json を含むディレクトリ)
        workspace: PathBuf,
    },
}

fn main() -> Result<()> {
    // 1) CLI 引数をパースし、ログを初期化
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // 2) プロジェクトルートを絶対パス化し、設定を一度だけ解決する
    let project_root = cli
        .project_root
        .canonicalize()
        .with_context(|| format!("project root {} not found", cli.project_root.display()))?;
    let mut config = Config::new(project_root);

    // 3) サブコマンドごとに実行
    match cli.command {
        Commands::Routes { output, app_dir } => {
            if let Some(output) = output {
                config.output = output;
            }
            if let Some(app_dir) = app_dir {
                config.app_dir = app_dir;
            }
            routes::generate_routes(&config).context("failed to generate routes")?;
        }
        Commands::Dictionaries { dir } => {
            if let Some(dir) = dir {
                config.dictionaries_dir = dir;
            }
            config.validate()?;
            dictionaries::generate_dictionaries(&config.dictionaries_root())
                .context("failed to generate dictionaries")?;
        }
        Commands::Generate { mode, debounce_ms } => {
            config.mode = mode;
            config.debounce = Duration::from_millis(debounce_ms);
            next_route_codegen::run(&config).context("generation failed")?;
        }
        Commands::Tree => {
            let structures = routes::route_structures(&config)?;
            let hrefs: Vec<&str> = structures
                .iter()
                .filter(|route| !route.is_dynamic())
                .map(|route| route.href.as_str())
                .collect();
            let json = serde_json::to_string_pretty(&tree::build_tree(&hrefs))?;
            println!("{}", json);
        }
        Commands::UnusedImport { workspace } => {
            let workspace = config.project_root.join(workspace);
            let unused = unused_import::unused_imports(&workspace)
                .with_context(|| format!("failed to analyze {}", workspace.display()))?;

            tracing::info!("unused import: {}", unused.len());
            for file_path in &unused {
                println!("./{}", file_path);
            }
        }
    }

    Ok(())
}
