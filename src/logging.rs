// src/logging.rs
use tracing_subscriber::EnvFilter;

/// tracing subscriber を初期化する。`RUST_LOG` が設定されていればそちらを優先
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // テストなどで二重に初期化された場合は既存の subscriber を使う
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
