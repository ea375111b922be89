// src/watch.rs
//! 開発時の watch モード。
//!
//! app ディレクトリと辞書ディレクトリを監視し、変更が落ち着いたら
//! (debounce 経過後) パイプライン全体を再実行する。差分生成は行わない。

use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::Result;

/// 保留中の変更がないときの待ち時間
const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// エディタの一時ファイル
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bak" | "swp" | "swo" | "tmp") || name.ends_with('~') || name.starts_with('.')
}

fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// 再生成のきっかけになるファイルか。生成物自身 (ルート型ファイル、
/// 辞書の .ts) の書き込みで再実行が連鎖しないよう除外する
pub fn is_watched_source(path: &Path, config: &Config) -> bool {
    if is_temp_file(path) || path == config.output_path() {
        return false;
    }
    if path.starts_with(config.dictionaries_root()) {
        return path.extension().is_some_and(|ext| ext == "yaml");
    }
    true
}

/// 連続したファイルイベントを 1 回の再生成にまとめる
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: HashSet<PathBuf>,
    last_event: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: HashSet::new(),
            last_event: None,
        }
    }

    pub fn add_at(&mut self, paths: impl IntoIterator<Item = PathBuf>, now: Instant) {
        let mut added = false;
        for path in paths {
            self.pending.insert(path);
            added = true;
        }
        if added {
            self.last_event = Some(now);
        }
    }

    pub fn ready_at(&self, now: Instant) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| now.duration_since(t) >= self.delay)
    }

    pub fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    /// 次に recv で待つ時間
    pub fn timeout_at(&self, now: Instant) -> Duration {
        match self.last_event {
            Some(t) if !self.pending.is_empty() => self.delay.saturating_sub(now.duration_since(t)),
            _ => IDLE_TIMEOUT,
        }
    }
}

/// 監視対象のうち存在するディレクトリ
fn watch_roots(config: &Config) -> Vec<PathBuf> {
    [config.app_root(), config.dictionaries_root()]
        .into_iter()
        .filter(|path| path.is_dir())
        .collect()
}

/// ファイル変更を監視し、変更のたびに `run` を呼び出す (ブロッキング)。
/// `run` の失敗はログに出すだけで監視は継続する
pub fn watch_blocking<F>(config: &Config, mut run: F) -> Result<()>
where
    F: FnMut(&[PathBuf]) -> Result<()>,
{
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx)?;

    let roots = watch_roots(config);
    for root in &roots {
        watcher.watch(root, RecursiveMode::Recursive)?;
        tracing::info!("watching {}", root.display());
    }
    if roots.is_empty() {
        tracing::warn!("nothing to watch: neither app nor dictionaries directory exists");
    }

    let mut debouncer = Debouncer::new(config.debounce);

    loop {
        match rx.recv_timeout(debouncer.timeout_at(Instant::now())) {
            Ok(Ok(event)) if is_relevant(&event) => {
                let sources = event
                    .paths
                    .into_iter()
                    .filter(|path| is_watched_source(path, config));
                debouncer.add_at(sources, Instant::now());
            }
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::warn!("watch error: {e}"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if debouncer.ready_at(Instant::now()) {
            let changed = debouncer.take();
            tracing::info!("{} file(s) changed, regenerating...", changed.len());
            if let Err(e) = run(&changed) {
                tracing::error!("generation failed: {e}");
            }
        }
    }

    Ok(())
}
