// src/composition.rs
use std::collections::HashMap;

use crate::discovery::DiscoveredFile;
use crate::model::{ComponentTreeJson, SpecialFile, SpecialKind};

/// ディレクトリと種別から特殊ファイルを引くための索引
#[derive(Debug, Default)]
pub struct SpecialIndex {
    files: HashMap<(String, SpecialKind), String>,
}

impl SpecialIndex {
    /// page 以外の特殊ファイルを登録する。同じディレクトリに拡張子違いが
    /// 複数ある場合は先に現れたもの (パス順で先) を採用
    pub fn new(files: &[DiscoveredFile]) -> Self {
        let mut index = SpecialIndex::default();
        for file in files.iter().filter(|f| f.kind != SpecialKind::Page) {
            let dir = parent_dir(&file.path).unwrap_or_default().to_string();
            index
                .files
                .entry((dir, file.kind))
                .or_insert_with(|| file.path.clone());
        }
        index
    }

    pub fn get(&self, dir: &str, kind: SpecialKind) -> Option<&str> {
        self.files
            .get(&(dir.to_string(), kind))
            .map(String::as_str)
    }
}

/// 祖先の走査で確認する種別 (page を除く)
const ANCESTOR_KINDS: [SpecialKind; 5] = [
    SpecialKind::Layout,
    SpecialKind::Template,
    SpecialKind::Loading,
    SpecialKind::Error,
    SpecialKind::NotFound,
];

fn parent_dir(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(dir, _)| dir)
}

fn segment_count(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}

/// ページのディレクトリから app_dir まで遡り、存在する特殊ファイルを集める。
/// 戻り値は sort の昇順で、末尾に page 自身を含む
pub fn collect_specials(page_file: &str, app_dir: &str, index: &SpecialIndex) -> Vec<SpecialFile> {
    let root_depth = segment_count(app_dir);
    let mut specials: Vec<SpecialFile> = Vec::new();
    let mut current_dir = parent_dir(page_file).unwrap_or_default();

    loop {
        let depth = segment_count(current_dir).saturating_sub(root_depth) as u32;

        for kind in ANCESTOR_KINDS {
            if let Some(path) = index.get(current_dir, kind) {
                specials.push(SpecialFile {
                    kind,
                    path: path.to_string(),
                    sort: depth * 10 + kind.rank(),
                });
            }
        }

        // app_dir 自身の特殊ファイルまで集めたら終了
        if current_dir == app_dir {
            break;
        }
        match parent_dir(current_dir) {
            Some(parent) if segment_count(parent) >= root_depth => current_dir = parent,
            _ => break,
        }
    }

    specials.sort_by_key(|special| special.sort);
    specials.push(SpecialFile {
        kind: SpecialKind::Page,
        path: page_file.to_string(),
        sort: SpecialKind::Page.rank(),
    });
    specials
}

/// 並べ替え済みの特殊ファイルを右から畳み込み、入れ子のツリーにする。
/// page が最内側、先頭の要素が最外側のノードになる
pub fn fold_specials(specials: &[SpecialFile]) -> Option<ComponentTreeJson> {
    specials.iter().rev().fold(None, |acc, special| {
        let node = ComponentTreeJson::leaf(special.kind.node_type(), special.path.clone())
            .with_fallback(special.kind.fallback());
        Some(match acc {
            Some(child) => node.with_children(vec![child]),
            None => node,
        })
    })
}

/// 1 ページ分のコンポーネントツリーを構築する
pub fn build_component_tree(page_file: &str, app_dir: &str, index: &SpecialIndex) -> ComponentTreeJson {
    let specials = collect_specials(page_file, app_dir, index);
    // specials には必ず page が含まれるので None にはならない
    fold_specials(&specials)
        .unwrap_or_else(|| ComponentTreeJson::leaf(SpecialKind::Page.node_type(), page_file))
}
