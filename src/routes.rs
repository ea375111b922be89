// src/routes.rs
//! ルート構造生成のパイプライン。
//!
//! 1. `discovery`   : app ディレクトリから特殊ファイルを収集
//! 2. `classifier`  : ページごとに href / linkTypes を導出
//! 3. `composition` : 祖先の layout などからコンポーネントツリーを構築
//! 4. `merge`       : 同じ linkTypes のツリーを統合
//!
//! 結果は TypeScript モジュールとして出力ファイルに丸ごと書き出す。

use std::collections::BTreeMap;

use crate::classifier::classify_pages;
use crate::composition::{SpecialIndex, build_component_tree};
use crate::config::Config;
use crate::discovery::discover_special_files;
use crate::error::Result;
use crate::formatter::write_generated;
use crate::merge::merge_component_trees;
use crate::model::{RouteStructure, SpecialKind};

pub const GENERATED_HEADER: &str = "// NOTE: This file should not be edited";

const TYPE_DEFINITIONS: &str = r#"export type ComponentTreeJson = {
  type: 'Layout' | 'Template' | 'ErrorBoundary' | 'Suspense' | 'Page';
  path: string;
  fallback?: 'Error' | 'NotFound' | 'Loading';
  children?: ComponentTreeJson[];
};

export type AppPathRoutes = {
  href: string;
  linkTypes: string;
  fileName: string;
  fileNames?: string[];
  componentTreeJson: ComponentTreeJson;
};"#;

/// 重複を含むページ単位のルート構造を集める (並列ルートは別々のエントリになる)
pub fn collect_route_structures(config: &Config) -> Vec<RouteStructure> {
    let app_dir = config.app_dir_str();
    let discovered = discover_special_files(&config.project_root, &config.app_root());
    let index = SpecialIndex::new(&discovered);

    let page_files = discovered
        .iter()
        .filter(|file| file.kind == SpecialKind::Page)
        .map(|file| file.path.as_str());

    classify_pages(page_files, &app_dir)
        .into_iter()
        .filter_map(|page| {
            let (Some(href), Some(link_types)) = (page.href, page.link_types) else {
                return None;
            };
            let component_tree_json = build_component_tree(&page.file, &app_dir, &index);
            Some(RouteStructure {
                href,
                link_types,
                file_name: page.file,
                file_names: None,
                component_tree_json,
            })
        })
        .collect()
}

/// linkTypes ごとに 1 エントリへまとめる。linkTypes の昇順で返す
pub fn dedupe_route_structures(routes: Vec<RouteStructure>) -> Result<Vec<RouteStructure>> {
    let mut groups: BTreeMap<String, Vec<RouteStructure>> = BTreeMap::new();
    for route in routes {
        groups.entry(route.link_types.clone()).or_default().push(route);
    }

    let mut unique = Vec::with_capacity(groups.len());
    for (link_types, mut items) in groups {
        if items.len() == 1 {
            unique.extend(items.pop());
            continue;
        }

        // 並列ルートのマージ
        let href = items[0].href.clone();
        let file_names: Vec<String> = items.iter().map(|item| item.file_name.clone()).collect();
        tracing::debug!("merging {} component trees for {}", items.len(), link_types);
        let component_tree_json =
            merge_component_trees(items.into_iter().map(|item| item.component_tree_json))?;

        unique.push(RouteStructure {
            href,
            link_types,
            file_name: String::new(),
            file_names: Some(file_names),
            component_tree_json,
        });
    }

    Ok(unique)
}

/// 生成対象のルート構造 (重複排除済み)
pub fn route_structures(config: &Config) -> Result<Vec<RouteStructure>> {
    config.validate()?;
    dedupe_route_structures(collect_route_structures(config))
}

fn ts_string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn ts_template_literal(value: &str) -> String {
    format!("`{}`", value.replace('\\', "\\\\").replace('`', "\\`"))
}

/// 型のユニオンを組み立てる。空なら `never`
fn union(members: &[String]) -> String {
    match members {
        [] => "never".to_string(),
        [single] => single.clone(),
        many => many
            .iter()
            .map(|member| format!("\n  | {member}"))
            .collect::<String>(),
    }
}

/// 生成する TypeScript モジュールの本文 (整形前)
pub fn render_routes_module(routes: &[RouteStructure]) -> Result<String> {
    let (dynamic, static_): (Vec<&RouteStructure>, Vec<&RouteStructure>) =
        routes.iter().partition(|route| route.is_dynamic());

    let static_paths: Vec<String> = static_
        .iter()
        .map(|route| ts_string_literal(&route.link_types))
        .collect();
    let dynamic_paths: Vec<String> = dynamic
        .iter()
        .map(|route| ts_template_literal(&route.link_types))
        .collect();

    let json = serde_json::to_string_pretty(routes)?;

    Ok(format!(
        "{GENERATED_HEADER}\n\
         import type {{ LiteralUnion }} from 'type-fest';\n\n\
         export type StaticPath = {};\n\n\
         export type TypedRoute = LiteralUnion<StaticPath, {}>;\n\n\
         {TYPE_DEFINITIONS}\n\n\
         export const appPathRoutes: AppPathRoutes[] = {json};\n",
        union(&static_paths),
        union(&dynamic_paths),
    ))
}

/// ルート型ファイルを生成して書き出す。整形に失敗した場合は何も書き込まない
pub fn generate_routes(config: &Config) -> Result<Vec<RouteStructure>> {
    let output = config.output_path();
    let routes = route_structures(config)?;
    write_generated(&render_routes_module(&routes)?, &output)?;

    tracing::info!("generated {} routes → {}", routes.len(), output.display());
    Ok(routes)
}
