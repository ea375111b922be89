// src/classifier.rs
use regex::Regex;
use std::sync::LazyLock;

use crate::model::{DYNAMIC_PLACEHOLDER, PageRoute};

/// `(.)photo`, `(..)photo`, `(...)photo` のような intercepting route セグメント
static INTERCEPTING_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([.]{1,3}\)\w+").expect("static regex"));

/// `page.tsx` などページファイル自身のセグメント
static PAGE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"page\.(tsx|mdx|ts)$").expect("static regex"));

/// `(marketing)` のような route group セグメント
static GROUP_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(.+\)$").expect("static regex"));

fn is_private(segment: &str) -> bool {
    segment.starts_with('_')
}

fn is_parallel_slot(segment: &str) -> bool {
    segment.starts_with('@')
}

fn is_dynamic(segment: &str) -> bool {
    segment.starts_with('[') && segment.ends_with(']')
}

/// ページファイルのパスから href / linkTypes を導出する。
///
/// - `file`: project_root からの '/' 区切りパス (例: "src/app/users/[id]/page.tsx")
/// - `app_dir`: ルート定義ディレクトリ (例: "src/app")。先頭のこのセグメント群は取り除かれる
///
/// private フォルダ、intercepting route、並列ルートスロット直下以外のページは
/// `href: None` となり出力対象外。
pub fn classify_page(file: &str, app_dir: &str) -> PageRoute {
    let excluded = || PageRoute {
        file: file.to_string(),
        href: None,
        link_types: None,
    };

    // 1) 先頭の固定セグメント (src/app) を取り除く
    let skip = app_dir.split('/').filter(|s| !s.is_empty()).count();
    let segments: Vec<&str> = file.split('/').skip(skip).collect();

    // 2) 除外判定
    if segments.iter().any(|s| is_private(s)) {
        return excluded();
    }
    if segments.iter().any(|s| INTERCEPTING_SEGMENT.is_match(s)) {
        return excluded();
    }
    // 並列ルートはスロット直下の page のみ残す
    if let Some(slot_index) = segments.iter().position(|s| is_parallel_slot(s)) {
        let next_is_page = segments
            .get(slot_index + 1)
            .is_some_and(|next| PAGE_SEGMENT.is_match(next));
        if !next_is_page {
            return excluded();
        }
    }

    // 3) page セグメント・route group・スロットを除いて href を組み立てる
    let route_segments: Vec<&str> = segments
        .into_iter()
        .filter(|s| !PAGE_SEGMENT.is_match(s))
        .filter(|s| !GROUP_SEGMENT.is_match(s))
        .filter(|s| !is_parallel_slot(s))
        .collect();

    // 4) linkTypes は動的セグメントをプレースホルダに置き換える
    let link_type_segments: Vec<&str> = route_segments
        .iter()
        .map(|s| if is_dynamic(s) { DYNAMIC_PLACEHOLDER } else { *s })
        .collect();

    PageRoute {
        file: file.to_string(),
        href: Some(format!("/{}", route_segments.join("/"))),
        link_types: Some(format!("/{}", link_type_segments.join("/"))),
    }
}

/// すべてのページを分類し、出力対象 (href あり) のものだけをファイルパス順で返す
pub fn classify_pages<'a>(files: impl IntoIterator<Item = &'a str>, app_dir: &str) -> Vec<PageRoute> {
    let mut routes: Vec<PageRoute> = files
        .into_iter()
        .map(|file| classify_page(file, app_dir))
        .filter(|route| {
            if route.href.is_none() {
                tracing::debug!("skipping non-routable page {}", route.file);
            }
            route.href.is_some()
        })
        .collect();
    routes.sort_by(|a, b| a.file.cmp(&b.file));
    routes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn href(file: &str) -> Option<String> {
        classify_page(file, "src/app").href
    }

    fn link_types(file: &str) -> Option<String> {
        classify_page(file, "src/app").link_types
    }

    #[test]
    fn root_page_maps_to_slash() {
        assert_eq!(href("src/app/page.tsx").as_deref(), Some("/"));
        assert_eq!(link_types("src/app/page.tsx").as_deref(), Some("/"));
    }

    #[test]
    fn dynamic_segment_is_literal_in_href_and_placeholder_in_link_types() {
        let route = classify_page("src/app/users/[id]/page.tsx", "src/app");
        assert_eq!(route.href.as_deref(), Some("/users/[id]"));
        assert_eq!(route.link_types.as_deref(), Some("/users/${string}"));
    }

    #[test]
    fn private_folders_are_excluded() {
        assert_eq!(href("src/app/_components/page.tsx"), None);
        assert_eq!(href("src/app/blog/_draft/page.tsx"), None);
    }

    #[test]
    fn intercepting_routes_are_excluded() {
        assert_eq!(href("src/app/feed/(.)photo/[id]/page.tsx"), None);
        assert_eq!(href("src/app/feed/(..)photo/page.tsx"), None);
        assert_eq!(href("src/app/(...)photo/page.tsx"), None);
    }

    #[test]
    fn route_groups_are_stripped() {
        assert_eq!(href("src/app/(marketing)/about/page.tsx").as_deref(), Some("/about"));
    }

    #[test]
    fn only_immediate_slot_pages_are_kept() {
        assert_eq!(href("src/app/dashboard/@modal/page.tsx").as_deref(), Some("/dashboard"));
        assert_eq!(href("src/app/dashboard/@modal/settings/page.tsx"), None);
    }

    #[test]
    fn mdx_pages_are_routable() {
        assert_eq!(href("src/app/docs/page.mdx").as_deref(), Some("/docs"));
    }

    #[test]
    fn classify_pages_drops_excluded_and_sorts() {
        let routes = classify_pages(
            [
                "src/app/users/page.tsx",
                "src/app/_private/page.tsx",
                "src/app/about/page.tsx",
            ],
            "src/app",
        );
        let files: Vec<_> = routes.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(files, ["src/app/about/page.tsx", "src/app/users/page.tsx"]);
    }

    #[test]
    fn custom_app_dir_depth_is_respected() {
        let route = classify_page("app/blog/[slug]/page.tsx", "app");
        assert_eq!(route.href.as_deref(), Some("/blog/[slug]"));
    }
}
