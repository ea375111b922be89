// src/tree.rs
use serde::Serialize;

/// href の一覧から組み立てたフォルダツリーのノード
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeRoute {
    /// ルートからのパス (例: "/users/[id]")
    pub path: String,
    /// 最後のセグメント (例: "[id]")
    pub name: String,
    /// このパス自体がルートとして存在するか
    pub has_path: bool,
    pub children: Vec<TreeRoute>,
}

/// 子を持たない形に平坦化したノード
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedRoute {
    pub path: String,
    pub name: String,
    pub has_path: bool,
}

/// '/' 区切りのルート一覧からツリーを構築する。
/// 兄弟はフォルダ (子を持つノード) を先に、その後は名前順に並べる
pub fn build_tree<S: AsRef<str>>(routes: &[S]) -> Vec<TreeRoute> {
    let mut roots: Vec<TreeRoute> = Vec::new();

    for route in routes {
        let mut level = &mut roots;
        let mut current_path = String::new();

        for segment in route.as_ref().split('/').filter(|s| !s.is_empty()) {
            current_path.push('/');
            current_path.push_str(segment);

            let idx = match level.iter().position(|node| node.path == current_path) {
                Some(idx) => idx,
                None => {
                    level.push(TreeRoute {
                        path: current_path.clone(),
                        name: segment.to_string(),
                        has_path: routes.iter().any(|r| r.as_ref() == current_path),
                        children: Vec::new(),
                    });
                    level.len() - 1
                }
            };
            level = &mut level[idx].children;
        }
    }

    sort_tree_nodes(roots)
}

fn sort_tree_nodes(nodes: Vec<TreeRoute>) -> Vec<TreeRoute> {
    let mut nodes: Vec<TreeRoute> = nodes
        .into_iter()
        .map(|node| TreeRoute {
            children: sort_tree_nodes(node.children),
            ..node
        })
        .collect();

    nodes.sort_by(|a, b| {
        let a_is_folder = !a.children.is_empty();
        let b_is_folder = !b.children.is_empty();
        b_is_folder.cmp(&a_is_folder).then_with(|| a.name.cmp(&b.name))
    });
    nodes
}

/// 深さ優先 (行きがけ順) でノードを平坦化する
pub fn flatten_tree(tree: &[TreeRoute]) -> Vec<FlattenedRoute> {
    let mut result = Vec::new();
    traverse(tree, &mut result);
    result
}

fn traverse(nodes: &[TreeRoute], result: &mut Vec<FlattenedRoute>) {
    for node in nodes {
        result.push(FlattenedRoute {
            path: node.path.clone(),
            name: node.name.clone(),
            has_path: node.has_path,
        });
        traverse(&node.children, result);
    }
}

/// 子を持つノード (フォルダ) のパスを行きがけ順で返す
pub fn all_folder_paths(items: &[TreeRoute]) -> Vec<String> {
    items
        .iter()
        .filter(|item| !item.children.is_empty())
        .flat_map(|item| {
            std::iter::once(item.path.clone()).chain(all_folder_paths(&item.children))
        })
        .collect()
}
