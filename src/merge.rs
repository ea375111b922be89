// src/merge.rs
use crate::error::{CodegenError, Result};
use crate::model::ComponentTreeJson;

/// 同じ linkTypes を持つ複数のコンポーネントツリーを 1 つにまとめる。
///
/// 先頭のツリーを初期値として左から順に畳み込む。入力が空なら `EmptyInput`。
pub fn merge_component_trees<I>(trees: I) -> Result<ComponentTreeJson>
where
    I: IntoIterator<Item = ComponentTreeJson>,
{
    let mut trees = trees.into_iter();
    let first = trees.next().ok_or(CodegenError::EmptyInput)?;
    Ok(trees.fold(first, |acc, tree| merge_node(&acc, &tree)))
}

/// 2 つのノードをマージした新しいノードを返す (入力は変更しない)。
///
/// `(type, path)` が一致すれば子同士を再帰的にマージし、
/// 一致しなければ `b` を `a` の末尾の子として追加する。
pub fn merge_node(a: &ComponentTreeJson, b: &ComponentTreeJson) -> ComponentTreeJson {
    if a.key() != b.key() {
        let mut children = a.children.clone();
        children.push(b.clone());
        return ComponentTreeJson {
            children,
            ..a.clone()
        };
    }

    ComponentTreeJson {
        node_type: a.node_type,
        path: a.path.clone(),
        fallback: a.fallback.or(b.fallback),
        children: merge_children(&a.children, &b.children),
    }
}

/// 子リストのマージ。既存の並びを保ったまま、一致しない子を末尾に追加する
pub fn merge_children(a: &[ComponentTreeJson], b: &[ComponentTreeJson]) -> Vec<ComponentTreeJson> {
    let mut result: Vec<ComponentTreeJson> = a.to_vec();

    for b_child in b {
        match result.iter().position(|a_child| a_child.key() == b_child.key()) {
            Some(idx) => {
                let merged = merge_node(&result[idx], b_child);
                result[idx] = merged;
            }
            None => result.push(b_child.clone()),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Fallback, NodeType};

    fn node(node_type: NodeType, path: &str, children: Vec<ComponentTreeJson>) -> ComponentTreeJson {
        ComponentTreeJson::leaf(node_type, path).with_children(children)
    }

    fn page(path: &str) -> ComponentTreeJson {
        ComponentTreeJson::leaf(NodeType::Page, path)
    }

    /// 兄弟の並び順を無視して比較するための正規化
    fn canonical(tree: &ComponentTreeJson) -> ComponentTreeJson {
        let mut children: Vec<_> = tree.children.iter().map(canonical).collect();
        children.sort_by(|x, y| x.key().cmp(&y.key()));
        ComponentTreeJson {
            children,
            ..tree.clone()
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = merge_component_trees(Vec::<ComponentTreeJson>::new()).unwrap_err();
        assert!(matches!(err, CodegenError::EmptyInput));
    }

    #[test]
    fn single_tree_is_returned_unchanged() {
        let tree = node(NodeType::Layout, "l", vec![page("p")]);
        assert_eq!(merge_component_trees(vec![tree.clone()]).unwrap(), tree);
    }

    #[test]
    fn shared_root_unions_children() {
        let a = node(NodeType::Layout, "src/app/layout.tsx", vec![page("src/app/page.tsx")]);
        let b = node(
            NodeType::Layout,
            "src/app/layout.tsx",
            vec![page("src/app/@modal/page.tsx")],
        );

        let merged = merge_component_trees(vec![a, b]).unwrap();
        assert_eq!(merged.path, "src/app/layout.tsx");
        let paths: Vec<_> = merged.children.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, ["src/app/page.tsx", "src/app/@modal/page.tsx"]);
    }

    #[test]
    fn different_roots_append_as_child() {
        let a = node(NodeType::Layout, "a/layout.tsx", vec![page("a/page.tsx")]);
        let b = node(NodeType::Template, "b/template.tsx", vec![page("b/page.tsx")]);

        let merged = merge_node(&a, &b);
        assert_eq!(merged.key(), a.key());
        assert_eq!(merged.children.len(), 2);
        assert_eq!(merged.children[1], b);
    }

    #[test]
    fn deep_matches_are_merged_recursively() {
        let a = node(
            NodeType::Layout,
            "root",
            vec![node(NodeType::Template, "t", vec![page("p1")])],
        );
        let b = node(
            NodeType::Layout,
            "root",
            vec![node(NodeType::Template, "t", vec![page("p2")])],
        );

        let merged = merge_node(&a, &b);
        assert_eq!(merged.children.len(), 1);
        let template = &merged.children[0];
        let paths: Vec<_> = template.children.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, ["p1", "p2"]);
    }

    #[test]
    fn same_path_different_type_does_not_match() {
        let a = node(NodeType::Layout, "root", vec![page("x")]);
        let b = node(NodeType::Layout, "root", vec![node(NodeType::Template, "x", vec![])]);
        let merged = merge_node(&a, &b);
        assert_eq!(merged.children.len(), 2);
    }

    #[test]
    fn fallback_prefers_accumulator() {
        let a = ComponentTreeJson::leaf(NodeType::ErrorBoundary, "e").with_fallback(Some(Fallback::Error));
        let b = ComponentTreeJson::leaf(NodeType::ErrorBoundary, "e")
            .with_fallback(Some(Fallback::NotFound));
        assert_eq!(merge_node(&a, &b).fallback, Some(Fallback::Error));

        let none = ComponentTreeJson::leaf(NodeType::ErrorBoundary, "e");
        assert_eq!(merge_node(&none, &b).fallback, Some(Fallback::NotFound));
    }

    #[test]
    fn merge_is_commutative_for_compatible_trees() {
        let a = node(
            NodeType::Layout,
            "root",
            vec![node(NodeType::Suspense, "loading", vec![page("p1")])],
        );
        let b = node(
            NodeType::Layout,
            "root",
            vec![node(NodeType::Suspense, "loading", vec![page("p2")]), page("p3")],
        );

        assert_eq!(canonical(&merge_node(&a, &b)), canonical(&merge_node(&b, &a)));
        // 同一のツリー同士なら並び順まで一致する
        assert_eq!(merge_node(&a, &a), a);
    }

    #[test]
    fn merge_is_associative_for_compatible_trees() {
        let a = node(NodeType::Layout, "root", vec![page("p1")]);
        let b = node(NodeType::Layout, "root", vec![page("p2")]);
        let c = node(NodeType::Layout, "root", vec![page("p3")]);

        let left = merge_node(&merge_node(&a, &b), &c);
        let right = merge_node(&a, &merge_node(&b, &c));
        assert_eq!(left, right);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let a = node(NodeType::Layout, "root", vec![page("p1")]);
        let b = node(NodeType::Layout, "root", vec![page("p2")]);
        let before = (a.clone(), b.clone());
        let _ = merge_node(&a, &b);
        assert_eq!((a, b), before);
    }
}
