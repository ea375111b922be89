// src/model.rs
use serde::Serialize;
use std::fmt;

/// `linkTypes` で動的セグメントを置き換えるプレースホルダ
pub const DYNAMIC_PLACEHOLDER: &str = "${string}";

/// 分類済みのページファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRoute {
    /// プロジェクトルートからの相対パス (例: "src/app/users/[id]/page.tsx")
    pub file: String,

    /// 公開 URL パターン。private / intercepting / 並列ルートの下位ページは None
    pub href: Option<String>,

    /// 動的セグメントをプレースホルダに置き換えた型レベルのパターン
    pub link_types: Option<String>,
}

/// Next.js の特殊ファイル種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpecialKind {
    Layout,
    Template,
    Loading,
    Error,
    NotFound,
    Page,
}

impl SpecialKind {
    /// ファイル名の stem から種別を判定する (例: "not-found" → NotFound)
    pub fn from_stem(stem: &str) -> Option<Self> {
        match stem {
            "layout" => Some(Self::Layout),
            "template" => Some(Self::Template),
            "loading" => Some(Self::Loading),
            "error" => Some(Self::Error),
            "not-found" => Some(Self::NotFound),
            "page" => Some(Self::Page),
            _ => None,
        }
    }

    pub fn stem(self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Template => "template",
            Self::Loading => "loading",
            Self::Error => "error",
            Self::NotFound => "not-found",
            Self::Page => "page",
        }
    }

    /// この種別として認識される拡張子
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Page => &["ts", "tsx", "mdx"],
            _ => &["ts", "tsx"],
        }
    }

    /// 同一階層内での入れ子順。page は常に最内側なので固定値
    pub fn rank(self) -> u32 {
        match self {
            Self::Layout => 1,
            Self::Template => 2,
            Self::Loading => 3,
            Self::Error => 4,
            Self::NotFound => 5,
            Self::Page => 99,
        }
    }

    pub fn node_type(self) -> NodeType {
        match self {
            Self::Layout => NodeType::Layout,
            Self::Template => NodeType::Template,
            Self::Loading => NodeType::Suspense,
            Self::Error | Self::NotFound => NodeType::ErrorBoundary,
            Self::Page => NodeType::Page,
        }
    }

    pub fn fallback(self) -> Option<Fallback> {
        match self {
            Self::Error => Some(Fallback::Error),
            Self::NotFound => Some(Fallback::NotFound),
            Self::Loading => Some(Fallback::Loading),
            _ => None,
        }
    }
}

/// 祖先ディレクトリ走査中に見つかった特殊ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialFile {
    pub kind: SpecialKind,
    pub path: String,
    pub sort: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NodeType {
    Layout,
    Template,
    ErrorBoundary,
    Suspense,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Fallback {
    Error,
    NotFound,
    Loading,
}

/// 描画時のコンポーネント入れ子構造 (layout > template > boundary > page)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentTreeJson {
    #[serde(rename = "type")]
    pub node_type: NodeType,

    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Fallback>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentTreeJson>,
}

impl ComponentTreeJson {
    pub fn leaf(node_type: NodeType, path: impl Into<String>) -> Self {
        ComponentTreeJson {
            node_type,
            path: path.into(),
            fallback: None,
            children: Vec::new(),
        }
    }

    pub fn with_fallback(mut self, fallback: Option<Fallback>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_children(mut self, children: Vec<ComponentTreeJson>) -> Self {
        self.children = children;
        self
    }

    /// マージ時の同一性キー
    pub fn key(&self) -> (NodeType, &str) {
        (self.node_type, self.path.as_str())
    }
}

impl fmt::Display for ComponentTreeJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.node_type, self.path)
    }
}

/// 論理ルートごとに出力される単位
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStructure {
    pub href: String,

    pub link_types: String,

    /// 単一ファイル由来ならそのパス、マージ済みなら空文字
    pub file_name: String,

    /// マージ済みの場合、元になったページファイル一覧
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_names: Option<Vec<String>>,

    pub component_tree_json: ComponentTreeJson,
}

impl RouteStructure {
    pub fn is_dynamic(&self) -> bool {
        self.link_types.contains(DYNAMIC_PLACEHOLDER)
    }
}
