use crate::error::{BuildError, Result};
use serde::Deserialize;

/// 导航树中的一个节点（侧边栏、导航栏、页脚共用）
///
/// 带 `items` 的是分支节点，否则为叶子。`file` 与 `url` 互斥。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NavNode {
    pub label: Option<String>,
    pub file: Option<String>,
    pub url: Option<String>,
    pub target: Option<String>,
    pub position: Option<Position>,
    pub items: Option<Vec<NavNode>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Middle,
    Right,
    #[serde(other)]
    Other,
}

impl NavNode {
    /// 引用的源文件；配置中写成字符串 "null" 视为未设置
    pub fn file_ref(&self) -> Option<&str> {
        non_null(self.file.as_deref())
    }

    pub fn url_ref(&self) -> Option<&str> {
        non_null(self.url.as_deref())
    }

    pub fn is_branch(&self) -> bool {
        self.items.is_some()
    }

    pub fn children(&self) -> &[NavNode] {
        self.items.as_deref().unwrap_or_default()
    }

    /// ` target="..."` 属性片段，未设置时为空
    pub fn target_attr(&self) -> String {
        self.target
            .as_deref()
            .map(|t| format!(" target=\"{t}\""))
            .unwrap_or_default()
    }

    fn validate(&self, source: &str) -> Result<()> {
        if let (Some(file), Some(url)) = (self.file_ref(), self.url_ref()) {
            return Err(BuildError::config(format!(
                "{source} 中的导航项同时设置了 file（{file}）与 url（{url}）"
            )));
        }
        self.children().iter().try_for_each(|n| n.validate(source))
    }
}

#[cfg(test)]
impl NavNode {
    pub fn file_link(label: &str, file: &str) -> Self {
        Self {
            label: Some(label.into()),
            file: Some(file.into()),
            ..Self::default()
        }
    }

    pub fn url_link(label: &str, url: &str) -> Self {
        Self {
            label: Some(label.into()),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn branch(label: &str, items: Vec<NavNode>) -> Self {
        Self {
            label: Some(label.into()),
            items: Some(items),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

fn non_null(value: Option<&str>) -> Option<&str> {
    value.filter(|v| *v != "null")
}

/// 校验一组导航节点，`source` 用于错误信息定位
pub fn validate_items(items: &[NavNode], source: &str) -> Result<()> {
    items.iter().try_for_each(|n| n.validate(source))
}

/// sidebar.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SidebarConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<NavNode>,
}

/// config.json 中的 navbar
#[derive(Debug, Clone, Deserialize)]
pub struct NavbarConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_home_url")]
    pub home_url: String,
    #[serde(default)]
    pub logo: Logo,
    #[serde(default)]
    pub items: Vec<NavNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Logo {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// config.json 中的 footer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FooterConfig {
    #[serde(default)]
    pub items: Vec<NavNode>,
}

fn default_home_url() -> String { "/".into() }
