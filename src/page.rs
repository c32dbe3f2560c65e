use indexmap::IndexMap;
use std::path::PathBuf;

/// 内容解析器产出的单个页面
///
/// 各构建阶段按值消费并返回填好一个导航片段的新记录，不做原地共享修改。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRecord {
    pub title: String,
    pub desc: String,
    pub keywords: Vec<String>,
    pub tags: Vec<String>,
    pub body: String,
    pub toc: Option<String>,
    pub metadata: serde_json::Map<String, serde_json::Value>,
    pub sidebar: Option<String>,
    pub navbar: Option<String>,
    pub footer: Option<String>,
}

impl PageRecord {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn with_sidebar(self, sidebar: String) -> Self {
        Self {
            sidebar: Some(sidebar),
            ..self
        }
    }

    pub fn with_navbar(self, navbar: String) -> Self {
        Self {
            navbar: Some(navbar),
            ..self
        }
    }

    pub fn with_footer(self, footer: String) -> Self {
        Self {
            footer: Some(footer),
            ..self
        }
    }

    /// 有侧边栏的页面使用文档布局，否则使用单栏页面布局
    pub fn layout(&self) -> Layout {
        if self.sidebar.is_some() {
            Layout::Doc
        } else {
            Layout::Page
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Doc,
    Page,
}

/// 一次解析的结果：源文件路径 → 页面；`None` 表示原样复制
pub type ParsedFiles = IndexMap<PathBuf, Option<PageRecord>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_follows_sidebar_presence_only() {
        let page = PageRecord::new("t", "<p>x</p>");
        assert_eq!(page.layout(), Layout::Page);
        let page = page.with_navbar("nav".into()).with_footer("foot".into());
        assert_eq!(page.layout(), Layout::Page);
        let doc = page.with_sidebar("side".into());
        assert_eq!(doc.layout(), Layout::Doc);
        assert_eq!(doc.navbar.as_deref(), Some("nav"));
        assert_eq!(doc.body, "<p>x</p>");
    }
}
