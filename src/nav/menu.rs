//! 导航栏与页脚共用的菜单项渲染

use super::{NavNode, RenderedNode};
use std::borrow::Cow;

/// 判断菜单项激活所需的当前页信息
pub struct MenuContext<'a> {
    pub mount_url: &'a str,
    pub page_url: &'a str,
}

impl MenuContext<'_> {
    /// 菜单项 URL 等于当前路由挂载点或当前页面 URL 时激活
    ///
    /// 挂载点已去掉结尾的 /，比较前菜单 URL 也做同样处理。
    fn is_active(&self, url: &str) -> bool {
        let trimmed = match url.trim_end_matches('/') {
            "" => "/",
            t => t,
        };
        trimmed == self.mount_url || url == self.page_url
    }
}

/// 菜单项渲染结果，附带激活子孙的标签（用于分支标题后缀）
pub struct MenuItem {
    pub rendered: RenderedNode,
    pub active_label: Option<String>,
}

/// 外部链接（http 开头）保持原样，其余补齐开头的 /
pub fn normalize_menu_url(url: &str) -> Cow<'_, str> {
    if url.starts_with("http") || url.starts_with('/') {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("/{url}"))
    }
}

pub fn render_menu_node(node: &NavNode, ctx: &MenuContext<'_>) -> MenuItem {
    let link = node
        .label
        .as_ref()
        .and(node.url_ref())
        .map(normalize_menu_url);
    let self_active = link.as_deref().is_some_and(|url| ctx.is_active(url));

    let mut active_label = None;
    let mut child_active = false;
    let mut sub_list = String::new();
    if let Some(items) = &node.items {
        let mut html = String::new();
        for item in items {
            let child = render_menu_node(item, ctx);
            if child.active_label.is_some() {
                active_label = child.active_label;
            }
            child_active |= child.rendered.active;
            html.push_str(&child.rendered.markup);
        }
        sub_list = format!("<ul>{html}</ul>");
    }
    if active_label.is_none() && self_active {
        active_label = node.label.clone();
    }

    let label = node.label.as_deref().unwrap_or_default();
    let markup = match &link {
        Some(url) => {
            let class = if self_active { "active" } else { "" };
            let target = node.target_attr();
            format!("<li class=\"{class}\"><a href=\"{url}\"{target}>{label}</a>{sub_list}</li>\n")
        }
        None => {
            let suffix = match (&active_label, child_active) {
                (Some(active), true) => format!("<span class=\"active_label\">{active}</span>"),
                _ => String::new(),
            };
            format!("<li class=\"sub_items\"><a>{label}{suffix}</a>{sub_list}\n</li>\n")
        }
    };

    MenuItem {
        rendered: RenderedNode {
            markup,
            active: self_active || child_active,
        },
        active_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: MenuContext<'static> = MenuContext {
        mount_url: "/get_started/en",
        page_url: "/get_started/en/index.html",
    };

    #[test]
    fn relative_url_gains_leading_slash() {
        assert_eq!(normalize_menu_url("blog"), "/blog");
        assert_eq!(normalize_menu_url("/blog"), "/blog");
        assert_eq!(normalize_menu_url("https://github.com"), "https://github.com");
    }

    #[test]
    fn item_matching_mount_is_active() {
        let item = render_menu_node(&NavNode::url_link("Start", "get_started/en"), &CTX);
        assert!(item.rendered.active);
        assert_eq!(
            item.rendered.markup,
            "<li class=\"active\"><a href=\"/get_started/en\">Start</a></li>\n"
        );
        assert_eq!(item.active_label.as_deref(), Some("Start"));
    }

    #[test]
    fn external_url_is_untouched_and_inactive() {
        let item = render_menu_node(&NavNode::url_link("GitHub", "https://github.com/x"), &CTX);
        assert!(!item.rendered.active);
        assert!(item.rendered.markup.contains("href=\"https://github.com/x\""));
    }

    #[test]
    fn branch_without_url_shows_active_descendant_label() {
        let node = NavNode::branch(
            "Language: ",
            vec![
                NavNode::url_link("中文", "/get_started/zh"),
                NavNode::url_link("English", "/get_started/en"),
            ],
        );
        let item = render_menu_node(&node, &CTX);
        assert!(item.rendered.active);
        assert!(item.rendered.markup.starts_with(
            "<li class=\"sub_items\"><a>Language: <span class=\"active_label\">English</span></a><ul>"
        ));
    }

    #[test]
    fn branch_without_active_descendant_has_no_suffix() {
        let node = NavNode::branch("More", vec![NavNode::url_link("Blog", "/blog")]);
        let item = render_menu_node(&node, &CTX);
        assert!(!item.rendered.active);
        assert!(item.rendered.markup.starts_with("<li class=\"sub_items\"><a>More</a><ul>"));
    }

    #[test]
    fn trailing_slash_still_matches_mount() {
        let item = render_menu_node(&NavNode::url_link("Start", "/get_started/en/"), &CTX);
        assert!(item.rendered.active);
        assert_eq!(
            item.rendered.markup,
            "<li class=\"active\"><a href=\"/get_started/en/\">Start</a></li>\n"
        );
    }

    #[test]
    fn root_item_matches_root_mount_only() {
        let root = MenuContext { mount_url: "/", page_url: "/index.html" };
        assert!(render_menu_node(&NavNode::url_link("Home", "/"), &root).rendered.active);
        assert!(!render_menu_node(&NavNode::url_link("Home", "/"), &CTX).rendered.active);
    }
}
