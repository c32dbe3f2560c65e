use super::{NavNode, RenderedNode, SidebarConfig, normalize_file_ref, url_for_file};

/// 渲染侧边栏时的当前页信息
pub struct SidebarContext<'a> {
    pub mount_url: &'a str,
    /// 当前页面相对路由目录的路径（/ 分隔）
    pub current_file: &'a str,
}

/// 渲染完整侧边栏（含标题），返回 `#sidebar_wrapper` 片段
pub fn render_sidebar(config: &SidebarConfig, ctx: &SidebarContext<'_>) -> RenderedNode {
    let tree = render_items(&config.items, ctx);
    let markup = format!(
        r#"
            <div id="sidebar_wrapper">
                <div id="sidebar">
                    <div id="sidebar_title">
                        {title}
                    </div>
                    {tree}
                </div>
            </div>"#,
        title = config.title,
        tree = nested_list(&tree),
    );
    RenderedNode {
        markup,
        active: tree.active,
    }
}

fn render_items(items: &[NavNode], ctx: &SidebarContext<'_>) -> RenderedNode {
    RenderedNode::concat(items.iter().map(|item| render_node(item, ctx)))
}

/// 激活时带 show 展开，否则保持折叠
fn nested_list(children: &RenderedNode) -> String {
    let class = if children.active { "show" } else { "" };
    format!("<ul class=\"{class}\">\n{}</ul>\n", children.markup)
}

/// 递归渲染单个节点
///
/// 先渲染子节点；节点的激活状态 = 自身指向当前文件 OR 任一子孙激活。
pub fn render_node(node: &NavNode, ctx: &SidebarContext<'_>) -> RenderedNode {
    let children = node.items.as_deref().map(|items| render_items(items, ctx));
    let child_active = children.as_ref().is_some_and(|c| c.active);
    let self_active = node.label.is_some()
        && node
            .file_ref()
            .is_some_and(|f| normalize_file_ref(f) == ctx.current_file);
    let active = self_active || child_active;

    let mut markup = String::new();
    if let Some(label) = &node.label {
        let state = if self_active {
            "active"
        } else if child_active {
            "active_parent"
        } else {
            "not_active"
        };
        let indicator = match (node.is_branch(), active) {
            (false, _) => "",
            (true, true) => "sub_indicator",
            (true, false) => "sub_indicator sub_indicator_collapsed",
        };
        let item = if let Some(file) = node.file_ref() {
            let url = url_for_file(file, ctx.mount_url);
            format!(
                r#"<li class="{state} with_link"><a href="{url}"><span class="label">{label}</span><span class="{indicator}"></span></a>"#
            )
        } else if let Some(url) = node.url_ref() {
            let target = node.target_attr();
            format!(
                r#"<li class="{state} with_link"><a href="{url}"{target}><span class="label">{label}</span><span class="{indicator}"></span></a>"#
            )
        } else {
            format!(
                r#"<li class="{state} no_link"><a><span class="label">{label}</span><span class="{indicator}"></span></a>"#
            )
        };
        markup.push_str(&item);
    }
    if let Some(children) = &children {
        markup.push_str(&nested_list(children));
    }
    if node.label.is_some() {
        markup.push_str("</li>\n");
    }

    RenderedNode { markup, active }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn ctx(current: &str) -> SidebarContext<'_> {
        SidebarContext {
            mount_url: "/docs",
            current_file: current,
        }
    }

    #[test]
    fn active_leaf_markup() {
        let node = NavNode::file_link("A", "a.md");
        let rendered = render_node(&node, &ctx("a.md"));
        assert!(rendered.active);
        assert_eq!(
            rendered.markup,
            "<li class=\"active with_link\"><a href=\"/docs/a.html\"><span class=\"label\">A</span><span class=\"\"></span></a></li>\n"
        );
    }

    #[test]
    fn inactive_branch_is_collapsed() {
        let node = NavNode::branch("Dir", vec![NavNode::file_link("B", "dir/b.md")]);
        let rendered = render_node(&node, &ctx("a.md"));
        assert!(!rendered.active);
        assert!(rendered.markup.starts_with("<li class=\"not_active no_link\">"));
        assert!(rendered.markup.contains("sub_indicator sub_indicator_collapsed"));
        assert!(rendered.markup.contains("<ul class=\"\">"));
    }

    #[test]
    fn branch_with_active_child_expands_as_parent() {
        let node = NavNode::branch("Dir", vec![NavNode::file_link("B", "dir/b.md")]);
        let rendered = render_node(&node, &ctx("dir/b.md"));
        assert!(rendered.active);
        assert!(rendered.markup.starts_with("<li class=\"active_parent no_link\">"));
        assert!(rendered.markup.contains("<span class=\"sub_indicator\">"));
        assert!(rendered.markup.contains("<ul class=\"show\">"));
    }

    #[test]
    fn file_branch_active_itself_is_not_collapsed() {
        let mut node = NavNode::branch("Intro", vec![NavNode::file_link("B", "b.md")]);
        node.file = Some("README.md".into());
        let rendered = render_node(&node, &ctx("README.md"));
        assert!(rendered.active);
        assert!(rendered.markup.starts_with("<li class=\"active with_link\"><a href=\"/docs/index.html\">"));
        assert!(!rendered.markup.contains("sub_indicator_collapsed"));
    }

    #[test]
    fn url_item_is_never_self_active() {
        let mut node = NavNode::url_link("GitHub", "https://github.com");
        node.target = Some("_blank".into());
        let rendered = render_node(&node, &ctx("a.md"));
        assert!(!rendered.active);
        assert!(rendered.markup.contains("href=\"https://github.com\" target=\"_blank\""));
    }

    #[test]
    fn unlabelled_node_renders_only_children() {
        let node = NavNode {
            items: Some(vec![NavNode::file_link("A", "a.md")]),
            ..NavNode::default()
        };
        let rendered = render_node(&node, &ctx("a.md"));
        assert!(rendered.markup.starts_with("<ul class=\"show\">"));
        assert!(rendered.markup.ends_with("</li>\n</ul>\n"));
    }

    #[test]
    fn sidebar_wrapper_includes_title() {
        let config = SidebarConfig {
            title: "Guide".into(),
            items: vec![NavNode::file_link("A", "a.md")],
        };
        let rendered = render_sidebar(&config, &ctx("a.md"));
        assert!(rendered.markup.contains("<div id=\"sidebar_title\">"));
        assert!(rendered.markup.contains("Guide"));
        assert!(rendered.markup.contains("<ul class=\"show\">"));
    }

    fn arb_tree() -> impl Strategy<Value = NavNode> {
        let leaf = (0u8..6).prop_map(|i| NavNode::file_link(&format!("L{i}"), &format!("f{i}.md")));
        leaf.prop_recursive(4, 32, 4, |inner| {
            (prop::collection::vec(inner, 0..4), prop::option::of(0u8..6)).prop_map(
                |(items, file)| {
                    let mut node = NavNode::branch("B", items);
                    node.file = file.map(|i| format!("f{i}.md"));
                    node
                },
            )
        })
    }

    fn references(node: &NavNode, file: &str) -> bool {
        node.file_ref() == Some(file) || node.children().iter().any(|c| references(c, file))
    }

    fn check_every_subtree(node: &NavNode, file: &str) -> Result<(), TestCaseError> {
        let rendered = render_node(node, &ctx(file));
        prop_assert_eq!(rendered.active, references(node, file));
        node.children()
            .iter()
            .try_for_each(|child| check_every_subtree(child, file))
    }

    proptest! {
        #[test]
        fn branch_active_is_or_of_descendants(tree in arb_tree(), current in 0u8..8) {
            let file = format!("f{current}.md");
            check_every_subtree(&tree, &file)?;
        }
    }
}
