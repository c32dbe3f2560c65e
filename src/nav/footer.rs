use super::menu::{MenuContext, render_menu_node};
use super::{FooterConfig, Position, RenderedNode};

/// 渲染页脚，顶层项分到左、中、右三栏；未设置或无法识别的 position 归入中栏
pub fn render_footer(config: &FooterConfig, ctx: &MenuContext<'_>) -> RenderedNode {
    let mut left = String::from("<ul>\n");
    let mut middle = String::from("<ul>\n");
    let mut right = String::from("<ul>\n");
    let mut active = false;
    for item in &config.items {
        let rendered = render_menu_node(item, ctx).rendered;
        active |= rendered.active;
        let bucket = match item.position {
            Some(Position::Left) => &mut left,
            Some(Position::Right) => &mut right,
            _ => &mut middle,
        };
        bucket.push_str(&rendered.markup);
    }
    for bucket in [&mut left, &mut middle, &mut right] {
        bucket.push_str("</ul>\n");
    }

    let markup = format!(
        r#"
            <div id="footer">
                <div id="footer_left">
                    {left}
                </div>
                <div id="footer_middle">
                    {middle}
                </div>
                <div id="footer_right">
                    {right}
                </div>
            </div>"#
    );
    RenderedNode { markup, active }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::NavNode;

    fn column<'a>(markup: &'a str, id: &str) -> &'a str {
        let start = markup.find(&format!("<div id=\"{id}\">")).unwrap();
        let end = start + markup[start..].find("</div>").unwrap();
        &markup[start..end]
    }

    #[test]
    fn items_land_in_their_columns() {
        let mut unknown = NavNode::url_link("Unknown", "/u");
        unknown.position = Some(Position::Other);
        let config = FooterConfig {
            items: vec![
                NavNode::url_link("Left", "/l").with_position(Position::Left),
                NavNode::url_link("Right", "/r").with_position(Position::Right),
                NavNode::url_link("Default", "/d"),
                unknown,
            ],
        };
        let ctx = MenuContext {
            mount_url: "/d",
            page_url: "/d/index.html",
        };
        let rendered = render_footer(&config, &ctx);

        assert!(column(&rendered.markup, "footer_left").contains("Left"));
        assert!(column(&rendered.markup, "footer_right").contains("Right"));
        let middle = column(&rendered.markup, "footer_middle");
        assert!(middle.contains("Default") && middle.contains("Unknown"));
        assert!(middle.contains("<li class=\"active\"><a href=\"/d\">Default</a></li>"));
        assert!(rendered.active);
    }

    #[test]
    fn every_column_list_is_closed() {
        let rendered = render_footer(
            &FooterConfig::default(),
            &MenuContext {
                mount_url: "/",
                page_url: "/index.html",
            },
        );
        assert_eq!(rendered.markup.matches("<ul>").count(), 3);
        assert_eq!(rendered.markup.matches("</ul>").count(), 3);
    }
}
