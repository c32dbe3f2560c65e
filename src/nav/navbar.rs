use super::menu::{MenuContext, render_menu_node};
use super::{NavbarConfig, Position, RenderedNode};

/// 渲染导航栏
///
/// 仅顶层项按 position 分左右；`plugin_items` 每个插件一组，追加在右侧。
pub fn render_navbar(
    config: &NavbarConfig,
    ctx: &MenuContext<'_>,
    plugin_items: &[Vec<String>],
) -> RenderedNode {
    let mut left = String::from("<ul id=\"nav_left\">\n");
    let mut right = String::from("<ul id=\"nav_right\">\n");
    let mut active = false;
    for item in &config.items {
        let rendered = render_menu_node(item, ctx).rendered;
        active |= rendered.active;
        if item.position == Some(Position::Right) {
            right.push_str(&rendered.markup);
        } else {
            left.push_str(&rendered.markup);
        }
    }
    left.push_str("</ul>\n");
    right.push_str("</ul>\n");

    let plugins: String = plugin_items
        .iter()
        .filter(|items| !items.is_empty())
        .map(|items| {
            let lis: String = items.iter().map(|i| format!("<li>{i}</li>")).collect();
            format!("<ul id=\"nav_plugins\">{lis}</ul>")
        })
        .collect();

    let logo = format!(
        r#"<a class="site_title" href="{home}"><img class="site_logo" src="{src}" alt="{alt}"><h2>{title}</h2></a>"#,
        home = config.home_url,
        src = config.logo.src,
        alt = config.logo.alt,
        title = config.title,
    );

    let markup = format!(
        r#"
            <div id="navbar">
                <div id="navbar_menu">
                    {logo}
                    <a id="navbar_menu_btn"></a>
                </div>
                <div id="navbar_items">
                    <div>
                        {left}
                    </div>
                    <div>
                        {right}
                        {plugins}
                    </div>
                </div>
            </div>"#
    );
    RenderedNode { markup, active }
}
