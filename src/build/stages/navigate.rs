use crate::build::worker::RouteContext;
use crate::nav::menu::MenuContext;
use crate::nav::navbar::render_navbar;
use crate::nav::footer::render_footer;
use crate::nav::sidebar::{SidebarContext, render_sidebar};
use crate::nav::url_for_file;
use crate::page::{PageRecord, ParsedFiles};
use std::path::Path;

/// 为每个页面挂上侧边栏、导航栏与页脚；原样复制的文件不变
pub fn attach_navigation(parsed: ParsedFiles, ctx: &RouteContext<'_>) -> ParsedFiles {
    parsed
        .into_iter()
        .map(|(path, record)| {
            let record = record.map(|r| navigate_page(r, &path, ctx));
            (path, record)
        })
        .collect()
}

fn navigate_page(record: PageRecord, path: &Path, ctx: &RouteContext<'_>) -> PageRecord {
    let mount_url = ctx.route.mount_url.as_str();
    let current_file = relative_file(path, &ctx.route.source_dir);
    let page_url = url_for_file(&current_file, mount_url);

    let mut record = record;
    if let Some(sidebar) = &ctx.nav.sidebar {
        let side_ctx = SidebarContext {
            mount_url,
            current_file: &current_file,
        };
        record = record.with_sidebar(render_sidebar(sidebar, &side_ctx).markup);
    }

    let menu_ctx = MenuContext {
        mount_url,
        page_url: &page_url,
    };
    if let Some(navbar) = &ctx.nav.navbar {
        let navbar = render_navbar(navbar, &menu_ctx, &ctx.contributions.navbar_items);
        record = record.with_navbar(navbar.markup);
    }
    if let Some(footer) = &ctx.nav.footer {
        record = record.with_footer(render_footer(footer, &menu_ctx).markup);
    }
    record
}

/// 源文件相对路由目录的路径，统一为 / 分隔
pub fn relative_file(path: &Path, source_dir: &Path) -> String {
    let rel = path.strip_prefix(source_dir).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}
