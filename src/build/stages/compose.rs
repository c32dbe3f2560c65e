use crate::build::worker::RouteContext;
use crate::error::{BuildError, Result};
use crate::nav::pagination::SidebarEntry;
use crate::page::{Layout, PageRecord, ParsedFiles};
use indexmap::IndexMap;
use minijinja::{AutoEscape, Environment, context};
use std::path::PathBuf;
use std::sync::LazyLock;

/// 组装结果：源文件路径 → 完整 HTML；`None` 表示原样复制
pub type RenderedFiles = IndexMap<PathBuf, Option<String>>;

static TEMPLATES: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    // 所有插槽都是现成的 HTML 片段
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template("document.html", include_str!("../../../templates/document.html"))
        .unwrap();
    env.add_template("doc_layout.html", include_str!("../../../templates/doc_layout.html"))
        .unwrap();
    env.add_template("page_layout.html", include_str!("../../../templates/page_layout.html"))
        .unwrap();
    env
});

/// 组装页面所需的站点级信息
pub struct ComposeContext<'a> {
    pub site_name: &'a str,
    pub header_items: &'a [String],
    pub js_items: &'a [String],
    /// 当前页面在侧边栏中的位置，不在侧边栏中时为 None
    pub entry: Option<&'a SidebarEntry>,
}

pub fn compose_pages(pages: ParsedFiles, ctx: &RouteContext<'_>) -> Result<RenderedFiles> {
    let mut rendered = RenderedFiles::with_capacity(pages.len());
    for (path, record) in pages {
        let html = match record {
            Some(record) => {
                let compose_ctx = ComposeContext {
                    site_name: &ctx.site.site_name,
                    header_items: &ctx.contributions.header_items,
                    js_items: &ctx.contributions.js_items,
                    entry: ctx.pagination.get(&path),
                };
                let html = compose(&record, &compose_ctx).map_err(|source| BuildError::Render {
                    route: ctx.route.mount_url.clone(),
                    file: path.clone(),
                    source,
                })?;
                Some(html)
            }
            None => None,
        };
        rendered.insert(path, html);
    }
    Ok(rendered)
}

/// 把页面记录套入固定的文档结构
pub fn compose(record: &PageRecord, ctx: &ComposeContext<'_>) -> Result<String, minijinja::Error> {
    let page_title = if record.title.is_empty() {
        ctx.site_name.to_string()
    } else {
        format!("{} - {}", record.title, ctx.site_name)
    };
    let layout = match record.layout() {
        Layout::Doc => "doc_layout.html",
        Layout::Page => "page_layout.html",
    };

    TEMPLATES.get_template("document.html")?.render(context! {
        layout,
        page_title,
        title => &record.title,
        desc => &record.desc,
        keywords => &record.keywords,
        tags => &record.tags,
        body => &record.body,
        toc => record.toc.as_deref().unwrap_or_default(),
        sidebar => record.sidebar.as_deref().unwrap_or_default(),
        navbar => record.navbar.as_deref().unwrap_or_default(),
        footer => record.footer.as_deref().unwrap_or_default(),
        previous => ctx.entry.and_then(|e| e.previous.as_ref()),
        next => ctx.entry.and_then(|e| e.next.as_ref()),
        header_items => ctx.header_items,
        js_items => ctx.js_items,
    })
}
