use crate::config::SiteConfig;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// 文档：必须有 sidebar.json，页面使用双栏布局
    Docs,
    /// 普通页面：无侧边栏
    Pages,
}

impl RouteKind {
    pub fn requires_sidebar(self) -> bool {
        self == Self::Docs
    }
}

/// 展开后的一条路由：挂载 URL 与源目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub kind: RouteKind,
    /// 以 / 开头；除根路由外不以 / 结尾
    pub mount_url: String,
    pub source_dir: PathBuf,
}

impl Route {
    /// 该路由在输出根目录下对应的目录
    pub fn output_dir(&self, output_root: &Path) -> PathBuf {
        join_mount(output_root, &self.mount_url)
    }
}

/// 按 docs → pages 的顺序展开路由表，表内保持声明顺序
pub fn resolve_routes(config: &SiteConfig, doc_root: &Path) -> Vec<Route> {
    let docs = expand(&config.route.docs, doc_root, RouteKind::Docs);
    let pages = expand(&config.route.pages, doc_root, RouteKind::Pages);
    docs.chain(pages).collect()
}

/// assets 表：(目标目录, 源目录)，整目录复制
pub fn resolve_assets(
    config: &SiteConfig,
    doc_root: &Path,
    output_root: &Path,
) -> Vec<(PathBuf, PathBuf)> {
    config
        .route
        .assets
        .iter()
        .map(|(url, dir)| {
            let mount = normalize_mount_url(url);
            (join_mount(output_root, &mount), doc_root.join(dir))
        })
        .collect()
}

fn expand<'a>(
    table: &'a IndexMap<String, String>,
    doc_root: &'a Path,
    kind: RouteKind,
) -> impl Iterator<Item = Route> + 'a {
    table.iter().map(move |(url, dir)| Route {
        kind,
        mount_url: normalize_mount_url(url),
        source_dir: doc_root.join(dir),
    })
}

pub fn normalize_mount_url(url: &str) -> String {
    let trimmed = url.trim().trim_matches('/');
    format!("/{trimmed}")
}

fn join_mount(root: &Path, mount_url: &str) -> PathBuf {
    match mount_url.trim_start_matches('/') {
        "" => root.to_path_buf(),
        rel => root.join(rel),
    }
}
