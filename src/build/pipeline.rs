use crate::build::stages;
use crate::build::worker::{FailureFlag, RouteContext, WorkerReport, partition, run_worker};
use crate::config::SiteConfig;
use crate::error::{BuildError, Result};
use crate::nav::RouteNav;
use crate::nav::pagination::build_pagination;
use crate::plugin::registry::load_plugins;
use crate::plugin::{Contributions, Plugin};
use crate::route::{Route, RouteKind, resolve_assets, resolve_routes};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 文件数超过该值才拆分给多个 worker
pub const PARALLEL_THRESHOLD: usize = 10;

/// 写出任何文件之前完成的准备：插件、插件贡献与各路由的导航配置
pub struct Prepared {
    pub plugins: Vec<Box<dyn Plugin>>,
    pub contributions: Contributions,
    pub routes: Vec<PreparedRoute>,
}

pub struct PreparedRoute {
    pub route: Route,
    pub nav: RouteNav,
}

#[derive(Debug)]
pub struct RouteReport {
    pub mount_url: String,
    pub kind: RouteKind,
    pub rendered: usize,
    pub copied: usize,
    pub error: Option<BuildError>,
}

#[derive(Debug, Default)]
pub struct BuildReport {
    pub routes: Vec<RouteReport>,
    pub assets_copied: usize,
    pub asset_errors: Vec<BuildError>,
}

impl BuildReport {
    pub fn failed_routes(&self) -> impl Iterator<Item = &RouteReport> {
        self.routes.iter().filter(|r| r.error.is_some())
    }

    pub fn is_success(&self) -> bool {
        self.failed_routes().next().is_none() && self.asset_errors.is_empty()
    }

    pub fn rendered(&self) -> usize {
        self.routes.iter().map(|r| r.rendered).sum()
    }

    pub fn copied(&self) -> usize {
        self.routes.iter().map(|r| r.copied).sum()
    }
}

/// 加载插件并读取全部路由的导航配置，任何配置错误都在此处返回
pub fn prepare(doc_root: &Path, config: &SiteConfig) -> Result<Prepared> {
    let plugins = load_plugins(config, doc_root)?;
    let contributions = Contributions::collect(&plugins);
    tracing::info!("已加载 {} 个插件", plugins.len());

    let mut routes = Vec::new();
    for route in resolve_routes(config, doc_root) {
        // 目录缺失留到构建该路由时作为 IO 错误报告
        let nav = if route.source_dir.is_dir() {
            RouteNav::load(&route.source_dir, route.kind.requires_sidebar())?
        } else {
            RouteNav::default()
        };
        routes.push(PreparedRoute { route, nav });
    }

    Ok(Prepared {
        plugins,
        contributions,
        routes,
    })
}

/// 依次构建所有路由，再复制 assets 与插件文件
///
/// 单个路由失败不影响其他路由，失败信息记录在报告中。
pub fn execute(
    doc_root: &Path,
    config: &SiteConfig,
    prepared: &Prepared,
    output_root: &Path,
) -> BuildReport {
    tracing::info!("开始构建，共 {} 条路由", prepared.routes.len());
    let start = std::time::Instant::now();

    let mut report = BuildReport::default();
    for prepared_route in &prepared.routes {
        let route_report = build_route(prepared_route, config, prepared, output_root);
        match &route_report.error {
            Some(e) => tracing::error!("路由 {} 构建失败：{e}", route_report.mount_url),
            None => tracing::info!(
                "路由 {} 完成（生成 {} 页，复制 {} 个文件）",
                route_report.mount_url,
                route_report.rendered,
                route_report.copied
            ),
        }
        report.routes.push(route_report);
    }

    let assets = resolve_assets(config, doc_root, output_root);
    match stages::assets::copy_asset_routes(&assets) {
        Ok(n) => report.assets_copied += n,
        Err(e) => {
            tracing::error!("复制资源目录失败：{e}");
            report.asset_errors.push(e);
        }
    }
    match stages::assets::copy_plugin_files(&prepared.plugins, output_root) {
        Ok(n) => report.assets_copied += n,
        Err(e) => {
            tracing::error!("复制插件文件失败：{e}");
            report.asset_errors.push(e);
        }
    }

    tracing::info!(
        "构建完成，耗时 {:.2}s（生成 {} 页，复制 {} 个文件，资源 {} 个，失败路由 {} 条）",
        start.elapsed().as_secs_f64(),
        report.rendered(),
        report.copied(),
        report.assets_copied,
        report.failed_routes().count(),
    );
    report
}

fn build_route(
    prepared_route: &PreparedRoute,
    config: &SiteConfig,
    prepared: &Prepared,
    output_root: &Path,
) -> RouteReport {
    let PreparedRoute { route, nav } = prepared_route;
    let mut report = RouteReport {
        mount_url: route.mount_url.clone(),
        kind: route.kind,
        rendered: 0,
        copied: 0,
        error: None,
    };

    let files = match list_files(&route.source_dir) {
        Ok(files) => files,
        Err(e) => {
            report.error = Some(e);
            return report;
        }
    };
    if files.is_empty() {
        tracing::warn!("路由 {} 的目录为空：{}", route.mount_url, route.source_dir.display());
        return report;
    }

    let pagination = nav
        .sidebar
        .as_ref()
        .map(|sidebar| build_pagination(sidebar, &route.source_dir, &route.mount_url))
        .unwrap_or_default();
    let output_dir = route.output_dir(output_root);
    let failure = FailureFlag::default();
    let ctx = RouteContext {
        site: config,
        route,
        nav,
        pagination: &pagination,
        plugins: &prepared.plugins,
        contributions: &prepared.contributions,
        output_dir: &output_dir,
        failure: &failure,
    };

    let outcomes: Vec<Result<WorkerReport>> =
        if config.build.parallel && files.len() > PARALLEL_THRESHOLD {
            let chunks = partition(&files, rayon::current_num_threads());
            tracing::debug!(
                "路由 {} 共 {} 个文件，拆分为 {} 块并行处理",
                route.mount_url,
                files.len(),
                chunks.len()
            );
            chunks.par_iter().map(|chunk| run_worker(chunk, &ctx)).collect()
        } else {
            vec![run_worker(&files, &ctx)]
        };

    let mut totals = WorkerReport::default();
    let mut aborted = None;
    for outcome in outcomes {
        match outcome {
            Ok(worker) => totals += worker,
            Err(e) if e.is_aborted() => {
                aborted.get_or_insert(e);
            }
            Err(e) => {
                report.error.get_or_insert(e);
            }
        }
    }
    if report.error.is_none() {
        report.error = aborted;
    }
    report.rendered = totals.rendered;
    report.copied = totals.copied;
    report
}

/// 递归列出目录下的所有文件，按路径排序
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_files(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir).map_err(|e| BuildError::io(dir, e))? {
        let entry = entry.map_err(|e| BuildError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{PageRecord, ParsedFiles};

    fn site(parallel: bool) -> SiteConfig {
        SiteConfig::parse(&format!(
            r#"{{
                "site_name": "Teedoc", "site_slogon": "", "site_root_url": "/",
                "route": {{}}, "executable": {{}}, "plugins": {{}},
                "build": {{ "parallel": {parallel} }}
            }}"#
        ))
        .unwrap()
    }

    /// 把每个 .txt 渲染为页面，遇到 bad.txt 时失败
    struct Picky;

    impl Plugin for Picky {
        fn name(&self) -> &str {
            "picky"
        }

        fn parse_files(&self, files: &[PathBuf]) -> anyhow::Result<Option<ParsedFiles>> {
            let mut parsed = ParsedFiles::new();
            for file in files {
                if file.ends_with("bad.txt") {
                    anyhow::bail!("无法解析 {}", file.display());
                }
                let record = (file.extension().is_some_and(|e| e == "txt"))
                    .then(|| PageRecord::new("t", "<p>t</p>"));
                parsed.insert(file.clone(), record);
            }
            Ok(Some(parsed))
        }
    }

    fn prepared(source_dir: &Path, plugin: Box<dyn Plugin>) -> Prepared {
        Prepared {
            plugins: vec![plugin],
            contributions: Contributions::default(),
            routes: vec![PreparedRoute {
                route: Route {
                    kind: RouteKind::Pages,
                    mount_url: "/blog".into(),
                    source_dir: source_dir.to_path_buf(),
                },
                nav: RouteNav::default(),
            }],
        }
    }

    #[test]
    fn list_files_is_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("b/c")).unwrap();
        for name in ["z.md", "a.md", "b/c/d.md", "b/a.png"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let files = list_files(dir.path()).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(rel, ["a.md", "b/a.png", "b/c/d.md", "z.md"]);
    }

    #[test]
    fn missing_route_directory_is_io_error() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("blog");
        let report = execute(root.path(), &site(true), &prepared(&missing, Box::new(Picky)), &root.path().join("out"));
        let error = report.routes[0].error.as_ref().unwrap();
        assert!(matches!(error, BuildError::Io { path, .. } if *path == missing));
        assert!(!report.is_success());
    }

    #[test]
    fn parallel_route_reports_real_error_not_abort() {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("blog");
        std::fs::create_dir_all(&src).unwrap();
        for i in 0..30 {
            std::fs::write(src.join(format!("p{i:02}.txt")), "x").unwrap();
        }
        std::fs::write(src.join("bad.txt"), "x").unwrap();

        let report = execute(root.path(), &site(true), &prepared(&src, Box::new(Picky)), &root.path().join("out"));
        let error = report.routes[0].error.as_ref().unwrap();
        assert!(matches!(error, BuildError::Parse { plugin, .. } if plugin == "picky"));
    }

    #[test]
    fn sequential_route_renders_and_copies() {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("blog");
        std::fs::create_dir_all(&src).unwrap();
        for i in 0..12 {
            std::fs::write(src.join(format!("p{i:02}.txt")), "x").unwrap();
        }
        std::fs::write(src.join("cover.jpg"), "jpg").unwrap();

        let out = root.path().join("out");
        let report = execute(root.path(), &site(false), &prepared(&src, Box::new(Picky)), &out);
        assert!(report.is_success());
        assert_eq!(report.rendered(), 12);
        assert_eq!(report.copied(), 1);
        assert!(out.join("blog/p11.html").exists());
        assert!(out.join("blog/cover.jpg").exists());
    }

    #[test]
    fn parser_returning_nothing_fails_route() {
        struct Silent;
        impl Plugin for Silent {
            fn name(&self) -> &str {
                "silent"
            }
        }

        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("blog");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("a.txt"), "x").unwrap();

        let report = execute(root.path(), &site(true), &prepared(&src, Box::new(Silent)), &root.path().join("out"));
        assert!(matches!(report.routes[0].error, Some(BuildError::NoParser { .. })));
    }

    #[test]
    fn prepare_rejects_docs_route_without_sidebar() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("docs")).unwrap();
        let config = SiteConfig::parse(
            r#"{
                "site_name": "s", "site_slogon": "", "site_root_url": "/",
                "route": { "docs": { "/docs": "docs" } },
                "executable": {}, "plugins": {}
            }"#,
        )
        .unwrap();
        let err = prepare(root.path(), &config).err().unwrap();
        assert!(matches!(err, BuildError::Config(_)));
    }
}
