use crate::build::stages;
use crate::config::SiteConfig;
use crate::error::{BuildError, Result};
use crate::nav::RouteNav;
use crate::nav::pagination::Pagination;
use crate::plugin::{Contributions, Plugin};
use crate::route::Route;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// 同一路由所有 worker 共享的失败标记，只会从 false 变为 true
#[derive(Debug, Default)]
pub struct FailureFlag(AtomicBool);

impl FailureFlag {
    pub fn trip(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_tripped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// 一条路由构建所需的只读上下文，在该路由的全部 worker 间共享
pub struct RouteContext<'a> {
    pub site: &'a SiteConfig,
    pub route: &'a Route,
    pub nav: &'a RouteNav,
    pub pagination: &'a Pagination,
    pub plugins: &'a [Box<dyn Plugin>],
    pub contributions: &'a Contributions,
    pub output_dir: &'a Path,
    pub failure: &'a FailureFlag,
}

impl RouteContext<'_> {
    /// 阶段边界检查：其他 worker 已失败时提前退出
    pub fn checkpoint(&self) -> Result<()> {
        if self.failure.is_tripped() {
            Err(BuildError::Aborted {
                route: self.route.mount_url.clone(),
            })
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub rendered: usize,
    pub copied: usize,
}

impl AddAssign for WorkerReport {
    fn add_assign(&mut self, other: Self) {
        self.rendered += other.rendered;
        self.copied += other.copied;
    }
}

/// 处理一组文件：解析 → 导航 → 组装 → 路径改写 → 写出
///
/// 任一阶段失败都会置位路由的失败标记；已写出的文件不回滚。
pub fn run_worker(files: &[PathBuf], ctx: &RouteContext<'_>) -> Result<WorkerReport> {
    let result = run_stages(files, ctx);
    if let Err(e) = &result
        && !e.is_aborted()
    {
        ctx.failure.trip();
    }
    result
}

fn run_stages(files: &[PathBuf], ctx: &RouteContext<'_>) -> Result<WorkerReport> {
    let parsed = stages::parse::parse_files(files, ctx)?;
    ctx.checkpoint()?;

    let pages = stages::navigate::attach_navigation(parsed, ctx);
    ctx.checkpoint()?;

    let documents = stages::compose::compose_pages(pages, ctx)?;
    ctx.checkpoint()?;

    let documents = stages::postprocess::apply(documents, ctx.site);
    ctx.checkpoint()?;

    stages::write::write_outputs(&documents, ctx)
}

/// 把文件列表切成不超过 `workers` 个连续、大小相近的块
pub fn partition<T>(items: &[T], workers: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return Vec::new();
    }
    let size = items.len().div_ceil(workers.max(1));
    items.chunks(size).collect()
}
