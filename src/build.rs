pub mod pipeline;
pub mod stages;
#[cfg(test)]
mod testing;
pub mod worker;

use crate::config::SiteConfig;
use crate::error::{BuildError, Result};
pub use pipeline::{BuildReport, RouteReport};
use std::path::Path;

/// 构建运行参数
#[derive(Debug, Default)]
pub struct BuildParams {
    pub clean: bool,
}

/// 构建整个站点
///
/// 配置错误在写出任何文件之前返回；路由级错误记录在报告中。
pub fn run(doc_root: &Path, config: &SiteConfig, params: BuildParams) -> Result<BuildReport> {
    let prepared = pipeline::prepare(doc_root, config)?;
    let output_root = config.output_root(doc_root);

    if params.clean && output_root.exists() {
        std::fs::remove_dir_all(&output_root).map_err(|e| BuildError::io(&output_root, e))?;
        tracing::info!("已清除输出目录：{}", output_root.display());
    }
    std::fs::create_dir_all(&output_root).map_err(|e| BuildError::io(&output_root, e))?;

    Ok(pipeline::execute(doc_root, config, &prepared, &output_root))
}
