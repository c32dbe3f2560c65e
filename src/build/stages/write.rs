use super::compose::RenderedFiles;
use crate::build::worker::{RouteContext, WorkerReport};
use crate::error::{BuildError, Result};
use std::path::{Path, PathBuf};

/// 源文件在输出目录中的位置
///
/// 渲染过的文件改为 `.html`，文件名（去扩展名）为 readme 时改为 `index.html`；
/// 原样复制的文件保持原名。
pub fn destination_for(source: &Path, source_dir: &Path, dest_dir: &Path, rendered: bool) -> PathBuf {
    let rel = match source.strip_prefix(source_dir) {
        Ok(rel) => rel,
        Err(_) => source.file_name().map(Path::new).unwrap_or(source),
    };
    let dest = dest_dir.join(rel);
    if !rendered {
        return dest;
    }
    let is_readme = dest
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.eq_ignore_ascii_case("readme"));
    if is_readme {
        dest.with_file_name("index.html")
    } else {
        dest.with_extension("html")
    }
}

pub fn write_outputs(documents: &RenderedFiles, ctx: &RouteContext<'_>) -> Result<WorkerReport> {
    let mut report = WorkerReport::default();
    for (source, html) in documents {
        ctx.checkpoint()?;
        let dest = destination_for(source, &ctx.route.source_dir, ctx.output_dir, html.is_some());
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
        match html {
            Some(html) => {
                std::fs::write(&dest, html).map_err(|e| BuildError::io(&dest, e))?;
                report.rendered += 1;
                tracing::debug!("已生成 {}", dest.display());
            }
            None => {
                std::fs::copy(source, &dest).map_err(|e| BuildError::io(source, e))?;
                report.copied += 1;
                tracing::debug!("已复制 {}", dest.display());
            }
        }
    }
    Ok(report)
}
