use crate::build::worker::RouteContext;
use crate::error::{BuildError, Result};
use crate::page::ParsedFiles;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 按注册顺序调用插件解析一组文件，最后一个返回非空结果的插件生效
pub fn parse_files(files: &[PathBuf], ctx: &RouteContext<'_>) -> Result<ParsedFiles> {
    let requested: HashSet<&Path> = files.iter().map(PathBuf::as_path).collect();
    let mut result = None;

    for plugin in ctx.plugins {
        let parsed = plugin.parse_files(files).map_err(|e| BuildError::Parse {
            route: ctx.route.mount_url.clone(),
            plugin: plugin.name().to_string(),
            message: format!("{e:#}"),
        })?;

        if let Some(parsed) = parsed.filter(|p| !p.is_empty()) {
            if let Some(stray) = parsed.keys().find(|k| !requested.contains(k.as_path())) {
                return Err(BuildError::PluginContract {
                    plugin: plugin.name().to_string(),
                    message: format!("返回了未请求的文件 {}", stray.display()),
                });
            }
            tracing::debug!(
                "插件 <{}> 解析了 {} 个文件（路由 {}）",
                plugin.name(),
                parsed.len(),
                ctx.route.mount_url
            );
            result = Some(parsed);
        }
        ctx.checkpoint()?;
    }

    result.ok_or_else(|| BuildError::NoParser {
        route: ctx.route.mount_url.clone(),
    })
}
