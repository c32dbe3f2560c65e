use super::assets::{self, AssetsPlugin};
use super::markdown::{self, MarkdownParser};
use super::Plugin;
use crate::config::SiteConfig;
use crate::error::{BuildError, Result};
use std::path::Path;

/// 内置插件名
pub const BUILTIN_PLUGINS: &[&str] = &[markdown::NAME, assets::NAME];

pub fn is_known(name: &str) -> bool {
    BUILTIN_PLUGINS.contains(&name)
}

/// 按 site_config.json 中的声明顺序实例化插件
pub fn load_plugins(config: &SiteConfig, doc_root: &Path) -> Result<Vec<Box<dyn Plugin>>> {
    let mut plugins: Vec<Box<dyn Plugin>> = Vec::with_capacity(config.plugins.len());
    for (name, entry) in &config.plugins {
        let plugin: Box<dyn Plugin> = match name.as_str() {
            markdown::NAME => Box::new(
                MarkdownParser::from_config(&entry.config).map_err(|e| invalid(name, &e))?,
            ),
            assets::NAME => Box::new(
                AssetsPlugin::from_config(&entry.config, doc_root).map_err(|e| invalid(name, &e))?,
            ),
            _ => {
                return Err(BuildError::config(format!(
                    "未知插件 <{name}>，可用插件：{BUILTIN_PLUGINS:?}"
                )));
            }
        };
        tracing::debug!("已加载插件 <{name}>（来源：{}）", entry.from);
        plugins.push(plugin);
    }
    Ok(plugins)
}

fn invalid(name: &str, err: &anyhow::Error) -> BuildError {
    BuildError::config(format!("插件 <{name}> 配置无效：{err:#}"))
}
