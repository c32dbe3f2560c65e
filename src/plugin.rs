pub mod assets;
pub mod markdown;
pub mod registry;

use crate::page::ParsedFiles;
use indexmap::IndexMap;
use std::path::PathBuf;

/// 插件能力接口
///
/// 所有能力都有空的默认实现，插件只需实现自己关心的部分。
/// 构建期间插件在多个 worker 间共享，因此要求 `Send + Sync`。
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    /// 解析一组源文件为页面；不处理这批文件时返回 `Ok(None)`
    ///
    /// 结果中值为 `None` 的文件按原样复制到输出目录。
    fn parse_files(&self, files: &[PathBuf]) -> anyhow::Result<Option<ParsedFiles>> {
        let _ = files;
        Ok(None)
    }

    /// 插入 `<head>` 的片段（meta、link、script 等）
    fn header_items(&self) -> Vec<String> {
        Vec::new()
    }

    /// 插入文档末尾的脚本片段
    fn js_items(&self) -> Vec<String> {
        Vec::new()
    }

    /// 追加到导航栏右侧的条目
    fn navbar_items(&self) -> Vec<String> {
        Vec::new()
    }

    /// 需要复制到输出目录的文件：目标 URL 路径 → 源文件绝对路径
    fn copy_files(&self) -> IndexMap<String, PathBuf> {
        IndexMap::new()
    }
}

/// 所有插件贡献的页面片段，构建开始前收集一次
#[derive(Debug, Clone, Default)]
pub struct Contributions {
    pub header_items: Vec<String>,
    pub js_items: Vec<String>,
    /// 每个插件一组
    pub navbar_items: Vec<Vec<String>>,
}

impl Contributions {
    pub fn collect(plugins: &[Box<dyn Plugin>]) -> Self {
        let mut contributions = Self::default();
        for plugin in plugins {
            contributions.header_items.extend(plugin.header_items());
            contributions.js_items.extend(plugin.js_items());
            let navbar_items = plugin.navbar_items();
            if !navbar_items.is_empty() {
                contributions.navbar_items.push(navbar_items);
            }
        }
        contributions
    }
}
