//! 内置静态资源插件：按配置注入页面片段并复制文件
//!
//! ```json
//! "teedoc-plugin-assets": {
//!     "from": "builtin",
//!     "config": {
//!         "header_items": ["<link rel=\"stylesheet\" href=\"/static/css/theme.css\">"],
//!         "js_items": ["<script src=\"/static/js/theme.js\"></script>"],
//!         "navbar_items": ["<a href=\"/search.html\">搜索</a>"],
//!         "files": { "/static/js/theme.js": "theme/theme.js" }
//!     }
//! }
//! ```

use super::Plugin;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const NAME: &str = "teedoc-plugin-assets";

#[derive(Debug, Default, Deserialize)]
struct AssetsConfig {
    #[serde(default)]
    header_items: Vec<String>,
    #[serde(default)]
    js_items: Vec<String>,
    #[serde(default)]
    navbar_items: Vec<String>,
    #[serde(default)]
    files: IndexMap<String, PathBuf>,
}

pub struct AssetsPlugin {
    config: AssetsConfig,
}

impl AssetsPlugin {
    /// 相对源路径按文档根目录解析为绝对路径
    pub fn from_config(config: &serde_json::Value, doc_root: &Path) -> Result<Self> {
        let mut config: AssetsConfig = if config.is_null() {
            AssetsConfig::default()
        } else {
            serde_json::from_value(config.clone()).context("插件配置格式错误")?
        };
        for src in config.files.values_mut() {
            if src.is_relative() {
                *src = doc_root.join(&*src);
            }
        }
        Ok(Self { config })
    }
}

impl Plugin for AssetsPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn header_items(&self) -> Vec<String> {
        self.config.header_items.clone()
    }

    fn js_items(&self) -> Vec<String> {
        self.config.js_items.clone()
    }

    fn navbar_items(&self) -> Vec<String> {
        self.config.navbar_items.clone()
    }

    fn copy_files(&self) -> IndexMap<String, PathBuf> {
        self.config.files.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_sources_resolve_against_doc_root() {
        let config = serde_json::json!({
            "header_items": ["<meta name=\"x\">"],
            "files": { "/static/a.js": "theme/a.js", "/b.css": "/abs/b.css" }
        });
        let plugin = AssetsPlugin::from_config(&config, Path::new("/site")).unwrap();
        let files = plugin.copy_files();
        assert_eq!(files["/static/a.js"], PathBuf::from("/site/theme/a.js"));
        assert_eq!(files["/b.css"], PathBuf::from("/abs/b.css"));
        assert_eq!(plugin.header_items(), ["<meta name=\"x\">"]);
        assert!(plugin.js_items().is_empty());
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let config = serde_json::json!({ "header_items": "not a list" });
        assert!(AssetsPlugin::from_config(&config, Path::new("/site")).is_err());
    }

    #[test]
    fn parse_capability_is_not_provided() {
        let plugin = AssetsPlugin::from_config(&serde_json::Value::Null, Path::new("/")).unwrap();
        assert!(plugin.parse_files(&[PathBuf::from("a.md")]).unwrap().is_none());
    }
}
