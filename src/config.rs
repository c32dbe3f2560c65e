use crate::error::{BuildError, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "site_config.json";

/// site_config.json 中必须出现的键
pub const REQUIRED_KEYS: &[&str] = &[
    "site_name",
    "site_slogon",
    "site_root_url",
    "route",
    "executable",
    "plugins",
];

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    pub site_name: String,
    pub site_slogon: String,
    /// 站点挂载的 URL 前缀，加载后为 "/" 或不以 "/" 结尾的 "/xxx"
    pub site_root_url: String,
    pub route: RouteConfig,
    pub executable: IndexMap<String, String>,
    pub plugins: IndexMap<String, PluginEntry>,
    #[serde(default)]
    pub build: BuildConfig,
}

/// 三张路由表：挂载 URL → 源目录（相对文档根目录）
#[derive(Debug, Default, Deserialize)]
pub struct RouteConfig {
    #[serde(default)]
    pub docs: IndexMap<String, String>,
    #[serde(default)]
    pub pages: IndexMap<String, String>,
    #[serde(default)]
    pub assets: IndexMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PluginEntry {
    /// 安装来源（pypi、git 地址或本地路径），构建时不使用
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub config: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_true")]
    pub parallel: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_output_dir() -> String { "out".into() }
fn default_true() -> bool { true }
fn default_log_level() -> String { "info".into() }

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            parallel: true,
            log_level: default_log_level(),
        }
    }
}

impl SiteConfig {
    /// 从文档根目录加载 site_config.json
    pub fn load(doc_root: &Path) -> Result<Self> {
        let config_path = doc_root.join(CONFIG_FILE);
        if !config_path.exists() {
            return Err(BuildError::config(format!(
                "找不到站点配置文件：{}",
                config_path.display()
            )));
        }
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| BuildError::io(&config_path, e))?;
        Self::parse(&content)
    }

    /// 解析配置文本：先检查必需键，再反序列化为强类型结构
    pub fn parse(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| BuildError::config(format!("{CONFIG_FILE} 格式错误：{e}")))?;

        let Some(object) = value.as_object() else {
            return Err(BuildError::config(format!("{CONFIG_FILE} 顶层必须是对象")));
        };
        if let Some(missing) = REQUIRED_KEYS.iter().find(|k| !object.contains_key(**k)) {
            return Err(BuildError::config(format!(
                "{CONFIG_FILE} 缺少 {missing}，必需的键：{REQUIRED_KEYS:?}"
            )));
        }

        let mut config: SiteConfig = serde_json::from_value(value)
            .map_err(|e| BuildError::config(format!("{CONFIG_FILE} 字段类型错误：{e}")))?;
        config.site_root_url = normalize_root_url(&config.site_root_url)?;
        Ok(config)
    }

    /// 输出根目录：{doc_root}/{output_dir}/{site_root_url 去掉开头的 /}
    pub fn output_root(&self, doc_root: &Path) -> PathBuf {
        let serve_root = self.serve_root(doc_root);
        match self.site_root_url.trim_start_matches('/') {
            "" => serve_root,
            sub => serve_root.join(sub),
        }
    }

    /// 静态文件服务的根目录，站点挂载在其下的 site_root_url 处
    pub fn serve_root(&self, doc_root: &Path) -> PathBuf {
        doc_root.join(&self.build.output_dir)
    }

    pub fn is_root_mounted(&self) -> bool {
        self.site_root_url == "/"
    }
}

fn normalize_root_url(url: &str) -> Result<String> {
    if !url.starts_with('/') {
        return Err(BuildError::config(format!(
            "site_root_url 必须以 / 开头：{url}"
        )));
    }
    let trimmed = url.trim_end_matches('/');
    if trimmed.is_empty() {
        Ok("/".into())
    } else {
        Ok(trimmed.to_string())
    }
}
