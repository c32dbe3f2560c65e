use std::path::{Path, PathBuf};
use thiserror::Error;

/// 站点构建过程中的错误
///
/// `Config` 在任何输出之前中止整个构建；其余错误只中止所在路由。
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("配置错误：{0}")]
    Config(String),

    #[error("路由 {route} 解析失败（插件 <{plugin}>）：{message}")]
    Parse {
        route: String,
        plugin: String,
        message: String,
    },

    #[error("路由 {route} 没有插件返回解析结果")]
    NoParser { route: String },

    #[error("文件操作失败 {}：{source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("插件 <{plugin}> 返回了不合约定的结果：{message}")]
    PluginContract { plugin: String, message: String },

    #[error("路由 {route} 渲染页面 {} 失败：{source}", file.display())]
    Render {
        route: String,
        file: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    /// 同路由的其他 worker 已失败，本 worker 提前退出
    #[error("路由 {route} 已中止")]
    Aborted { route: String },
}

impl BuildError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }
}

pub type Result<T, E = BuildError> = std::result::Result<T, E>;
