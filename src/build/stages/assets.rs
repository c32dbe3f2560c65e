use crate::error::{BuildError, Result};
use crate::plugin::Plugin;
use std::path::{Path, PathBuf};

/// 整目录复制 assets 路由，目标目录已存在时先删除
pub fn copy_asset_routes(assets: &[(PathBuf, PathBuf)]) -> Result<usize> {
    let mut copied = 0;
    for (dest, src) in assets {
        if dest.exists() {
            std::fs::remove_dir_all(dest).map_err(|e| BuildError::io(dest, e))?;
        }
        copied += copy_dir_recursive(src, dest)?;
        tracing::info!("已复制资源目录 {} → {}", src.display(), dest.display());
    }
    Ok(copied)
}

/// 复制插件声明的文件：目标去掉开头的 / 后接到输出根目录下
pub fn copy_plugin_files(plugins: &[Box<dyn Plugin>], output_root: &Path) -> Result<usize> {
    let mut copied = 0;
    for plugin in plugins {
        for (dst, src) in plugin.copy_files() {
            if !src.is_absolute() {
                return Err(BuildError::PluginContract {
                    plugin: plugin.name().to_string(),
                    message: format!("源路径必须为绝对路径：{}", src.display()),
                });
            }
            let dest = output_root.join(dst.trim_start_matches('/'));
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
            }
            std::fs::copy(&src, &dest).map_err(|e| BuildError::io(&src, e))?;
            tracing::debug!("插件 <{}> 复制 {} → {}", plugin.name(), src.display(), dest.display());
            copied += 1;
        }
    }
    Ok(copied)
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<usize> {
    std::fs::create_dir_all(dest).map_err(|e| BuildError::io(dest, e))?;
    let mut copied = 0;
    for entry in std::fs::read_dir(src).map_err(|e| BuildError::io(src, e))? {
        let entry = entry.map_err(|e| BuildError::io(src, e))?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if src_path.is_dir() {
            copied += copy_dir_recursive(&src_path, &dest_path)?;
        } else {
            std::fs::copy(&src_path, &dest_path).map_err(|e| BuildError::io(&src_path, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}
