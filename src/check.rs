use crate::config::SiteConfig;
use crate::nav::{RouteNav, SIDEBAR_FILE, SITE_NAV_FILE};
use crate::plugin::registry;
use crate::route::{resolve_routes, normalize_mount_url};
use anyhow::Result;
use std::path::Path;

pub struct CheckResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// 检查站点：配置文件、插件、各路由目录及其导航配置
pub fn run(doc_root: &Path) -> Result<CheckResult> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let config = match SiteConfig::load(doc_root) {
        Ok(config) => config,
        Err(e) => {
            errors.push(e.to_string());
            return Ok(CheckResult { errors, warnings });
        }
    };

    check_plugins(&config, doc_root, &mut errors);
    check_routes(&config, doc_root, &mut errors, &mut warnings);
    check_assets(&config, doc_root, &mut errors);

    Ok(CheckResult { errors, warnings })
}

fn check_plugins(config: &SiteConfig, doc_root: &Path, errors: &mut Vec<String>) {
    let unknown: Vec<_> = config
        .plugins
        .keys()
        .filter(|name| !registry::is_known(name))
        .collect();
    for name in &unknown {
        errors.push(format!("未知插件 <{name}>"));
    }
    // 名称都有效时再校验各插件的 config
    if unknown.is_empty()
        && let Err(e) = registry::load_plugins(config, doc_root)
    {
        errors.push(e.to_string());
    }
}

fn check_routes(
    config: &SiteConfig,
    doc_root: &Path,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    for route in resolve_routes(config, doc_root) {
        let dir = &route.source_dir;
        if !dir.is_dir() {
            errors.push(format!("路由 {} 的目录不存在：{}", route.mount_url, dir.display()));
            continue;
        }
        if route.kind.requires_sidebar() && !dir.join(SIDEBAR_FILE).exists() {
            errors.push(format!("文档路由 {} 缺少 {SIDEBAR_FILE}", route.mount_url));
            continue;
        }
        if !dir.join(SITE_NAV_FILE).exists() {
            warnings.push(format!(
                "路由 {} 没有 {SITE_NAV_FILE}，页面将不含导航栏与页脚",
                route.mount_url
            ));
        }
        if let Err(e) = RouteNav::load(dir, route.kind.requires_sidebar()) {
            errors.push(e.to_string());
        }
    }
}

fn check_assets(config: &SiteConfig, doc_root: &Path, errors: &mut Vec<String>) {
    for (url, dir) in &config.route.assets {
        if !doc_root.join(dir).is_dir() {
            errors.push(format!(
                "资源路由 {} 的目录不存在：{dir}",
                normalize_mount_url(url)
            ));
        }
    }
}
