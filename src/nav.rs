pub mod footer;
pub mod menu;
pub mod navbar;
pub mod node;
pub mod pagination;
pub mod sidebar;

pub use node::{FooterConfig, Logo, NavNode, NavbarConfig, Position, SidebarConfig};

use crate::error::{BuildError, Result};
use serde::Deserialize;
use std::path::Path;

pub const SIDEBAR_FILE: &str = "sidebar.json";
pub const SITE_NAV_FILE: &str = "config.json";

/// 一个导航节点的渲染结果：HTML 片段及其是否处于激活路径上
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedNode {
    pub markup: String,
    pub active: bool,
}

impl RenderedNode {
    /// 顺序拼接兄弟节点，激活状态取逻辑或
    pub fn concat(nodes: impl IntoIterator<Item = RenderedNode>) -> Self {
        nodes.into_iter().fold(Self::default(), |mut acc, node| {
            acc.markup.push_str(&node.markup);
            acc.active |= node.active;
            acc
        })
    }
}

/// 一条路由的导航配置，构建期间只读
#[derive(Debug, Clone, Default)]
pub struct RouteNav {
    pub sidebar: Option<SidebarConfig>,
    pub navbar: Option<NavbarConfig>,
    pub footer: Option<FooterConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct SiteNavFile {
    navbar: Option<NavbarConfig>,
    footer: Option<FooterConfig>,
}

impl RouteNav {
    /// 读取路由目录下的 sidebar.json 与 config.json
    ///
    /// config.json 缺失时 navbar/footer 省略；`requires_sidebar` 时缺少
    /// sidebar.json 为配置错误。
    pub fn load(dir: &Path, requires_sidebar: bool) -> Result<Self> {
        let sidebar = if requires_sidebar {
            let path = dir.join(SIDEBAR_FILE);
            if !path.exists() {
                return Err(BuildError::config(format!(
                    "文档目录缺少 {SIDEBAR_FILE}：{}",
                    path.display()
                )));
            }
            let sidebar: SidebarConfig = read_json(&path)?;
            node::validate_items(&sidebar.items, &path.display().to_string())?;
            Some(sidebar)
        } else {
            None
        };

        let path = dir.join(SITE_NAV_FILE);
        let site_nav: SiteNavFile = if path.exists() {
            read_json(&path)?
        } else {
            tracing::debug!("{} 不存在，省略导航栏与页脚", path.display());
            SiteNavFile::default()
        };
        let source = path.display().to_string();
        if let Some(navbar) = &site_nav.navbar {
            node::validate_items(&navbar.items, &source)?;
        }
        if let Some(footer) = &site_nav.footer {
            node::validate_items(&footer.items, &source)?;
        }

        Ok(Self {
            sidebar,
            navbar: site_nav.navbar,
            footer: site_nav.footer,
        })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| BuildError::config(format!("解析 {} 失败：{e}", path.display())))
}

/// 由源文件路径计算页面 URL
///
/// 去掉扩展名，文件名为 readme（不区分大小写）时改为 index，
/// 去掉开头的路径分隔符，再拼上路由挂载 URL 与 `.html` 后缀。
pub fn url_for_file(file: &str, mount_url: &str) -> String {
    let file = normalize_file_ref(file);
    let (dir, name) = match file.rsplit_once('/') {
        Some((dir, name)) => (dir, name),
        None => ("", file.as_str()),
    };
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    let stem = if stem.eq_ignore_ascii_case("readme") { "index" } else { stem };

    let mount = mount_url.trim_end_matches('/');
    if dir.is_empty() {
        format!("{mount}/{stem}.html")
    } else {
        format!("{mount}/{dir}/{stem}.html")
    }
}

/// 统一为 / 分隔、不带 ./ 或 / 前缀的相对路径
pub fn normalize_file_ref(file: &str) -> String {
    let file = file.replace('\\', "/");
    let mut rest = file.as_str();
    loop {
        let next = rest.trim_start_matches('/');
        let next = next.strip_prefix("./").unwrap_or(next);
        if next == rest {
            break;
        }
        rest = next;
    }
    rest.to_string()
}
