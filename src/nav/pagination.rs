use super::{NavNode, SidebarConfig, normalize_file_ref, url_for_file};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub url: String,
    pub label: String,
}

/// 侧边栏展开后的一项，带上一篇 / 下一篇
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub current: NavLink,
    pub previous: Option<NavLink>,
    pub next: Option<NavLink>,
}

/// 以源文件绝对路径为键、按阅读顺序排列的分页表
pub type Pagination = IndexMap<PathBuf, SidebarEntry>;

/// 深度优先展开侧边栏，只收集同时带 label 与 file 的节点
///
/// 同一文件出现多次时保留第一次出现的位置、使用最后一次的标签。
pub fn build_pagination(config: &SidebarConfig, source_dir: &Path, mount_url: &str) -> Pagination {
    let mut links = IndexMap::new();
    collect(&config.items, source_dir, mount_url, &mut links);

    let ordered: Vec<(PathBuf, NavLink)> = links.into_iter().collect();
    ordered
        .iter()
        .enumerate()
        .map(|(i, (path, current))| {
            let previous = i.checked_sub(1).map(|p| ordered[p].1.clone());
            let next = ordered.get(i + 1).map(|(_, link)| link.clone());
            let entry = SidebarEntry {
                current: current.clone(),
                previous,
                next,
            };
            (path.clone(), entry)
        })
        .collect()
}

fn collect(
    nodes: &[NavNode],
    source_dir: &Path,
    mount_url: &str,
    links: &mut IndexMap<PathBuf, NavLink>,
) {
    for node in nodes {
        if let (Some(label), Some(file)) = (&node.label, node.file_ref()) {
            links.insert(
                source_dir.join(normalize_file_ref(file)),
                NavLink {
                    url: url_for_file(file, mount_url),
                    label: label.clone(),
                },
            );
        }
        collect(node.children(), source_dir, mount_url, links);
    }
}
