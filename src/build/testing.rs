//! 构建阶段单元测试共用的路由上下文

use crate::build::worker::{FailureFlag, RouteContext};
use crate::config::SiteConfig;
use crate::nav::RouteNav;
use crate::nav::pagination::Pagination;
use crate::plugin::{Contributions, Plugin};
use crate::route::{Route, RouteKind};
use std::path::{Path, PathBuf};

pub struct Fixture {
    pub site: SiteConfig,
    pub route: Route,
    pub nav: RouteNav,
    pub pagination: Pagination,
    pub plugins: Vec<Box<dyn Plugin>>,
    pub contributions: Contributions,
    pub output_dir: PathBuf,
    pub failure: FailureFlag,
}

impl Fixture {
    pub fn new(source_dir: &Path, output_dir: &Path) -> Self {
        let site = SiteConfig::parse(
            r#"{
                "site_name": "Teedoc", "site_slogon": "", "site_root_url": "/",
                "route": {}, "executable": {}, "plugins": {}
            }"#,
        )
        .unwrap();
        Self {
            site,
            route: Route {
                kind: RouteKind::Docs,
                mount_url: "/docs".into(),
                source_dir: source_dir.to_path_buf(),
            },
            nav: RouteNav::default(),
            pagination: Pagination::default(),
            plugins: Vec::new(),
            contributions: Contributions::default(),
            output_dir: output_dir.to_path_buf(),
            failure: FailureFlag::default(),
        }
    }

    pub fn ctx(&self) -> RouteContext<'_> {
        RouteContext {
            site: &self.site,
            route: &self.route,
            nav: &self.nav,
            pagination: &self.pagination,
            plugins: &self.plugins,
            contributions: &self.contributions,
            output_dir: &self.output_dir,
            failure: &self.failure,
        }
    }
}
