//! teedoc：由页面片段与导航配置组装完整的静态文档站点

pub mod build;
pub mod check;
pub mod config;
pub mod error;
pub mod nav;
pub mod page;
pub mod plugin;
pub mod route;
