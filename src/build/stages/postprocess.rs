use super::compose::RenderedFiles;
use crate::config::SiteConfig;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(href|src)="([^"]*)""#).unwrap());

static CSS_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"url\((['"]?)([^'")]*)(['"]?)\)"#).unwrap());

/// 站点不挂在根路径时，为组装好的页面改写站内绝对路径
pub fn apply(documents: RenderedFiles, config: &SiteConfig) -> RenderedFiles {
    if config.is_root_mounted() {
        return documents;
    }
    let root_url = config.site_root_url.as_str();
    documents
        .into_iter()
        .map(|(path, html)| (path, html.map(|h| rewrite_root_urls(&h, root_url))))
        .collect()
}

/// 给以 / 开头（但不是 //）的 href、src 与 url(...) 加上站点前缀
pub fn rewrite_root_urls(html: &str, root_url: &str) -> String {
    if root_url == "/" {
        return html.to_string();
    }
    let html = ATTR_RE.replace_all(html, |caps: &Captures| {
        let attr = &caps[1];
        let value = &caps[2];
        format!(r#"{attr}="{}""#, prefixed(value, root_url))
    });
    CSS_URL_RE
        .replace_all(&html, |caps: &Captures| {
            let open = &caps[1];
            let value = &caps[2];
            let close = &caps[3];
            format!("url({open}{}{close})", prefixed(value, root_url))
        })
        .into_owned()
}

fn prefixed(value: &str, root_url: &str) -> String {
    if value.starts_with('/') && !value.starts_with("//") {
        format!("{root_url}{value}")
    } else {
        value.to_string()
    }
}
