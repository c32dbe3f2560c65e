//! 内置 Markdown 解析插件：Front Matter + pulldown-cmark + syntect

use super::Plugin;
use crate::page::{PageRecord, ParsedFiles};
use anyhow::{Context, Result};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

pub const NAME: &str = "teedoc-plugin-markdown-parser";

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

#[derive(Debug, Deserialize)]
struct MarkdownConfig {
    #[serde(default = "default_extensions")]
    parse_extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["md".into(), "markdown".into()]
}

pub struct MarkdownParser {
    extensions: Vec<String>,
}

impl MarkdownParser {
    pub fn from_config(config: &serde_json::Value) -> Result<Self> {
        let config: MarkdownConfig = if config.is_null() {
            serde_json::from_value(serde_json::json!({}))?
        } else {
            serde_json::from_value(config.clone()).context("插件配置格式错误")?
        };
        Ok(Self {
            extensions: config.parse_extensions,
        })
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
    }
}

impl Plugin for MarkdownParser {
    fn name(&self) -> &str {
        NAME
    }

    fn parse_files(&self, files: &[PathBuf]) -> Result<Option<ParsedFiles>> {
        let mut parsed = ParsedFiles::with_capacity(files.len());
        for file in files {
            let record = if self.accepts(file) {
                let content = std::fs::read_to_string(file)
                    .with_context(|| format!("读取 {} 失败", file.display()))?;
                let page = parse_page(&content)
                    .with_context(|| format!("解析 {} 失败", file.display()))?;
                Some(page)
            } else {
                None
            };
            parsed.insert(file.clone(), record);
        }
        Ok(Some(parsed))
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawFrontMatter {
    title: Option<Scalar>,
    desc: Option<Scalar>,
    keywords: Option<StringList>,
    tags: Option<StringList>,

    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

/// 标题、描述写成数字或布尔值时按文本处理，如 `title: 2024`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// YAML 中既可以写列表，也可以写逗号分隔的字符串
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringList {
    Many(Vec<Scalar>),
    One(Scalar),
}

impl StringList {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::Many(items) => items.into_iter().map(Scalar::into_string).collect(),
            Self::One(s) => s
                .into_string()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

/// 解析单个 Markdown 文档为页面记录
///
/// Front Matter 结构不符（如 tags 写成映射）时返回错误，不会静默丢弃。
pub fn parse_page(content: &str) -> Result<PageRecord> {
    let matter = gray_matter::Matter::<gray_matter::engine::YAML>::new();
    let parsed = matter.parse(content);
    let front_matter: RawFrontMatter = match &parsed.data {
        None | Some(gray_matter::Pod::Null) => RawFrontMatter::default(),
        Some(pod) => pod.deserialize().context("Front Matter 格式错误")?,
    };

    let mut metadata = serde_json::Map::new();
    let mut extra: Vec<_> = front_matter.extra.into_iter().collect();
    extra.sort_by(|a, b| a.0.cmp(&b.0));
    metadata.extend(extra);

    let body = parsed.content;
    Ok(PageRecord {
        title: front_matter.title.map(Scalar::into_string).unwrap_or_default(),
        desc: front_matter.desc.map(Scalar::into_string).unwrap_or_default(),
        keywords: front_matter.keywords.map(StringList::into_vec).unwrap_or_default(),
        tags: front_matter.tags.map(StringList::into_vec).unwrap_or_default(),
        body: render_markdown(&body),
        toc: extract_toc(&body),
        metadata,
        ..PageRecord::default()
    })
}

/// Markdown → HTML；标题带锚点 id，代码块用 syntect 生成带 class 的高亮
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(source, options);

    let mut in_code_block = false;
    let mut code_lang = String::new();
    let mut code_text = String::new();
    let mut heading: Option<(HeadingLevel, Vec<Event>, String)> = None;

    let mut events: Vec<Event> = Vec::new();

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                code_text.clear();
                code_lang = match &kind {
                    CodeBlockKind::Fenced(lang) => lang.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                let html = highlight_code(&code_text, &code_lang).unwrap_or_else(|| {
                    format!(
                        "<pre><code class=\"language-{}\">{}</code></pre>",
                        html_escape_code(&code_lang),
                        html_escape_code(&code_text)
                    )
                });
                events.push(Event::Html(CowStr::from(html)));
            }
            Event::Text(text) if in_code_block => {
                code_text.push_str(&text);
            }
            Event::Start(Tag::Heading { level, .. }) => {
                heading = Some((level, Vec::new(), String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, inner, text)) = heading.take() {
                    let mut inner_html = String::new();
                    html::push_html(&mut inner_html, inner.into_iter());
                    let id = slugify_heading(&text);
                    events.push(Event::Html(CowStr::from(format!(
                        "<{level} id=\"{id}\">{inner_html}</{level}>\n"
                    ))));
                }
            }
            event => match &mut heading {
                Some((_, inner, text)) => {
                    if let Event::Text(t) | Event::Code(t) = &event {
                        text.push_str(t);
                    }
                    inner.push(event);
                }
                None => events.push(event),
            },
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}

fn highlight_code(code: &str, lang: &str) -> Option<String> {
    if lang.is_empty() {
        return None;
    }
    let syntax = SYNTAX_SET.find_syntax_by_token(lang)?;
    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
    for line in LinesWithEndings::from(code) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .ok()?;
    }
    let highlighted = generator.finalize();
    Some(format!(
        "<pre class=\"code-highlight\"><code class=\"language-{lang}\">{highlighted}</code></pre>"
    ))
}

fn html_escape_code(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// 从 Markdown 提取 h2–h4 目录
pub fn extract_toc(source: &str) -> Option<String> {
    let parser = Parser::new_ext(source, Options::empty());

    let mut headings: Vec<(usize, String)> = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level as usize, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = current.take()
                    && (2..=4).contains(&level)
                {
                    headings.push((level, text));
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = &mut current {
                    buf.push_str(&text);
                }
            }
            _ => {}
        }
    }

    if headings.is_empty() {
        return None;
    }

    let mut toc = String::from("<ul class=\"toc-list\">\n");
    for (level, text) in &headings {
        let indent = "  ".repeat(level - 2);
        toc.push_str(&format!(
            "{indent}<li class=\"toc-h{level}\"><a href=\"#{}\">{text}</a></li>\n",
            slugify_heading(text)
        ));
    }
    toc.push_str("</ul>");
    Some(toc)
}

fn slugify_heading(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
