//! Markdown rendering with syntax highlighting
//!
//! Post bodies are Markdown with embedded inline components (capitalized
//! tags, MDX-style). Rendering is deterministic for identical input, and
//! malformed component syntax is reported as an error rather than dropped.

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;
use thiserror::Error;

/// Reading speed used for the reading-time estimate
const WORDS_PER_MINUTE: usize = 200;

lazy_static! {
    /// Opening or closing embedded-component tag (capitalized name)
    static ref COMPONENT_TAG: Regex = Regex::new(r"<(/?)([A-Z][A-Za-z0-9]*)([^<>]*)>").unwrap();
    /// Fenced code blocks and inline code spans, excluded from component checks
    static ref CODE_REGION: Regex = Regex::new(r"(?s)```.*?```|`[^`\n]*`").unwrap();
}

/// Body rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unclosed component <{0}>")]
    UnclosedComponent(String),

    #[error("unexpected closing tag </{0}>")]
    UnexpectedClosingTag(String),
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: "base16-ocean.dark".to_string(),
        }
    }

    /// Create with a custom highlight theme
    pub fn with_theme(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Render a post body to HTML
    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        check_components(markdown)?;

        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_MATH
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_lang: Option<String> = None;
        let mut code_buf = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_buf.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted = self.highlight_code(&code_buf, code_lang.take().as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                }
                Event::Text(text) if in_code_block => {
                    code_buf.push_str(&text);
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .unwrap_or_else(|| {
                self.theme_set
                    .themes
                    .values()
                    .next()
                    .expect("No themes available")
            });

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => format!(
                r#"<div class="highlight language-{}">{}</div>"#,
                lang, highlighted
            ),
            Err(_) => {
                // Fallback to plain code block
                let escaped = html_escape(code);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    lang, escaped
                )
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Verify that embedded component tags are balanced.
/// Code blocks and inline code are out of bounds for the scan.
fn check_components(markdown: &str) -> Result<(), RenderError> {
    let prose = CODE_REGION.replace_all(markdown, "");
    let mut open: Vec<String> = Vec::new();

    for cap in COMPONENT_TAG.captures_iter(&prose) {
        let closing = &cap[1] == "/";
        let name = cap[2].to_string();
        let self_closing = cap[3].trim_end().ends_with('/');

        if closing {
            match open.pop() {
                Some(expected) if expected == name => {}
                _ => return Err(RenderError::UnexpectedClosingTag(name)),
            }
        } else if !self_closing {
            open.push(name);
        }
    }

    match open.pop() {
        Some(name) => Err(RenderError::UnclosedComponent(name)),
        None => Ok(()),
    }
}

/// Estimate reading time from the body's word count ("5 min read").
/// Identical content always yields the identical estimate.
pub fn estimate_reading_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
