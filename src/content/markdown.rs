//! Markdown rendering with heading anchors and syntax highlighting
//!
//! Rendering is a chain of adapters over the `pulldown-cmark` event stream:
//!
//! 1. parse markdown into events
//! 2. drop raw HTML unless the author is trusted
//! 3. give every heading a unique `id`
//! 4. replace fenced code blocks with class-highlighted HTML
//! 5. serialize to an HTML string
//!
//! The raw-HTML filter must run before the stages that emit generated HTML.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::VecDeque;
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::config::SiteConfig;
use crate::error::{ContentError, ContentResult};
use crate::helpers::{html_escape, AnchorSlugger};

const CLASS_STYLE: ClassStyle = ClassStyle::Spaced;

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
    allow_raw_html: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: "base16-ocean.dark".to_string(),
            highlight: true,
            line_numbers: false,
            allow_raw_html: true,
        }
    }

    /// Create from the site's `markdown` and `highlight` settings
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new()
            .with_theme(&config.highlight.theme)
            .with_highlight(config.highlight.enable)
            .with_line_numbers(config.highlight.line_number)
            .with_raw_html(config.markdown.allow_raw_html)
    }

    pub fn with_theme(mut self, theme: &str) -> Self {
        self.theme_name = theme.to_string();
        self
    }

    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn with_line_numbers(mut self, line_numbers: bool) -> Self {
        self.line_numbers = line_numbers;
        self
    }

    /// Trusted authors may embed raw HTML; otherwise it is stripped
    pub fn with_raw_html(mut self, allow: bool) -> Self {
        self.allow_raw_html = allow;
        self
    }

    /// Render markdown to HTML
    ///
    /// Never fails: malformed input (an unclosed fence, say) is closed at
    /// the end of the document.
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let allow_raw_html = self.allow_raw_html;
        let events = parser
            .filter(move |event| allow_raw_html || !matches!(event, Event::Html(_) | Event::InlineHtml(_)));
        let events = HeadingAnchors::new(events);
        let events = CodeBlocks::new(self, events);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events);

        let trimmed = html_output.trim_end().len();
        html_output.truncate(trimmed);
        html_output
    }

    /// Stylesheet for the highlight classes, built from the configured theme
    pub fn stylesheet(&self) -> ContentResult<String> {
        let theme = self.theme_set.themes.get(&self.theme_name).ok_or_else(|| {
            ContentError::Configuration(format!("unknown highlight theme: {}", self.theme_name))
        })?;

        css_for_theme_with_class_style(theme, CLASS_STYLE)
            .map_err(|e| ContentError::Configuration(format!("highlight theme {}: {}", self.theme_name, e)))
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let syntax = lang
            .filter(|_| self.highlight)
            .and_then(|lang| self.syntax_set.find_syntax_by_token(lang));

        let body = match syntax {
            Some(syntax) => match self.classed_html(code, syntax) {
                Ok(highlighted) => highlighted,
                Err(e) => {
                    tracing::debug!("Highlighting failed, rendering plain code: {}", e);
                    html_escape(code)
                }
            },
            None => html_escape(code),
        };

        let class_attr = lang
            .map(|lang| format!(r#" class="language-{}""#, html_escape(lang)))
            .unwrap_or_default();
        let block = format!("<pre><code{}>{}</code></pre>", class_attr, body);

        if self.line_numbers {
            add_line_numbers(&block, code, lang)
        } else {
            block
        }
    }

    fn classed_html(&self, code: &str, syntax: &SyntaxReference) -> Result<String, syntect::Error> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a rendered block in a table with a line-number gutter
fn add_line_numbers(block: &str, code: &str, lang: Option<&str>) -> String {
    let line_count = code.lines().count().max(1);

    let gutter = (1..=line_count)
        .map(|i| format!(r#"<span class="line-number">{}</span>"#, i))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        html_escape(lang.unwrap_or("plaintext")),
        gutter,
        block
    )
}

/// Language token of a fence info string (`rust,ignore` -> `rust`)
fn fence_language(info: &str) -> Option<String> {
    let lang = info
        .split(|c: char| c == ',' || c.is_whitespace())
        .next()
        .unwrap_or("");
    if lang.is_empty() {
        None
    } else {
        Some(lang.to_string())
    }
}

/// Assigns every heading an `id` derived from its text
struct HeadingAnchors<'a, I: Iterator<Item = Event<'a>>> {
    inner: I,
    pending: VecDeque<Event<'a>>,
    slugger: AnchorSlugger,
}

impl<'a, I: Iterator<Item = Event<'a>>> HeadingAnchors<'a, I> {
    fn new(inner: I) -> Self {
        Self {
            inner,
            pending: VecDeque::with_capacity(4),
            slugger: AnchorSlugger::new(),
        }
    }
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for HeadingAnchors<'a, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        match self.inner.next()? {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let mut text = String::new();
                for event in self.inner.by_ref() {
                    let is_end = matches!(event, Event::End(TagEnd::Heading(_)));
                    if let Event::Text(ref s) | Event::Code(ref s) = event {
                        text.push_str(s);
                    }
                    self.pending.push_back(event);
                    if is_end {
                        break;
                    }
                }

                let id = match id {
                    Some(explicit) => self.slugger.claim(explicit.to_string()),
                    None => self.slugger.slug(&text),
                };

                Some(Event::Start(Tag::Heading {
                    level,
                    id: Some(id.into()),
                    classes,
                    attrs,
                }))
            }
            event => Some(event),
        }
    }
}

/// Replaces code blocks with highlighted HTML
struct CodeBlocks<'r, I> {
    renderer: &'r MarkdownRenderer,
    inner: I,
}

impl<'r, I> CodeBlocks<'r, I> {
    fn new(renderer: &'r MarkdownRenderer, inner: I) -> Self {
        Self { renderer, inner }
    }
}

impl<'r, 'a, I: Iterator<Item = Event<'a>>> Iterator for CodeBlocks<'r, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = match self.inner.next()? {
            Event::Start(Tag::CodeBlock(kind)) => kind,
            event => return Some(event),
        };

        let lang = match kind {
            CodeBlockKind::Fenced(info) => fence_language(&info),
            CodeBlockKind::Indented => None,
        };

        let mut code = String::new();
        for event in self.inner.by_ref() {
            match event {
                Event::Text(text) => code.push_str(&text),
                Event::End(TagEnd::CodeBlock) => break,
                _ => {}
            }
        }

        let highlighted = self.renderer.highlight_code(&code, lang.as_deref());
        Some(Event::Html(CowStr::from(highlighted)))
    }
}
