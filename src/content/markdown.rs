//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::{HighlightConfig, MarkdownConfig};

const FALLBACK_THEME: &str = "base16-ocean.dark";

/// Converts markdown text to HTML. Never fails: any input is valid markdown.
pub trait MarkdownTransform: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

/// pulldown-cmark renderer with optional syntect highlighting of code blocks
pub struct MarkdownRenderer {
    options: Options,
    highlighter: Option<Highlighter>,
}

struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a renderer with default settings
    pub fn new() -> Self {
        Self::with_config(&MarkdownConfig::default(), &HighlightConfig::default())
    }

    /// Create with custom settings
    pub fn with_config(markdown: &MarkdownConfig, highlight: &HighlightConfig) -> Self {
        let mut options = Options::empty();
        if markdown.gfm {
            options |= Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS;
        }
        if markdown.footnotes {
            options |= Options::ENABLE_FOOTNOTES;
        }
        if markdown.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }

        let highlighter = if highlight.enable {
            Highlighter::load(&highlight.theme, highlight.line_number)
        } else {
            None
        };

        Self {
            options,
            highlighter,
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownTransform for MarkdownRenderer {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);

        let Some(highlighter) = &self.highlighter else {
            let mut html_output = String::new();
            html::push_html(&mut html_output, parser);
            return html_output;
        };

        let mut events: Vec<Event> = Vec::new();
        // Language and text of the code block being collected
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            if let Some((lang, mut code)) = code_block.take() {
                match event {
                    Event::Text(text) => {
                        code.push_str(&text);
                        code_block = Some((lang, code));
                    }
                    Event::End(TagEnd::CodeBlock) => {
                        let highlighted = highlighter.highlight(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                    _ => code_block = Some((lang, code)),
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block = Some((code_block_lang(&kind), String::new()));
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }
}

/// First word of a fenced block's info string
fn code_block_lang(kind: &CodeBlockKind) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

impl Highlighter {
    fn load(theme_name: &str, line_numbers: bool) -> Option<Self> {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = match themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!(
                    "Unknown highlight theme {:?}, falling back to {}",
                    theme_name,
                    FALLBACK_THEME
                );
                match themes.remove(FALLBACK_THEME) {
                    Some(theme) => theme,
                    None => themes.into_values().next()?,
                }
            }
        };

        Some(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            line_numbers,
        })
    }

    /// Highlight a code block
    fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        match highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme) {
            Ok(highlighted) if self.line_numbers => {
                add_line_numbers(&highlighted, code.lines().count(), lang)
            }
            Ok(highlighted) => highlighted,
            Err(e) => {
                tracing::debug!("Highlighting {} block failed: {}", lang, e);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    html_escape::encode_double_quoted_attribute(lang),
                    html_escape::encode_text(code)
                )
            }
        }
    }
}

/// Wrap highlighted code in a gutter table
fn add_line_numbers(highlighted: &str, line_count: usize, lang: &str) -> String {
    let gutter = (1..=line_count)
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        html_escape::encode_double_quoted_attribute(lang),
        gutter,
        highlighted
    )
}
