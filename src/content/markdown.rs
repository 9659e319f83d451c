//! Markdown rendering with syntax highlighting and heading anchors

use anyhow::Result;
use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use std::collections::HashSet;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::TocEntry;
use crate::helpers::html_escape;

/// Output of rendering one markdown document
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
    toc_max_depth: u8,
}

/// Heading whose events are buffered until its text (and so its id) is known
struct PendingHeading<'a> {
    level: HeadingLevel,
    id: Option<CowStr<'a>>,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    inner: Vec<Event<'a>>,
    text: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false, 3)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool, toc_max_depth: u8) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
            toc_max_depth,
        }
    }

    /// Render markdown to HTML, collecting table of contents entries
    pub fn render(&self, markdown: &str) -> Result<Rendered> {
        // Front matter is stripped beforehand, so no metadata block option
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut toc = Vec::new();
        let mut used_ids: HashSet<String> = HashSet::new();
        let mut pending: Option<PendingHeading> = None;
        let mut code_block: Option<Option<String>> = None;
        let mut code_content = String::new();

        for event in parser {
            if let Some(mut heading) = pending.take() {
                match event {
                    Event::End(TagEnd::Heading(_)) => {
                        let id = match heading.id.take() {
                            Some(explicit) => unique_id(explicit.to_string(), &mut used_ids),
                            None => unique_id(heading_slug(&heading.text), &mut used_ids),
                        };
                        let level = heading_level(heading.level);
                        if (2..=self.toc_max_depth).contains(&level) {
                            toc.push(TocEntry::new(id.clone(), heading.text.trim(), level));
                        }
                        events.push(Event::Start(Tag::Heading {
                            level: heading.level,
                            id: Some(CowStr::from(id)),
                            classes: heading.classes,
                            attrs: heading.attrs,
                        }));
                        events.extend(heading.inner);
                        events.push(Event::End(TagEnd::Heading(heading.level)));
                    }
                    Event::Text(text) => {
                        heading.text.push_str(&text);
                        heading.inner.push(Event::Text(text));
                        pending = Some(heading);
                    }
                    Event::Code(code) => {
                        heading.text.push_str(&code);
                        heading.inner.push(Event::Code(code));
                        pending = Some(heading);
                    }
                    other => {
                        heading.inner.push(other);
                        pending = Some(heading);
                    }
                }
                continue;
            }

            match event {
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    pending = Some(PendingHeading {
                        level,
                        id,
                        classes,
                        attrs,
                        inner: Vec::new(),
                        text: String::new(),
                    });
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some(lang);
                    code_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let lang = code_block.take().flatten();
                    let highlighted = self.highlight_code(&code_content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                }
                Event::Text(text) if code_block.is_some() => {
                    code_content.push_str(&text);
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(Rendered {
            html: html_output,
            toc,
        })
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
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                lang, highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            lang,
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Anchor for a heading without an explicit `{#id}`
fn heading_slug(text: &str) -> String {
    let base = slug::slugify(text.trim());
    if base.is_empty() {
        "section".to_string()
    } else {
        base
    }
}

/// Claim `base` as an anchor, suffixing with `-1`, `-2`, ... when taken.
/// Explicit and generated ids share one namespace.
fn unique_id(base: String, used: &mut HashSet<String>) -> String {
    let mut id = base.clone();
    let mut n = 0;
    while !used.insert(id.clone()) {
        n += 1;
        id = format!("{}-{}", base, n);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("Intro paragraph.\n\n*emphasis*").unwrap();
        assert!(rendered.html.contains("<p>Intro paragraph.</p>"));
        assert!(rendered.html.contains("<em>emphasis</em>"));
        assert!(rendered.toc.is_empty());
    }

    #[test]
    fn test_heading_ids_and_toc() {
        let renderer = MarkdownRenderer::new();
        let md = "# Title\n\n## Getting Started\n\ntext\n\n### The `main` function\n\n#### Too deep\n";
        let rendered = renderer.render(md).unwrap();

        assert!(rendered.html.contains(r#"<h2 id="getting-started">Getting Started</h2>"#));
        assert!(rendered.html.contains(r#"id="the-main-function""#));
        assert!(rendered.html.contains(r#"<h4 id="too-deep">"#));
        assert_eq!(
            rendered.toc,
            vec![
                TocEntry::new("getting-started", "Getting Started", 2),
                TocEntry::new("the-main-function", "The main function", 3),
            ]
        );
    }

    #[test]
    fn test_duplicate_headings_get_unique_ids() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer
            .render("## Setup\n\n## Setup\n\n## Setup\n")
            .unwrap();
        let ids: Vec<_> = rendered.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["setup", "setup-1", "setup-2"]);
    }

    #[test]
    fn test_explicit_heading_id_is_kept() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("## Install {#install-guide}\n").unwrap();
        assert_eq!(rendered.toc[0].id, "install-guide");
        assert!(rendered.html.contains(r#"id="install-guide""#));
    }

    #[test]
    fn test_explicit_and_generated_ids_never_collide() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer
            .render("## Intro {#setup}\n\n## Setup\n\n## Again {#setup}\n\n## Setup 1\n")
            .unwrap();
        let ids: Vec<_> = rendered.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["setup", "setup-1", "setup-2", "setup-1-1"]);
        assert_eq!(rendered.html.matches(r#"id="setup""#).count(), 1);
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(rendered.html.contains("highlight rust"));
        assert!(!rendered.html.contains("<p>fn main"));
    }
}
