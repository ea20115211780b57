use once_cell::sync::Lazy;
use pulldown_cmark::{html, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::{Captures, Regex};
use syntect::{highlighting::ThemeSet, html::highlighted_html_for_string, parsing::SyntaxSet};

pub const DEFAULT_CODE_THEME: &str = "InspiredGitHub";

const TOC_MARKER: &str = "<p>[TOC]</p>";

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

static H2_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<h2>(.*?)</h2>").expect("h2 pattern compiles"));
static H3_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<h3>(.*?)</h3>").expect("h3 pattern compiles"));

/// Converts post Markdown into HTML for direct embedding in pages.
///
/// Output is not sanitized: post content is authored by the admin only.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    theme_name: String,
}

struct CodeBlock {
    lang: Option<String>,
    source: String,
}

struct TocEntry {
    level: u8,
    id: String,
    label: String,
}

impl MarkdownRenderer {
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme_name: theme_name.to_string(),
        }
    }

    /// Renders Markdown to HTML. Never fails; malformed input produces best-effort output.
    ///
    /// - tables and fenced code blocks are enabled
    /// - single newlines inside a paragraph become `<br />`
    /// - code blocks are syntax highlighted inside `<div class="codehilite">`
    /// - `<h2>`/`<h3>` headings receive an `id` (see [`inject_heading_anchors`])
    /// - a paragraph holding only `[TOC]` becomes a table of contents
    pub fn render(&self, source: &str) -> String {
        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<CodeBlock> = None;
        let mut heading: Option<(u8, Vec<Event>)> = None;
        let mut toc: Vec<TocEntry> = Vec::new();

        for event in Parser::new_ext(source, Options::ENABLE_TABLES) {
            let event = match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some(CodeBlock { lang, source: String::new() });
                    continue;
                }
                Event::End(TagEnd::CodeBlock) => match code_block.take() {
                    Some(block) => {
                        Event::Html(self.highlight(&block.source, block.lang.as_deref()).into())
                    }
                    None => continue,
                },
                Event::Text(text) => match code_block.as_mut() {
                    Some(block) => {
                        block.source.push_str(&text);
                        continue;
                    }
                    None => Event::Text(text),
                },
                Event::SoftBreak => Event::HardBreak,
                other => other,
            };

            match &event {
                Event::Start(Tag::Heading { level, .. }) => {
                    heading = anchored_level(*level).map(|level| (level, Vec::new()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, inner)) = heading.take() {
                        let mut label = String::new();
                        html::push_html(&mut label, inner.into_iter());
                        // Only single-line headings receive an id.
                        if !label.contains('\n') {
                            toc.push(TocEntry {
                                level,
                                id: heading_anchor(level, &label),
                                label,
                            });
                        }
                    }
                }
                other => {
                    if let Some((_, inner)) = heading.as_mut() {
                        inner.push(other.clone());
                    }
                }
            }

            events.push(event);
        }

        let mut output = String::with_capacity(source.len() * 2);
        html::push_html(&mut output, events.into_iter());

        let output = inject_heading_anchors(&output);
        if output.contains(TOC_MARKER) {
            output.replace(TOC_MARKER, &build_toc(&toc))
        } else {
            output
        }
    }

    fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let syntax = lang
            .and_then(|lang| SYNTAX_SET.find_syntax_by_token(lang))
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

        let theme = THEME_SET
            .themes
            .get(&self.theme_name)
            .or_else(|| THEME_SET.themes.get(DEFAULT_CODE_THEME));

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &SYNTAX_SET, syntax, theme)
                .map_err(|e| tracing::warn!("Code highlighting failed: {}", e))
                .ok()
        });

        match highlighted {
            Some(html) => format!(r#"<div class="codehilite">{html}</div>"#),
            None => format!(
                r#"<div class="codehilite"><pre><code>{}</code></pre></div>"#,
                escape_html(code)
            ),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_THEME)
    }
}

/// Adds an `id` attribute to every `<h2>` and `<h3>` tag of rendered HTML.
///
/// The id is the literal inner HTML lowercased with spaces turned into
/// hyphens. h2 ids additionally drop `？` and `?`; h3 ids drop `。` and `.`.
/// Nested markup and any other punctuation are kept as they are.
pub fn inject_heading_anchors(html: &str) -> String {
    let html = H2_PATTERN.replace_all(html, |caps: &Captures| {
        let inner = &caps[1];
        format!(r#"<h2 id="{}">{}</h2>"#, heading_anchor(2, inner), inner)
    });

    H3_PATTERN
        .replace_all(&html, |caps: &Captures| {
            let inner = &caps[1];
            format!(r#"<h3 id="{}">{}</h3>"#, heading_anchor(3, inner), inner)
        })
        .into_owned()
}

fn heading_anchor(level: u8, inner: &str) -> String {
    let id = inner.to_lowercase().replace(' ', "-");
    match level {
        2 => id.replace('？', "").replace('?', ""),
        _ => id.replace('。', "").replace('.', ""),
    }
}

fn anchored_level(level: HeadingLevel) -> Option<u8> {
    match level {
        HeadingLevel::H2 => Some(2),
        HeadingLevel::H3 => Some(3),
        _ => None,
    }
}

// h3 entries nest under the closest preceding h2.
fn build_toc(entries: &[TocEntry]) -> String {
    let mut out = String::from("<div class=\"toc\">\n<ul>\n");
    let mut item_open = false;
    let mut nested_open = false;

    for entry in entries {
        let link = format!(r##"<a href="#{}">{}</a>"##, entry.id, entry.label);

        if entry.level == 2 {
            if nested_open {
                out.push_str("</ul>\n");
                nested_open = false;
            }
            if item_open {
                out.push_str("</li>\n");
            }
            out.push_str(&format!("<li>{link}"));
            item_open = true;
        } else if item_open {
            if !nested_open {
                out.push_str("\n<ul>\n");
                nested_open = true;
            }
            out.push_str(&format!("<li>{link}</li>\n"));
        } else {
            out.push_str(&format!("<li>{link}</li>\n"));
        }
    }

    if nested_open {
        out.push_str("</ul>\n");
    }
    if item_open {
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n</div>");
    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str) -> String {
        MarkdownRenderer::default().render(source)
    }

    #[test]
    fn h2_anchor_strips_question_marks() {
        let html = render("## Race Condition?");
        assert!(html.contains(r#"<h2 id="race-condition">Race Condition?</h2>"#), "{html}");
    }

    #[test]
    fn h2_anchor_strips_full_width_question_mark() {
        let html = render("## 什麼是 Race Condition？");
        assert!(html.contains(r#"<h2 id="什麼是-race-condition">什麼是 Race Condition？</h2>"#), "{html}");
    }

    #[test]
    fn h3_anchor_strips_periods() {
        let html = render("### Summary.");
        assert!(html.contains(r#"<h3 id="summary">Summary.</h3>"#), "{html}");
    }

    #[test]
    fn anchor_rules_are_asymmetric_between_levels() {
        let html = render("## Intro.\n\n### Why?");
        assert!(html.contains(r#"<h2 id="intro.">Intro.</h2>"#), "{html}");
        assert!(html.contains(r#"<h3 id="why?">Why?</h3>"#), "{html}");
    }

    #[test]
    fn nested_markup_flows_into_the_id() {
        let html = render("## Hello *World*");
        assert!(
            html.contains(r#"<h2 id="hello-<em>world</em>">Hello <em>World</em></h2>"#),
            "{html}"
        );
    }

    #[test]
    fn other_punctuation_is_not_cleaned() {
        let html = render("## Input/Output: Basics");
        assert!(html.contains(r#"<h2 id="input/output:-basics">"#), "{html}");
    }

    #[test]
    fn other_heading_levels_are_left_alone() {
        let html = render("# Title\n\n#### Deep");
        assert!(html.contains("<h1>Title</h1>"), "{html}");
        assert!(html.contains("<h4>Deep</h4>"), "{html}");
    }

    #[test]
    fn inject_works_on_raw_html() {
        let html = inject_heading_anchors("<h2>A B</h2><h3>C. D</h3><h2>E</h2>");
        assert_eq!(
            html,
            r#"<h2 id="a-b">A B</h2><h3 id="c-d">C. D</h3><h2 id="e">E</h2>"#
        );
    }

    #[test]
    fn single_newlines_become_line_breaks() {
        let html = render("line one\nline two");
        assert!(html.contains("line one<br />\nline two"), "{html}");
    }

    #[test]
    fn renders_pipe_tables() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"), "{html}");
        assert!(html.contains("<td>1</td>"), "{html}");
    }

    #[test]
    fn fenced_code_is_highlighted() {
        let html = render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<div class="codehilite"><pre"#), "{html}");
        assert!(html.contains("main"), "{html}");
        assert!(!html.contains("language-rust"), "{html}");
    }

    #[test]
    fn unknown_language_falls_back_to_plain_text() {
        let html = render("```nosuchlang\nplain <text>\n```");
        assert!(html.contains(r#"<div class="codehilite">"#), "{html}");
        assert!(html.contains("&lt;text&gt;"), "{html}");
    }

    #[test]
    fn loose_lists_are_detected() {
        let html = render("Steps:\n1. first\n2. second\n\n- a\n-  b");
        assert!(html.contains("<ol>"), "{html}");
        assert!(html.contains("<ul>"), "{html}");
    }

    #[test]
    fn toc_marker_links_anchored_headings() {
        let html = render("[TOC]\n\n## First?\n\n### Detail.\n\n## Second");
        assert!(!html.contains("[TOC]"), "{html}");
        assert!(html.contains(r#"<div class="toc">"#), "{html}");
        assert!(html.contains(r##"<a href="#first">First?</a>"##), "{html}");
        assert!(html.contains(r##"<a href="#detail">Detail.</a>"##), "{html}");
        assert!(html.contains(r##"<a href="#second">Second</a>"##), "{html}");
    }

    #[test]
    fn toc_skips_multi_line_headings() {
        let html = render("[TOC]\n\nLine one\nline two\n---\n\n## Kept\n");
        assert!(html.contains("<h2>Line one<br />\nline two</h2>"), "{html}");
        assert!(html.contains(r##"<a href="#kept">Kept</a>"##), "{html}");
        assert!(!html.contains(r##"href="#line-one"##), "{html}");
    }

    #[test]
    fn malformed_markdown_still_renders() {
        let html = render("## Unclosed *emphasis\n\n```\nno closing fence");
        assert!(html.contains("<h2"), "{html}");
        assert!(html.contains("no closing fence"), "{html}");
    }

    #[test]
    fn empty_input_renders_empty_output() {
        assert_eq!(render(""), "");
    }
}
