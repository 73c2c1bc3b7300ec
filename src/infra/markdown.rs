//! Markdown rendering for the terminal and the web viewer.

use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag};

fn extensions() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Converts markdown text to HTML.
///
/// Enables tables, strikethrough, and task lists. Raw HTML embedded in the
/// markdown is demoted to text and escaped; note bodies are user data, not
/// markup the viewer should execute.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, extensions()).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        other => other,
    });
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Renders markdown as plain terminal text.
///
/// Headings become underlined titles, list items get bullet markers, and
/// inline markup collapses to its text content. Good enough for `view`;
/// anything fancier belongs in the web viewer.
pub fn markdown_to_terminal(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, extensions());
    let mut out = String::new();
    let mut underline_from: Option<usize> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading(level, _, _)) => {
                if level == HeadingLevel::H1 {
                    underline_from = Some(out.len());
                } else {
                    out.push_str(&"#".repeat(level as usize));
                    out.push(' ');
                }
            }
            Event::End(Tag::Heading(..)) => {
                // Top-level headings get an underline sized to their text.
                if let Some(start) = underline_from.take() {
                    let width = out[start..].chars().count();
                    out.push('\n');
                    out.push_str(&"-".repeat(width));
                }
                out.push_str("\n\n");
            }
            Event::Start(Tag::Item) => out.push_str("  * "),
            Event::End(Tag::Item) => out.push('\n'),
            Event::End(Tag::Paragraph) => out.push_str("\n\n"),
            Event::End(Tag::List(_)) => out.push('\n'),
            Event::Start(Tag::CodeBlock(_)) => out.push('\n'),
            Event::End(Tag::CodeBlock(_)) => out.push('\n'),
            Event::Text(text) => out.push_str(&text),
            Event::Code(code) => {
                out.push('`');
                out.push_str(&code);
                out.push('`');
            }
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Rule => out.push_str("----\n\n"),
            _ => {}
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_renders_headings_and_paragraphs() {
        let html = markdown_to_html("# Title\n\nBody text.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>Body text.</p>"));
    }

    #[test]
    fn html_escapes_raw_characters() {
        let html = markdown_to_html("AT&T <tag>");
        assert!(html.contains("&amp;"));
        assert!(!html.contains("<tag>"));
        assert!(html.contains("&lt;tag&gt;"));
    }

    #[test]
    fn html_neutralizes_embedded_markup() {
        let html = markdown_to_html("before\n\n<script>alert(1)</script>\n\nafter");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("after"));
    }

    #[test]
    fn terminal_underlines_top_level_heading() {
        let text = markdown_to_terminal("# Title\n\nBody.");
        assert!(text.starts_with("Title\n-----"));
        assert!(text.contains("Body."));
    }

    #[test]
    fn terminal_keeps_list_structure() {
        let text = markdown_to_terminal("- one\n- two");
        assert!(text.contains("  * one"));
        assert!(text.contains("  * two"));
    }

    #[test]
    fn terminal_preserves_inline_code() {
        let text = markdown_to_terminal("run `nst ls` to browse");
        assert_eq!(text, "run `nst ls` to browse");
    }

    #[test]
    fn terminal_output_is_trimmed() {
        let text = markdown_to_terminal("just a line\n");
        assert_eq!(text, "just a line");
    }
}
