//! Markdown Rendering
//!
//! Renders the bundled help documents with pulldown-cmark:
//! - tables, strikethrough and task lists enabled
//! - raw HTML in the source is shown as text, never injected
//! - absolute links open in a new tab

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Parse markdown with all extensions enabled
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TABLES
        | Options::ENABLE_TASKLISTS
}

fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Rewrite events for the help viewer
fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    // Closing tags of links we emitted as raw HTML
    let mut open_external = Vec::new();

    for event in parser {
        match event {
            Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),

            Event::Start(Tag::Link { dest_url, title, .. }) if is_external(&dest_url) => {
                let html = format!(
                    r#"<a href="{}" title="{}" target="_blank" rel="noopener noreferrer">"#,
                    escape_html(&dest_url),
                    escape_html(&title),
                );
                events.push(Event::Html(CowStr::from(html)));
                open_external.push(true);
            }
            Event::Start(Tag::Link { .. }) => {
                open_external.push(false);
                events.push(event);
            }
            Event::End(TagEnd::Link) => {
                if open_external.pop().unwrap_or(false) {
                    events.push(Event::Html(CowStr::from("</a>")));
                } else {
                    events.push(event);
                }
            }

            other => events.push(other),
        }
    }

    events
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_render() {
        let html = parse_markdown("| Report | When |\n|---|---|\n| Pipeline | Weekly |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>Pipeline</td>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown("Hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_external_links_open_new_tab() {
        let html = parse_markdown("[docs](https://example.com/a?b=1&c=2) and [local](#tips)");
        assert!(html.contains(r#"<a href="https://example.com/a?b=1&amp;c=2" title="" target="_blank" rel="noopener noreferrer">docs</a>"#));
        assert!(html.contains(r##"<a href="#tips">local</a>"##));
    }
}
