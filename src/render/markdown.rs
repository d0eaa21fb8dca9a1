//! Markdown to HTML fragment conversion
//!
//! Renders Markdown with table, strikethrough, task-list, and footnote
//! extensions. Headings get automatically generated `id` attributes and
//! links open in a new browsing context. Malformed input degrades to
//! best-effort output; rendering never fails.

use std::collections::HashMap;

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

use crate::render::template::escape_html;

/// Render a Markdown document into an HTML fragment
pub fn render_markdown(input: &str) -> String {
    let events: Vec<Event<'_>> = Parser::new_ext(input, parser_options())
        .map(open_links_in_new_tab)
        .collect();
    let events = assign_heading_ids(events);

    let mut fragment = String::with_capacity(input.len() * 2);
    html::push_html(&mut fragment, events.into_iter());
    fragment
}

const fn parser_options() -> Options {
    Options::ENABLE_TABLES
        .union(Options::ENABLE_STRIKETHROUGH)
        .union(Options::ENABLE_TASKLISTS)
        .union(Options::ENABLE_FOOTNOTES)
}

/// Rewrite link tags into raw anchors carrying `target="_blank"`
fn open_links_in_new_tab(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Start(Tag::Link {
            dest_url, title, ..
        }) => {
            let mut anchor = format!("<a href=\"{}\"", escape_html(&dest_url));
            if !title.is_empty() {
                anchor.push_str(&format!(" title=\"{}\"", escape_html(&title)));
            }
            anchor.push_str(" target=\"_blank\" rel=\"noopener\">");
            Event::InlineHtml(anchor.into())
        }
        Event::End(TagEnd::Link) => Event::InlineHtml("</a>".into()),
        other => other,
    }
}

/// Give every heading without an explicit id a slug derived from its text
///
/// Duplicate slugs get a numeric suffix in document order, so repeated
/// section names stay addressable.
fn assign_heading_ids(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut used: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(events.len());
    let mut iter = events.into_iter();

    while let Some(event) = iter.next() {
        match event {
            Event::Start(Tag::Heading {
                level,
                id: None,
                classes,
                attrs,
            }) => {
                // Buffer the heading body to derive the slug before emitting the tag
                let mut body = Vec::new();
                let mut text = String::new();
                for inner in iter.by_ref() {
                    let done = matches!(inner, Event::End(TagEnd::Heading(_)));
                    if let Event::Text(t) | Event::Code(t) = &inner {
                        text.push_str(t);
                    }
                    body.push(inner);
                    if done {
                        break;
                    }
                }

                let slug = unique_slug(&text, &mut used);
                out.push(Event::Start(Tag::Heading {
                    level,
                    id: Some(slug.into()),
                    classes,
                    attrs,
                }));
                out.extend(body);
            }
            other => out.push(other),
        }
    }

    out
}

fn unique_slug(text: &str, used: &mut HashMap<String, usize>) -> String {
    let base = slugify(text);
    let count = used.entry(base.clone()).or_insert(0);
    let slug = if *count == 0 {
        base.clone()
    } else {
        format!("{base}-{count}")
    };
    *count += 1;
    slug
}

/// Lowercase alphanumeric runs joined by single dashes
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_gets_id() {
        let fragment = render_markdown("# About\nHello");
        assert!(fragment.contains("<h1 id=\"about\">About</h1>"));
        assert!(fragment.contains("Hello"));
    }

    #[test]
    fn test_duplicate_headings_get_suffixed_ids() {
        let fragment = render_markdown("## Setup\n\n## Setup\n\n## Setup");
        assert!(fragment.contains("id=\"setup\""));
        assert!(fragment.contains("id=\"setup-1\""));
        assert!(fragment.contains("id=\"setup-2\""));
    }

    #[test]
    fn test_heading_with_inline_code() {
        let fragment = render_markdown("# Using `serve_root`");
        assert!(fragment.contains("id=\"using-serve-root\""));
    }

    #[test]
    fn test_links_open_in_new_tab() {
        let fragment = render_markdown("[docs](https://example.com)");
        assert!(fragment.contains("href=\"https://example.com\""));
        assert!(fragment.contains("target=\"_blank\""));
        assert!(fragment.contains("rel=\"noopener\""));
        assert!(fragment.contains(">docs</a>"));
    }

    #[test]
    fn test_gfm_table() {
        let fragment = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(fragment.contains("<table>"));
        assert!(fragment.contains("<td>1</td>"));
    }

    #[test]
    fn test_strikethrough_and_tasklist() {
        let fragment = render_markdown("~~gone~~\n\n- [x] done\n- [ ] open");
        assert!(fragment.contains("<del>gone</del>"));
        assert!(fragment.contains("type=\"checkbox\""));
    }

    #[test]
    fn test_malformed_input_is_best_effort() {
        let fragment = render_markdown("[broken](   \n\n** unclosed\n\x00");
        assert!(!fragment.is_empty());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  A -- B  "), "a-b");
        assert_eq!(slugify("???"), "section");
    }
}
