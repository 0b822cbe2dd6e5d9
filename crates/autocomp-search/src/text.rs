//! Text normalization and markup stripping

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Lowercase, turn every non-word character into a space, collapse whitespace
///
/// Word characters are ASCII letters, digits and `_`. Queries and document
/// fields go through the same normalization before they are compared.
pub fn normalize_text(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();
    collapse_whitespace(&replaced)
}

/// Split normalized text into its space-separated tokens
pub fn tokenize(text: &str) -> Vec<String> {
    normalize_text(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collapse runs of whitespace into single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove HTML tags
///
/// A `<` only opens a tag when followed by a letter, `/` or `!` and closed by
/// a later `>`, so text like `a < b` or an unterminated `Honda<Toyota` survives.
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let opens_tag = after
            .chars()
            .next()
            .is_some_and(|n| n.is_ascii_alphabetic() || n == '/' || n == '!');

        match after.find('>') {
            Some(close) if opens_tag => {
                out.push(' ');
                rest = &after[close + 1..];
            }
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    collapse_whitespace(&out)
}

/// Render markdown down to its text, dropping emphasis, heading and fence sigils
///
/// Ordered list numbers are kept, since a line such as `2026. The year ...`
/// parses as a list item. Link reference definitions produce no events, so
/// their label, destination and title are appended after the body text.
pub fn strip_markdown(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    // Next number for each open list; `None` for bullet lists
    let mut lists: Vec<Option<u64>> = Vec::new();

    let mut parser = Parser::new_ext(markdown, options);
    for event in parser.by_ref() {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::Html(html) | Event::InlineHtml(html) => {
                out.push(' ');
                out.push_str(&strip_html(&html));
                out.push(' ');
            }
            Event::Start(Tag::List(start)) => lists.push(start),
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                out.push(' ');
            }
            Event::Start(Tag::Item) => {
                if let Some(Some(number)) = lists.last_mut() {
                    out.push_str(&format!(" {}. ", number));
                    *number += 1;
                }
            }
            Event::SoftBreak | Event::HardBreak | Event::Rule => out.push(' '),
            Event::End(tag) if !is_inline(&tag) => out.push(' '),
            _ => {}
        }
    }

    let mut definitions: Vec<_> = parser.reference_definitions().iter().collect();
    definitions.sort_by_key(|(_, def)| def.span.start);
    for (label, def) in definitions {
        out.push(' ');
        out.push_str(label);
        out.push(' ');
        out.push_str(&def.dest);
        if let Some(title) = &def.title {
            out.push(' ');
            out.push_str(title);
        }
    }

    collapse_whitespace(&out)
}

/// Plain text of a fragment that may mix HTML and markdown
pub fn extract_plain_text(text: &str) -> String {
    strip_markdown(&strip_html(text))
}

fn is_inline(tag: &TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image
    )
}
