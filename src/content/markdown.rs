//! Plain-text inspection of markdown bodies

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Marker separating a hand-written excerpt from the rest of a post
pub const MORE_MARKER: &str = "<!-- more -->";

/// Split the excerpt off a markdown body (text before `<!-- more -->`)
pub fn split_excerpt(content: &str) -> Option<&str> {
    content
        .find(MORE_MARKER)
        .map(|pos| content[..pos].trim())
}

/// Plain text of the first paragraph, markup stripped
pub fn first_paragraph(markdown: &str) -> Option<String> {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH);

    let mut in_paragraph = false;
    let mut text = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::Paragraph) => in_paragraph = true,
            Event::End(TagEnd::Paragraph) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
                in_paragraph = false;
                text.clear();
            }
            Event::Text(t) | Event::Code(t) if in_paragraph => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }

    None
}

/// Whitespace-separated words in the raw body
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}
