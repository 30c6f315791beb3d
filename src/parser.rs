use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::block::Span;
use crate::variant::VariantKey;

/// Parse inline markdown (emphasis, links, code spans, breaks) into spans.
///
/// Variant tags such as `<react>React</react>` or `<vue>Vue</vue>` become
/// [`Span::Variant`]. Any other inline HTML is kept as literal text, except
/// `<br>` which is a line break. Block-level markdown is an error, since
/// the text belongs to a single paragraph.
///
/// A variant tag must share its line with text. A tag alone on the first
/// line (`"<vue3>\nUse createSSRApp\n</vue3>"`) opens an HTML block in
/// markdown and is rejected; variant-specific paragraphs belong in a
/// conditional block.
pub fn parse_inline(markdown: &str) -> Result<Vec<Span>, String> {
    let mut state = ParseState::default();

    for event in Parser::new(markdown) {
        process_event(event, &mut state)?;
    }

    if let Some(frame) = state.frames.last() {
        return Err(match frame {
            Frame::Variant(key) => format!("<{key}> is never closed"),
            _ => "unbalanced inline formatting".to_string(),
        });
    }

    Ok(state.spans)
}

#[derive(Default)]
struct ParseState {
    // Current inline content being built
    spans: Vec<Span>,
    // Open formatting, innermost last
    frames: Vec<Frame>,
    // Parent span buffers for each open frame
    span_stack: Vec<Vec<Span>>,
    paragraphs: usize,
}

enum Frame {
    Bold,
    Italic,
    Link(String),
    Variant(VariantKey),
}

impl ParseState {
    fn open(&mut self, frame: Frame) {
        self.frames.push(frame);
        self.span_stack.push(std::mem::take(&mut self.spans));
    }

    /// Close the innermost frame, wrapping the content gathered since it opened.
    fn close(&mut self) -> Result<(), String> {
        let frame = self.frames.pop().ok_or("closing tag without an opening tag")?;
        let content = std::mem::take(&mut self.spans);
        let mut parent = self.span_stack.pop().unwrap_or_default();
        parent.push(match frame {
            Frame::Bold => Span::Bold(content),
            Frame::Italic => Span::Italic(content),
            Frame::Link(url) => Span::Link { url, content },
            Frame::Variant(key) => Span::Variant { key, content },
        });
        self.spans = parent;
        Ok(())
    }
}

fn process_event(event: Event, state: &mut ParseState) -> Result<(), String> {
    match event {
        Event::Start(Tag::Paragraph) => {
            state.paragraphs += 1;
            if state.paragraphs > 1 {
                return Err("text contains more than one paragraph".to_string());
            }
        }
        Event::End(TagEnd::Paragraph) => {}

        Event::Text(text) => state.spans.push(Span::Text(text.into_string())),
        Event::Code(code) => state.spans.push(Span::Code(code.into_string())),

        Event::Start(Tag::Strong) => state.open(Frame::Bold),
        Event::Start(Tag::Emphasis) => state.open(Frame::Italic),
        Event::Start(Tag::Link { dest_url, .. }) => state.open(Frame::Link(dest_url.into_string())),
        Event::End(TagEnd::Strong | TagEnd::Emphasis | TagEnd::Link) => state.close()?,

        Event::InlineHtml(html) => process_html(&html, state)?,

        Event::SoftBreak => state.spans.push(Span::Text(" ".to_string())),
        Event::HardBreak => state.spans.push(Span::LineBreak),

        Event::Start(Tag::HtmlBlock) => {
            return Err("HTML tag on a line of its own starts an HTML block, not inline text".to_string());
        }
        Event::Start(tag) => {
            return Err(format!("unsupported markdown in inline text: {tag:?}"));
        }
        Event::Rule => return Err("unsupported markdown in inline text: rule".to_string()),
        _ => {}
    }
    Ok(())
}

fn process_html(html: &str, state: &mut ParseState) -> Result<(), String> {
    let Some(inner) = html.strip_prefix('<').and_then(|s| s.strip_suffix('>')) else {
        state.spans.push(Span::Text(html.to_string()));
        return Ok(());
    };

    let inner = inner.trim();
    if matches!(inner, "br" | "br/" | "br /") {
        state.spans.push(Span::LineBreak);
        return Ok(());
    }

    if let Some(name) = inner.strip_prefix('/') {
        if let Some(key) = VariantKey::parse(name) {
            return match state.frames.last() {
                Some(Frame::Variant(open)) if *open == key => state.close(),
                _ => Err(format!("</{name}> does not close the innermost open tag")),
            };
        }
    } else if let Some(key) = VariantKey::parse(inner) {
        state.open(Frame::Variant(key));
        return Ok(());
    }

    state.spans.push(Span::Text(html.to_string()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    #[test]
    fn plain_text() {
        assert_eq!(parse_inline("Hello world").unwrap(), vec![text("Hello world")]);
    }

    #[test]
    fn bold_italic_and_code() {
        assert_eq!(
            parse_inline("use **ssr** and *then* `npm run build`").unwrap(),
            vec![
                text("use "),
                Span::Bold(vec![text("ssr")]),
                text(" and "),
                Span::Italic(vec![text("then")]),
                text(" "),
                Span::Code("npm run build".to_string()),
            ]
        );
    }

    #[test]
    fn links_keep_their_destination() {
        assert_eq!(
            parse_inline("[Laravel Breeze](https://laravel.com/docs/starter-kits)").unwrap(),
            vec![Span::Link {
                url: "https://laravel.com/docs/starter-kits".to_string(),
                content: vec![text("Laravel Breeze")],
            }]
        );
    }

    #[test]
    fn soft_and_hard_breaks() {
        assert_eq!(
            parse_inline("one\ntwo  \nthree").unwrap(),
            vec![
                text("one"),
                text(" "),
                text("two"),
                Span::LineBreak,
                text("three"),
            ]
        );
    }

    #[test]
    fn variant_tags_become_variant_spans() {
        assert_eq!(
            parse_inline("instruct <vue>Vue</vue><react>React</react> to hydrate").unwrap(),
            vec![
                text("instruct "),
                Span::Variant {
                    key: VariantKey::Vue,
                    content: vec![text("Vue")],
                },
                Span::Variant {
                    key: VariantKey::Only(Variant::React),
                    content: vec![text("React")],
                },
                text(" to hydrate"),
            ]
        );
    }

    #[test]
    fn variant_tags_nest_formatting() {
        assert_eq!(
            parse_inline("<vue3>use `createSSRApp`</vue3>").unwrap(),
            vec![Span::Variant {
                key: VariantKey::Only(Variant::Vue3),
                content: vec![text("use "), Span::Code("createSSRApp".to_string())],
            }]
        );
    }

    #[test]
    fn other_html_is_literal_text() {
        assert_eq!(
            parse_inline("a <kbd>b</kbd><br>c").unwrap(),
            vec![
                text("a "),
                text("<kbd>"),
                text("b"),
                text("</kbd>"),
                Span::LineBreak,
                text("c"),
            ]
        );
    }

    #[test]
    fn unclosed_variant_tag_is_an_error() {
        assert_eq!(
            parse_inline("<svelte>Svelte only").unwrap_err(),
            "<svelte> is never closed"
        );
    }

    #[test]
    fn mismatched_variant_tag_is_an_error() {
        assert!(parse_inline("<vue>Vue</react>").is_err());
        assert!(parse_inline("stray </react> tag").is_err());
    }

    #[test]
    fn block_markdown_is_rejected() {
        assert!(parse_inline("# Heading").is_err());
        assert!(parse_inline("- item").is_err());
        assert!(parse_inline("first\n\nsecond").is_err());
    }

    #[test]
    fn variant_tag_on_its_own_line_is_rejected() {
        let err = parse_inline("<vue3>\nUse createSSRApp\n</vue3>").unwrap_err();
        assert!(err.contains("HTML block"), "{err}");

        assert_eq!(
            parse_inline("<vue3>Use createSSRApp</vue3>").unwrap(),
            vec![Span::Variant {
                key: VariantKey::Only(Variant::Vue3),
                content: vec![text("Use createSSRApp")],
            }]
        );
    }

    #[test]
    fn empty_text_has_no_spans() {
        assert_eq!(parse_inline("").unwrap(), vec![]);
    }
}
