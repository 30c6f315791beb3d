use crate::block::{Block, CodeBlock, Example, Heading, Span};
use crate::document::{Document, Element, Node};
use crate::error::ComposeError;
use crate::page::Page;
use crate::variant::Variant;

/// Render `page` for readers of `active`.
///
/// Conditional content for other variants is left out of the document
/// entirely. Every tab of a tab group is kept; `active` only decides which
/// one is marked as selected.
pub fn render(page: &Page, active: Variant) -> Result<Document, ComposeError> {
    if !page.declares(active) {
        return Err(ComposeError::UnknownVariant {
            key: active.to_string(),
        });
    }

    let mut nodes = Vec::new();
    emit_blocks(page.blocks(), active, &mut nodes);
    log::debug!(
        "rendered {:?} for {}: {} top-level nodes",
        page.title(),
        active,
        nodes.len()
    );

    Ok(Document {
        title: page.title().to_string(),
        outline: page.outline().clone(),
        nodes,
    })
}

fn emit_blocks(blocks: &[Block], active: Variant, out: &mut Vec<Node>) {
    for block in blocks {
        emit_block(block, active, out);
    }
}

fn emit_block(block: &Block, active: Variant, out: &mut Vec<Node>) {
    match block {
        Block::Heading(heading) => out.push(heading_node(heading)),
        Block::Paragraph { content } => {
            let mut p = Element::new("p");
            spans_to_nodes(content, active, &mut p.children);
            out.push(p.into());
        }
        Block::Notice { content } => {
            let mut notice = Element::new("div").with_attr("class", "notice");
            spans_to_nodes(content, active, &mut notice.children);
            out.push(notice.into());
        }
        Block::CodeBlock(code) => out.push(code_node(code)),
        Block::TabbedCode { examples } => out.push(tabbed_code_node(examples, active)),
        Block::Conditional { key, blocks } => {
            if key.matches(active) {
                emit_blocks(blocks, active, out);
            }
        }
    }
}

fn heading_node(heading: &Heading) -> Node {
    Element::new(heading.level.tag())
        .with_attr("id", heading.id.as_str())
        .with_child(Node::text(heading.text.as_str()))
        .into()
}

fn tabbed_code_node(examples: &[Example], active: Variant) -> Node {
    let selected = examples
        .iter()
        .position(|e| e.variant_key().is_some_and(|key| key.matches(active)))
        .unwrap_or(0);

    let tabs = examples.iter().enumerate().map(|(i, example)| {
        let tab = Element::new("div")
            .with_attr("class", "tab")
            .with_attr("data-label", example.label.as_str())
            .with_attr("data-language", example.code.language.as_str());
        Node::from(
            tab.with_attr("data-active", if i == selected { "true" } else { "false" })
                .with_child(code_node(&example.code)),
        )
    });

    Element::new("div")
        .with_attr("class", "tabbed-code")
        .with_children(tabs)
        .into()
}

fn code_node(code: &CodeBlock) -> Node {
    let mut pre = Element::new("pre").with_attr("data-language", code.language.as_str());
    let mut inner = Element::new("code").with_attr("class", format!("language-{}", code.language));

    if code.diff {
        pre = pre.with_attr("class", "diff");
        // split_inclusive keeps each line's newline so the lines concatenate back to the source
        inner = inner.with_children(code.source.split_inclusive('\n').map(|line| {
            let class = match line.chars().next() {
                Some('+') => "line added",
                Some('-') => "line removed",
                _ => "line",
            };
            Node::from(
                Element::new("span")
                    .with_attr("class", class)
                    .with_child(Node::text(line)),
            )
        }));
    } else {
        inner = inner.with_child(Node::text(code.source.as_str()));
    }

    pre.with_child(inner.into()).into()
}

fn spans_to_nodes(spans: &[Span], active: Variant, out: &mut Vec<Node>) {
    for span in spans {
        span_to_nodes(span, active, out);
    }
}

fn span_to_nodes(span: &Span, active: Variant, out: &mut Vec<Node>) {
    match span {
        Span::Text(text) => out.push(Node::text(text.as_str())),
        Span::Bold(inner) => out.push(wrap("strong", inner, active)),
        Span::Italic(inner) => out.push(wrap("em", inner, active)),
        Span::Code(text) => out.push(
            Element::new("code")
                .with_child(Node::text(text.as_str()))
                .into(),
        ),
        Span::Link { url, content } => {
            let mut a = Element::new("a").with_attr("href", url.as_str());
            spans_to_nodes(content, active, &mut a.children);
            out.push(a.into());
        }
        Span::LineBreak => out.push(Element::new("br").into()),
        Span::Variant { key, content } => {
            if key.matches(active) {
                spans_to_nodes(content, active, out);
            }
        }
    }
}

fn wrap(tag: &str, inner: &[Span], active: Variant) -> Node {
    let mut element = Element::new(tag);
    spans_to_nodes(inner, active, &mut element.children);
    element.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::HeadingLevel;
    use crate::variant::VariantKey;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    fn tabs(labels: &[(&str, &str)]) -> Block {
        Block::TabbedCode {
            examples: labels
                .iter()
                .map(|(label, lang)| {
                    Example::new(*label, CodeBlock::new(*lang, format!("// {label}")))
                })
                .collect(),
        }
    }

    fn framework_tabs() -> Block {
        tabs(&[("Vue 2", "bash"), ("Vue 3", "bash"), ("React", "js"), ("Svelte", "js")])
    }

    fn tab_elements(doc: &Document) -> Vec<&Element> {
        doc.elements().into_iter().filter(|e| e.has_class("tab")).collect()
    }

    fn hydration_page() -> Page {
        Page::new(
            "SSR",
            vec![
                Block::Heading(Heading::new(HeadingLevel::H2, "Client side hydration")),
                Block::Conditional {
                    key: VariantKey::Only(Variant::Vue3),
                    blocks: vec![Block::Paragraph {
                        content: vec![text("Use createSSRApp")],
                    }],
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn conditional_block_is_absent_for_other_variants() {
        let doc = render(&hydration_page(), Variant::React).unwrap();

        assert_eq!(doc.nodes.len(), 1);
        assert!(!doc.text_content().contains("createSSRApp"));
    }

    #[test]
    fn conditional_block_is_included_for_its_variant() {
        let doc = render(&hydration_page(), Variant::Vue3).unwrap();

        assert_eq!(
            doc.nodes[1],
            Node::from(Element::new("p").with_child(Node::text("Use createSSRApp")))
        );
    }

    #[test]
    fn tabs_keep_source_order_and_languages() {
        let page = Page::new("SSR", vec![framework_tabs()]).unwrap();

        let doc = render(&page, Variant::Svelte).unwrap();
        let tabs = tab_elements(&doc);

        let labels: Vec<_> = tabs.iter().map(|t| t.attr("data-label").unwrap()).collect();
        let languages: Vec<_> = tabs.iter().map(|t| t.attr("data-language").unwrap()).collect();
        assert_eq!(labels, vec!["Vue 2", "Vue 3", "React", "Svelte"]);
        assert_eq!(languages, vec!["bash", "bash", "js", "js"]);
    }

    #[test]
    fn exactly_one_tab_is_active_and_follows_the_variant() {
        let page = Page::new("SSR", vec![framework_tabs()]).unwrap();

        for (variant, expected) in [
            (Variant::Vue2, "Vue 2"),
            (Variant::Vue3, "Vue 3"),
            (Variant::React, "React"),
            (Variant::Svelte, "Svelte"),
        ] {
            let doc = render(&page, variant).unwrap();
            let active: Vec<_> = tab_elements(&doc)
                .into_iter()
                .filter(|t| t.attr("data-active") == Some("true"))
                .map(|t| t.attr("data-label").unwrap())
                .collect();
            assert_eq!(active, vec![expected]);
        }
    }

    #[test]
    fn first_tab_is_active_when_no_label_names_the_variant() {
        let page = Page::new("SSR", vec![tabs(&[("Laravel", "bash"), ("Composer", "bash")])]).unwrap();

        let doc = render(&page, Variant::React).unwrap();
        let flags: Vec<_> = tab_elements(&doc)
            .iter()
            .map(|t| t.attr("data-active").unwrap())
            .collect();

        assert_eq!(flags, vec!["true", "false"]);
    }

    #[test]
    fn diff_lines_are_kept_verbatim() {
        let source = " \"scripts\": {\n-   \"build\": \"vite build\"\n+   \"build\": \"vite build && vite build --ssr\"\n },";
        let page = Page::new(
            "SSR",
            vec![Block::CodeBlock(CodeBlock::new("diff", source))],
        )
        .unwrap();

        let doc = render(&page, Variant::Vue3).unwrap();
        let lines: Vec<_> = doc
            .elements()
            .into_iter()
            .filter(|e| e.has_class("line"))
            .collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].has_class("removed"));
        assert!(lines[2].has_class("added"));
        assert!(!lines[0].has_class("added") && !lines[0].has_class("removed"));
        assert_eq!(doc.text_content(), source);
    }

    #[test]
    fn plain_code_is_a_single_text_node() {
        let page = Page::new(
            "SSR",
            vec![Block::CodeBlock(CodeBlock::new("bash", "npm run build\n"))],
        )
        .unwrap();

        let doc = render(&page, Variant::Vue2).unwrap();

        assert_eq!(
            doc.nodes,
            vec![Node::from(
                Element::new("pre")
                    .with_attr("data-language", "bash")
                    .with_child(
                        Element::new("code")
                            .with_attr("class", "language-bash")
                            .with_child(Node::text("npm run build\n"))
                            .into()
                    )
            )]
        );
    }

    #[test]
    fn inline_variant_spans_follow_the_active_variant() {
        let page = Page::new(
            "SSR",
            vec![Block::Paragraph {
                content: vec![
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
                ],
            }],
        )
        .unwrap();

        assert_eq!(render(&page, Variant::Vue2).unwrap().text_content(), "instruct Vue to hydrate");
        assert_eq!(render(&page, Variant::Vue3).unwrap().text_content(), "instruct Vue to hydrate");
        assert_eq!(render(&page, Variant::React).unwrap().text_content(), "instruct React to hydrate");
        assert_eq!(render(&page, Variant::Svelte).unwrap().text_content(), "instruct  to hydrate");
    }

    #[test]
    fn rich_text_maps_to_elements() {
        let page = Page::new(
            "SSR",
            vec![Block::Notice {
                content: vec![
                    Span::Bold(vec![text("Note")]),
                    Span::LineBreak,
                    Span::Link {
                        url: "https://laravel.com".to_string(),
                        content: vec![Span::Italic(vec![text("Laravel")])],
                    },
                ],
            }],
        )
        .unwrap();

        let doc = render(&page, Variant::React).unwrap();

        assert_eq!(
            doc.nodes,
            vec![Node::from(
                Element::new("div")
                    .with_attr("class", "notice")
                    .with_child(Element::new("strong").with_child(Node::text("Note")).into())
                    .with_child(Element::new("br").into())
                    .with_child(
                        Element::new("a")
                            .with_attr("href", "https://laravel.com")
                            .with_child(Element::new("em").with_child(Node::text("Laravel")).into())
                            .into()
                    )
            )]
        );
    }

    #[test]
    fn undeclared_active_variant_is_rejected() {
        let page = Page::compose("SSR", vec![], &[Variant::Vue3], HeadingLevel::H2).unwrap();

        assert_eq!(
            render(&page, Variant::React).unwrap_err(),
            ComposeError::UnknownVariant {
                key: "react".to_string()
            }
        );
    }

    #[test]
    fn unused_variant_renders_without_conditional_content() {
        let page = hydration_page();

        let doc = render(&page, Variant::Svelte).unwrap();

        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.outline.len(), 1);
    }

    #[test]
    fn rendering_is_deterministic() {
        let page = Page::new("SSR", vec![framework_tabs()]).unwrap();
        assert_eq!(render(&page, Variant::Vue3), render(&page, Variant::Vue3));
    }
}
