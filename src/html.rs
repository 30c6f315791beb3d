use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::document::{Document, Element, Node};
use crate::outline::Outline;

/// Elements written on their own line
const BLOCK_TAGS: &[&str] = &["h1", "h2", "p", "div", "pre", "nav", "ul", "li", "article"];

const VOID_TAGS: &[&str] = &["br"];

/// Convert a rendered document to HTML: the outline, then the page body.
pub fn document_to_html(doc: &Document) -> String {
    let mut out = String::new();

    outline_to_html_into(&doc.outline, &mut out);

    out.push_str("<article data-title=\"");
    out.push_str(&encode_double_quoted_attribute(&doc.title));
    out.push_str("\">\n");
    for node in &doc.nodes {
        emit_node(node, false, &mut out);
    }
    out.push_str("</article>\n");

    out
}

/// Convert an outline to a `<nav>` list of anchor links.
pub fn outline_to_html(outline: &Outline) -> String {
    let mut out = String::new();
    outline_to_html_into(outline, &mut out);
    out
}

fn outline_to_html_into(outline: &Outline, out: &mut String) {
    out.push_str("<nav class=\"outline\">\n<ul>\n");
    for entry in outline.iter() {
        out.push_str("<li><a href=\"#");
        out.push_str(&encode_double_quoted_attribute(&entry.anchor));
        out.push_str("\">");
        out.push_str(&encode_text(&entry.label));
        out.push_str("</a></li>\n");
    }
    out.push_str("</ul>\n</nav>\n");
}

fn emit_node(node: &Node, in_pre: bool, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&encode_text(text)),
        Node::Element(element) => emit_element(element, in_pre, out),
    }
}

fn emit_element(element: &Element, in_pre: bool, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');

    let tag = element.tag.as_str();
    if VOID_TAGS.contains(&tag) {
        return;
    }

    // Whitespace inside <pre> is content, so no line breaks are added there
    let block = !in_pre && BLOCK_TAGS.contains(&tag);
    let child_in_pre = in_pre || tag == "pre";
    let has_block_children = element
        .children
        .iter()
        .any(|c| c.as_element().is_some_and(|e| BLOCK_TAGS.contains(&e.tag.as_str())));

    if block && !child_in_pre && has_block_children {
        out.push('\n');
    }
    for child in &element.children {
        emit_node(child, child_in_pre, out);
    }

    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    if block {
        out.push('\n');
    }
}
