//! DOM Operations Adapter
//!
//! Small helpers over `dom_query` nodes used by the scorer, the cleaner and
//! the Markdown renderer. Everything here reads the tree; nothing mutates it.

pub use dom_query::{Document, NodeId, NodeRef, Selection};

/// Elements that never carry readable content.
pub const NON_CONTENT_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "head", "title", "meta", "link", "svg",
    "iframe", "object", "embed", "canvas", "button", "input", "select", "textarea", "option",
];

/// HTML void elements (no closing tag).
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Block-level elements; a `div` containing any of these is a container,
/// not a paragraph.
pub const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "dialog", "dd", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "header", "hgroup", "hr", "li", "main", "nav", "ol", "p", "pre", "section",
    "table", "ul",
];

/// Get tag name (lowercase). Empty for non-element nodes.
#[must_use]
pub fn tag_name(node: &NodeRef) -> String {
    node.node_name()
        .map(|t| t.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Class and id attributes joined by a space, for pattern matching.
#[must_use]
pub fn class_and_id(node: &NodeRef) -> String {
    let class = node.attr("class").map(|s| s.to_string()).unwrap_or_default();
    let id = node.attr("id").map(|s| s.to_string()).unwrap_or_default();
    format!("{class} {id}").trim().to_string()
}

/// Direct element children of a node.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children().into_iter().filter(NodeRef::is_element).collect()
}

/// Whether any direct child is a block-level element.
#[must_use]
pub fn has_block_children(node: &NodeRef) -> bool {
    element_children(node)
        .iter()
        .any(|child| BLOCK_TAGS.contains(&tag_name(child).as_str()))
}

/// Text content with every whitespace run collapsed to one space and ends trimmed.
#[must_use]
pub fn normalized_text(node: &NodeRef) -> String {
    collapse_whitespace(&node.text()).trim().to_string()
}

/// Character count of the normalized text of a node.
#[must_use]
pub fn text_len(node: &NodeRef) -> usize {
    normalized_text(node).chars().count()
}

/// Collapse runs of ASCII whitespace into a single space. Ends are kept.
///
/// Non-breaking spaces are left alone: they are content.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

/// Whether the element is hidden from readers.
#[must_use]
pub fn is_hidden(node: &NodeRef) -> bool {
    if node.attr("hidden").is_some() {
        return true;
    }
    if node
        .attr("aria-hidden")
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    {
        return true;
    }
    node.attr("style").is_some_and(|style| {
        let style = style.to_ascii_lowercase().replace(' ', "");
        style.contains("display:none") || style.contains("visibility:hidden")
    })
}

/// Escape text for inclusion in serialized HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
