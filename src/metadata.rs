//! Document title recovery.
//!
//! Tries, in order: the `<title>` element, `og:title`, `twitter:title`, and
//! the first non-empty `<h1>`.

use dom_query::Document;

use crate::dom;

/// Meta tags consulted when `<title>` is missing or empty.
const META_TITLE_SELECTORS: &[&str] = &[
    r#"meta[property="og:title"]"#,
    r#"meta[name="og:title"]"#,
    r#"meta[name="twitter:title"]"#,
    r#"meta[property="twitter:title"]"#,
];

/// Recover the document title, whitespace-collapsed. `None` when nothing usable exists.
#[must_use]
pub fn document_title(doc: &Document) -> Option<String> {
    title_element(doc)
        .or_else(|| meta_title(doc))
        .or_else(|| first_heading(doc))
}

fn title_element(doc: &Document) -> Option<String> {
    doc.select("title")
        .nodes()
        .iter()
        .map(dom::normalized_text)
        .find(|t| !t.is_empty())
}

fn meta_title(doc: &Document) -> Option<String> {
    META_TITLE_SELECTORS.iter().find_map(|selector| {
        doc.select(selector).nodes().iter().find_map(|node| {
            let content = node.attr("content")?;
            let title = dom::collapse_whitespace(&content).trim().to_string();
            (!title.is_empty()).then_some(title)
        })
    })
}

fn first_heading(doc: &Document) -> Option<String> {
    doc.select("h1")
        .nodes()
        .iter()
        .map(dom::normalized_text)
        .find(|t| !t.is_empty())
}
