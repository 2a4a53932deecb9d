//! Main content extraction.
//!
//! Picks the best-scoring readability candidate, serializes it (with its
//! qualifying siblings) as a cleaned HTML fragment, and falls back to the
//! `<body>` or the raw document when nothing usable is found.

use dom_query::Document;

use crate::dom::{self, NodeRef, Selection};
use crate::link_density::{is_link_heavy, link_density};
use crate::metadata::document_title;
use crate::patterns::BODY_TAG;
use crate::result::{ContentSource, Extracted};
use crate::scoring::{self, ScoreTable};

/// Markup that counts as "nothing extracted".
const EMPTY_SHELL: &str = "<html><body></body></html>";

/// Siblings need at least this score to join the top candidate...
const SIBLING_MIN_SCORE: f64 = 10.0;
/// ...or this share of the top score, whichever is higher.
const SIBLING_SCORE_RATIO: f64 = 0.2;

/// Unscored sibling paragraphs are kept when long and mostly unlinked.
const SIBLING_PARAGRAPH_MIN_LEN: usize = 80;
const SIBLING_PARAGRAPH_MAX_DENSITY: f64 = 0.25;

/// Attributes that survive cleaning.
const KEPT_ATTRIBUTES: &[&str] = &[
    "href", "src", "data-src", "alt", "title", "colspan", "rowspan", "start",
];

/// Blocks dropped from the fragment when their links dominate their text.
const LINK_HEAVY_BLOCKS: &[&str] = &["div", "section", "ul", "ol", "table"];

/// Extract the main content and title of an HTML document.
///
/// Never fails: malformed markup is parsed leniently, and the fallback chain
/// always yields some content.
///
/// # Examples
///
/// ```
/// use htmldown::{extract, ContentSource};
///
/// let extracted = extract("no markup at all");
/// assert_eq!(extracted.source, ContentSource::Document);
/// assert_eq!(extracted.content_html, "no markup at all");
/// ```
#[must_use]
pub fn extract(html: &str) -> Extracted {
    let doc = Document::from(html);
    let title = document_title(&doc);

    if let Some((content_html, score)) = readability_fragment(&doc) {
        if is_empty_shell(&content_html) {
            tracing::debug!(score, "readability candidate has no content");
        } else {
            tracing::debug!(score, bytes = content_html.len(), "using readability content");
            return Extracted {
                content_html,
                title,
                source: ContentSource::Readability,
            };
        }
    }

    if BODY_TAG.is_match(html) {
        if let Some(body) = doc.select("body").nodes().first() {
            tracing::info!("no main content found, falling back to <body>");
            return Extracted {
                content_html: Selection::from(*body).inner_html().to_string(),
                title,
                source: ContentSource::Body,
            };
        }
    }

    tracing::info!("no main content and no <body> tag, using the document as-is");
    Extracted {
        content_html: html.to_string(),
        title,
        source: ContentSource::Document,
    }
}

/// Whether a fragment has nothing worth rendering.
#[must_use]
pub fn is_empty_shell(fragment: &str) -> bool {
    let trimmed = fragment.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(EMPTY_SHELL) {
        return true;
    }

    let doc = Document::from(trimmed);
    doc.select("body").text().trim().is_empty() && doc.select("img").nodes().is_empty()
}

/// Serialize the top candidate, or `None` when nothing scored.
fn readability_fragment(doc: &Document) -> Option<(String, f64)> {
    let body = doc.select("body").nodes().first().copied()?;
    let table = scoring::score_candidates(&body);
    let (top, top_score) = table.top()?;

    tracing::trace!(
        tag = %dom::tag_name(&top.node),
        class = %dom::class_and_id(&top.node),
        top_score,
        "top candidate"
    );

    let mut out = String::from("<div>");
    for node in content_nodes(&top.node, top_score, &table) {
        push_clean_element(&node, &mut out);
    }
    out.push_str("</div>");

    Some((out, top_score))
}

/// The top candidate plus the siblings that belong with it, in document order.
fn content_nodes<'a>(top: &NodeRef<'a>, top_score: f64, table: &ScoreTable<'a>) -> Vec<NodeRef<'a>> {
    if matches!(dom::tag_name(top).as_str(), "body" | "html") {
        return vec![*top];
    }
    let Some(parent) = top.parent().filter(NodeRef::is_element) else {
        return vec![*top];
    };

    let threshold = SIBLING_MIN_SCORE.max(top_score * SIBLING_SCORE_RATIO);

    dom::element_children(&parent)
        .into_iter()
        .filter(|sibling| {
            if sibling.id == top.id {
                return true;
            }
            if scoring::is_skipped(sibling) {
                return false;
            }
            if table.score_of(sibling).is_some_and(|score| score >= threshold) {
                return true;
            }
            dom::tag_name(sibling) == "p" && is_content_paragraph(sibling)
        })
        .collect()
}

fn is_content_paragraph(node: &NodeRef) -> bool {
    let len = dom::text_len(node);
    if len >= SIBLING_PARAGRAPH_MIN_LEN {
        return link_density(node) < SIBLING_PARAGRAPH_MAX_DENSITY;
    }
    // Short, link-free sentences still read as prose
    len > 0 && link_density(node) == 0.0 && dom::normalized_text(node).ends_with('.')
}

fn push_clean_element(node: &NodeRef, out: &mut String) {
    let tag = match dom::tag_name(node).as_str() {
        "html" | "body" => "div".to_string(),
        other => other.to_string(),
    };

    out.push('<');
    out.push_str(&tag);
    push_kept_attributes(node, &tag, out);
    out.push('>');

    if dom::VOID_TAGS.contains(&tag.as_str()) {
        return;
    }

    push_clean_children(node, out);

    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
}

fn push_clean_children(node: &NodeRef, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(&dom::escape_html(&child.text()));
            continue;
        }
        if !child.is_element() || scoring::is_skipped(&child) {
            continue;
        }

        let tag = dom::tag_name(&child);
        if LINK_HEAVY_BLOCKS.contains(&tag.as_str()) && is_link_heavy(&child) {
            tracing::trace!(tag = %tag, "dropping link-heavy block");
            continue;
        }

        push_clean_element(&child, out);
    }
}

fn push_kept_attributes(node: &NodeRef, tag: &str, out: &mut String) {
    for name in KEPT_ATTRIBUTES {
        if let Some(value) = node.attr(name) {
            push_attribute(out, name, &value);
        }
    }

    // Language hints on code blocks are the only classes kept
    if matches!(tag, "pre" | "code") {
        if let Some(class) = node.attr("class") {
            let languages: Vec<&str> = class
                .split_whitespace()
                .filter(|t| t.starts_with("language-") || t.starts_with("lang-"))
                .collect();
            if !languages.is_empty() {
                push_attribute(out, "class", &languages.join(" "));
            }
        }
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&dom::escape_html(value));
    out.push('"');
}
