//! Link Density Testing
//!
//! Regions whose text is mostly link text are navigation, tag clouds or
//! "related" boxes. The scorer discounts candidates by their link density and
//! the cleaner drops link-heavy blocks outright.

use crate::dom::{self, NodeRef};

/// Collect heuristics on link text.
///
/// Returns (total_link_length, num_short_links, non_empty_links)
fn collect_link_info(links: &[NodeRef]) -> (usize, usize, usize) {
    let mut link_length = 0;
    let mut n_short_links = 0;
    let mut n_non_empty_links = 0;

    for link in links {
        let text_length = dom::text_len(link);

        if text_length == 0 {
            continue;
        }

        link_length += text_length;
        if text_length < 10 {
            n_short_links += 1;
        }
        n_non_empty_links += 1;
    }

    (link_length, n_short_links, n_non_empty_links)
}

/// All `<a>` descendants of a node, in document order.
fn links_of<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.descendants()
        .into_iter()
        .filter(|n| n.is_element() && dom::tag_name(n) == "a")
        .collect()
}

/// Share of a node's text that sits inside links, in `0.0..=1.0`.
#[must_use]
pub fn link_density(node: &NodeRef) -> f64 {
    let text_length = dom::text_len(node);
    if text_length == 0 {
        return 0.0;
    }

    let (link_length, _, _) = collect_link_info(&links_of(node));
    (link_length as f64 / text_length as f64).min(1.0)
}

/// Check whether a block is rich in links and probably boilerplate.
///
/// Short blocks are judged on the shape of their links (mostly link text, or
/// mostly very short links as in menus); any block whose link density passes
/// one half is dropped regardless of length.
#[must_use]
pub fn is_link_heavy(node: &NodeRef) -> bool {
    let links = links_of(node);
    if links.is_empty() {
        return false;
    }

    let text_length = dom::text_len(node);

    // Shortcut for a single link that makes up the whole block
    if let [link] = links.as_slice() {
        let link_length = dom::text_len(link);
        if link_length > 100 && (link_length as f64) > (text_length as f64) * 0.9 {
            return true;
        }
    }

    let has_next_sibling = node.next_element_sibling().is_some();
    let limit_length: usize = if dom::tag_name(node) == "p" {
        if has_next_sibling { 30 } else { 60 }
    } else if has_next_sibling {
        100
    } else {
        300
    };

    let (link_length, n_short_links, n_non_empty_links) = collect_link_info(&links);

    if text_length < limit_length {
        if n_non_empty_links == 0 {
            return true;
        }

        if (link_length as f64) > (text_length as f64) * 0.8 {
            return true;
        }

        // More than 80% of links are short (< 10 chars), typical of menus
        if n_non_empty_links > 1
            && (n_short_links as f64) / (n_non_empty_links as f64) > 0.8
        {
            return true;
        }
    }

    text_length > 0 && (link_length as f64) / (text_length as f64) > 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    fn first<'a>(doc: &'a Document, selector: &str) -> NodeRef<'a> {
        doc.select(selector).nodes()[0]
    }

    #[test]
    fn density_of_plain_text_is_zero() {
        let doc = Document::from("<div><p>No links in here at all.</p></div>");
        assert_eq!(link_density(&first(&doc, "div")), 0.0);
    }

    #[test]
    fn density_counts_link_text() {
        let doc = Document::from(r#"<div>abcde <a href="/x">fghij</a></div>"#);
        let density = link_density(&first(&doc, "div"));
        // "abcde fghij" is 11 chars, 5 in the link
        assert!((density - 5.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn menu_of_short_links_is_heavy() {
        let doc = Document::from(
            r#"<ul><li><a href="/">Home</a></li><li><a href="/a">About</a></li><li><a href="/b">Blog</a></li></ul>"#,
        );
        assert!(is_link_heavy(&first(&doc, "ul")));
    }

    #[test]
    fn prose_with_one_link_is_not_heavy() {
        let doc = Document::from(
            r#"<div>This is a long paragraph of real prose that mentions <a href="/x">one source</a> in passing and keeps going with more words to make it realistic.</div>"#,
        );
        assert!(!is_link_heavy(&first(&doc, "div")));
    }

    #[test]
    fn block_without_links_is_never_heavy() {
        let doc = Document::from("<div>short</div>");
        assert!(!is_link_heavy(&first(&doc, "div")));
    }
}
