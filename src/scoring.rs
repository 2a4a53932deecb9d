//! Readability-style content scoring.
//!
//! Paragraph-like elements award points to their parent and grandparent;
//! the ancestor with the best link-density-adjusted total is the main
//! content. Scores live in a side table keyed by [`NodeId`] so the parsed
//! tree is never touched and can be reused for the fallback path.

use std::collections::HashMap;

use crate::dom::{self, NodeId, NodeRef};
use crate::link_density::link_density;
use crate::patterns::{
    ADVERTISEMENT_CLASS, MAYBE_CANDIDATE, NAVIGATION_CLASS, NEGATIVE_CLASS, POSITIVE_CLASS,
    UNLIKELY_CANDIDATES,
};

/// Paragraphs shorter than this carry no signal.
pub const MIN_PARAGRAPH_LEN: usize = 25;

/// Weight added or subtracted for a positive or negative class/id.
const CLASS_WEIGHT: f64 = 25.0;

/// Elements skipped with their whole subtree, whatever their class.
const SKIPPED_TAGS: &[&str] = &["nav", "aside", "footer", "form"];

/// ARIA roles that mark non-content regions.
const SKIPPED_ROLES: &[&str] = &[
    "menu", "menubar", "complementary", "navigation", "alert", "alertdialog", "dialog",
];

/// A scored element.
#[derive(Clone, Copy)]
pub struct Candidate<'a> {
    pub node: NodeRef<'a>,
    /// Accumulated score before the link density discount.
    pub raw_score: f64,
}

impl Candidate<'_> {
    /// Score after discounting link text.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.raw_score * (1.0 - link_density(&self.node))
    }
}

/// Scores for every element that received points, in first-scored order.
#[derive(Default)]
pub struct ScoreTable<'a> {
    candidates: Vec<Candidate<'a>>,
    index: HashMap<NodeId, usize>,
}

impl<'a> ScoreTable<'a> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Final (discounted) score of a node, if it was scored at all.
    #[must_use]
    pub fn score_of(&self, node: &NodeRef) -> Option<f64> {
        self.index.get(&node.id).map(|&i| self.candidates[i].score())
    }

    /// The best candidate and its final score. Ties keep the first-scored node.
    #[must_use]
    pub fn top(&self) -> Option<(Candidate<'a>, f64)> {
        let mut best: Option<(Candidate<'a>, f64)> = None;
        for candidate in &self.candidates {
            let score = candidate.score();
            if best.as_ref().is_none_or(|(_, top)| score > *top) {
                best = Some((*candidate, score));
            }
        }
        best
    }

    fn add(&mut self, node: NodeRef<'a>, points: f64) {
        if let Some(&i) = self.index.get(&node.id) {
            self.candidates[i].raw_score += points;
            return;
        }
        self.index.insert(node.id, self.candidates.len());
        self.candidates.push(Candidate {
            node,
            raw_score: initial_score(&node) + points,
        });
    }
}

/// Score all candidates below `root`.
#[must_use]
pub fn score_candidates<'a>(root: &NodeRef<'a>) -> ScoreTable<'a> {
    let mut paragraphs = Vec::new();
    collect_scorable(root, &mut paragraphs);

    let mut table = ScoreTable::default();
    for paragraph in paragraphs {
        let text = dom::normalized_text(&paragraph);
        let len = text.chars().count();
        if len < MIN_PARAGRAPH_LEN {
            continue;
        }

        let commas = text.matches(',').count() as f64;
        let points = 1.0 + commas + (len as f64 / 100.0).floor().min(3.0);

        let Some(parent) = paragraph.parent().filter(NodeRef::is_element) else {
            continue;
        };
        table.add(parent, points);

        if let Some(grandparent) = parent.parent().filter(NodeRef::is_element) {
            table.add(grandparent, points / 2.0);
        }
    }

    tracing::trace!(candidates = table.len(), "scored content candidates");
    table
}

/// Depth-first walk collecting paragraph-like elements, pruning unlikely subtrees.
fn collect_scorable<'a>(node: &NodeRef<'a>, out: &mut Vec<NodeRef<'a>>) {
    for child in dom::element_children(node) {
        if is_skipped(&child) {
            continue;
        }

        match dom::tag_name(&child).as_str() {
            "p" | "pre" | "td" => out.push(child),
            "div" | "section" if !dom::has_block_children(&child) => out.push(child),
            _ => {}
        }
        collect_scorable(&child, out);
    }
}

/// Whether an element and its subtree should be ignored entirely.
#[must_use]
pub fn is_skipped(node: &NodeRef) -> bool {
    let tag = dom::tag_name(node);
    if dom::NON_CONTENT_TAGS.contains(&tag.as_str()) || SKIPPED_TAGS.contains(&tag.as_str()) {
        return true;
    }
    if dom::is_hidden(node) {
        return true;
    }
    if node
        .attr("role")
        .is_some_and(|role| SKIPPED_ROLES.contains(&role.to_ascii_lowercase().as_str()))
    {
        return true;
    }
    is_unlikely_candidate(node)
}

/// Class/id based boilerplate check.
///
/// `html`, `body`, `article`, `main` and `a` are never unlikely.
#[must_use]
pub fn is_unlikely_candidate(node: &NodeRef) -> bool {
    let tag = dom::tag_name(node);
    if matches!(tag.as_str(), "html" | "body" | "article" | "main" | "a") {
        return false;
    }

    let names = dom::class_and_id(node);
    if names.is_empty() {
        return false;
    }

    if names
        .split_whitespace()
        .any(|token| ADVERTISEMENT_CLASS.is_match(token) || NAVIGATION_CLASS.is_match(token))
    {
        return true;
    }

    UNLIKELY_CANDIDATES.is_match(&names) && !MAYBE_CANDIDATE.is_match(&names)
}

/// Class and id weight of an element.
#[must_use]
pub fn class_weight(node: &NodeRef) -> f64 {
    let mut weight = 0.0;
    for attr in ["class", "id"] {
        let Some(value) = node.attr(attr) else {
            continue;
        };
        if NEGATIVE_CLASS.is_match(&value) {
            weight -= CLASS_WEIGHT;
        }
        if POSITIVE_CLASS.is_match(&value) {
            weight += CLASS_WEIGHT;
        }
    }
    weight
}

/// Base score for an element the first time it receives points.
fn initial_score(node: &NodeRef) -> f64 {
    let tag_score = match dom::tag_name(node).as_str() {
        "article" | "main" => 10.0,
        "div" => 5.0,
        "pre" | "td" | "blockquote" => 3.0,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" => -5.0,
        _ => 0.0,
    };
    tag_score + class_weight(node)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use dom_query::Document;

    fn body(doc: &Document) -> NodeRef<'_> {
        doc.select("body").nodes()[0]
    }

    const ARTICLE: &str = r#"<html><body>
        <div id="menu"><p>Home, About, Contact, and many other links for the site</p></div>
        <div id="story">
            <p>The first paragraph has enough words in it, with commas, to be scored.</p>
            <p>A second paragraph follows, again long enough to count as real content.</p>
        </div>
    </body></html>"#;

    #[test]
    fn top_candidate_is_paragraph_parent() {
        let doc = Document::from(ARTICLE);
        let table = score_candidates(&body(&doc));
        let (top, score) = table.top().expect("a candidate");
        assert_eq!(top.node.attr("id").as_deref(), Some("story"));
        assert!(score > 0.0);
    }

    #[test]
    fn unlikely_subtrees_are_not_scored() {
        let doc = Document::from(ARTICLE);
        let table = score_candidates(&body(&doc));
        let menu = doc.select("#menu").nodes()[0];
        assert!(table.score_of(&menu).is_none());
    }

    #[test]
    fn short_paragraphs_are_ignored() {
        let doc = Document::from("<html><body><div><p>Too short.</p></div></body></html>");
        assert!(score_candidates(&body(&doc)).is_empty());
    }

    #[test]
    fn scoring_is_deterministic() {
        let doc = Document::from(ARTICLE);
        let a = score_candidates(&body(&doc)).top().map(|(c, s)| (c.node.id, s));
        let b = score_candidates(&body(&doc)).top().map(|(c, s)| (c.node.id, s));
        assert_eq!(a, b);
    }

    #[test]
    fn class_weights() {
        let doc = Document::from(
            r#"<div id=a class="post-content">x</div><div id=b class="sidebar">x</div><div id=c>x</div>"#,
        );
        let node = |sel: &str| doc.select(sel).nodes()[0];
        assert_eq!(class_weight(&node("#a")), 25.0);
        assert_eq!(class_weight(&node("#b")), -25.0);
        assert_eq!(class_weight(&node("#c")), 0.0);
    }

    #[test]
    fn unlikely_detection() {
        let doc = Document::from(
            r#"<div id=nav>x</div><div class="ad">x</div><div class="sidebar-content">x</div><article class="comment">x</article>"#,
        );
        let node = |sel: &str| doc.select(sel).nodes()[0];
        assert!(is_unlikely_candidate(&node("#nav")));
        assert!(is_unlikely_candidate(&node(".ad")));
        assert!(!is_unlikely_candidate(&node(".sidebar-content")));
        assert!(!is_unlikely_candidate(&node("article")));
    }
}
