//! Result types for extraction output.

use std::fmt;

/// Which step of the fallback chain produced the extracted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// The readability candidate was accepted.
    Readability,
    /// Readability came up empty; the inner HTML of `<body>` was used.
    Body,
    /// No `<body>` tag in the source; the HTML was passed through unmodified.
    Document,
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Readability => "readability",
            Self::Body => "body",
            Self::Document => "document",
        };
        f.write_str(name)
    }
}

/// Main content of a page, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// HTML fragment holding the main content. Never an empty shell when
    /// `source` is [`ContentSource::Readability`].
    pub content_html: String,

    /// Document title, if one could be recovered.
    pub title: Option<String>,

    pub source: ContentSource,
}
