//! # htmldown
//!
//! Fetch a web page, keep its main readable content and save it as Markdown.
//!
//! The pipeline is fetch → extract → render → post-process → write. Content
//! extraction uses a readability-style scorer that strips navigation,
//! sidebars and other boilerplate; rendering keeps links and images and wraps
//! prose.
//!
//! ## Quick Start
//!
//! ```rust
//! use htmldown::{html_to_markdown, RenderOptions};
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><article><p>Main content here, long enough to be scored as the article body.</p>
//! <p>See <a href="/more#details">more</a>.</p></article></body></html>"#;
//!
//! let markdown = html_to_markdown(html, "https://example.com/post", &RenderOptions::default());
//! assert!(markdown.starts_with("# My Article\n\n"));
//! assert!(markdown.contains("[more](https://example.com/more)"));
//! ```
//!
//! Fetching goes through [`fetch_and_convert`] or [`fetch_to_file`], which
//! take a [`Config`] bundling [`FetchOptions`] and [`RenderOptions`].

mod error;
mod extract;
mod fetch;
mod options;
mod patterns;
mod result;

/// Read-only helpers over `dom_query` nodes.
pub mod dom;

/// Document title recovery.
pub mod metadata;

/// URL utilities for link resolution and output filenames.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Readability-style candidate scoring.
pub mod scoring;

/// Link density testing for boilerplate detection.
pub mod link_density;

/// HTML to Markdown rendering and post-processing.
pub mod markdown;

/// Output destinations and atomic file writes.
pub mod output;

/// Command-line interface.
pub mod cli;

/// Subscriber setup for the binary.
pub mod logging;

use std::path::{Path, PathBuf};

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::{extract, is_empty_shell};
pub use fetch::fetch_html;
pub use options::{Config, FetchOptions, RenderOptions};
pub use output::Destination;
pub use result::{ContentSource, Extracted};
pub use url_utils::output_stem;

/// Extract content from raw bytes with automatic encoding detection.
///
/// The charset comes from `<meta charset>` or `http-equiv`, defaulting to UTF-8.
///
/// # Example
///
/// ```rust
/// use htmldown::extract_bytes;
///
/// let html = b"<html><head><title>Test</title></head><body><p>Short.</p></body></html>";
/// let extracted = extract_bytes(html);
/// assert_eq!(extracted.title.as_deref(), Some("Test"));
/// ```
#[must_use]
pub fn extract_bytes(html: &[u8]) -> Extracted {
    extract(&encoding::decode_body(html, None))
}

/// Convert an HTML document to Markdown.
///
/// Extracts the main content, renders it with links resolved against
/// `base_url`, strips link fragments and prepends the title heading.
#[must_use]
pub fn html_to_markdown(html: &str, base_url: &str, options: &RenderOptions) -> String {
    let extracted = extract(html);
    tracing::debug!(
        source = %extracted.source,
        title = extracted.title.as_deref().unwrap_or(""),
        "extracted content"
    );

    let base = url_utils::parse_url(base_url);
    let rendered = markdown::render(&extracted.content_html, base.as_ref(), options);
    let cleaned = markdown::strip_link_fragments(&rendered);
    markdown::prepend_title(&cleaned, extracted.title.as_deref())
}

/// Fetch `url` and convert it to Markdown.
///
/// When `output` is given the Markdown is also written there (atomically).
/// The Markdown is returned either way.
pub fn fetch_and_convert(url: &str, output: Option<&Path>, config: &Config) -> Result<String> {
    let html = fetch_html(url, &config.fetch)?;
    let markdown = html_to_markdown(&html, url, &config.render);

    if let Some(path) = output {
        output::write_file(path, &markdown)?;
    }
    Ok(markdown)
}

/// Fetch `url` and write its Markdown to `{dir}/{output_stem(url)}.md`.
///
/// Returns the written path.
pub fn fetch_to_file(url: &str, dir: &Path, config: &Config) -> Result<PathBuf> {
    let path = output::derived_path(url, dir);
    fetch_and_convert(url, Some(&path), config)?;
    Ok(path)
}
