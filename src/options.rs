//! Configuration for fetching and rendering.
//!
//! Every knob is carried in an explicit value passed at call time; there are
//! no process-wide defaults to mutate.

use std::time::Duration;

/// Default wrap width for prose lines.
pub const DEFAULT_BODY_WIDTH: usize = 80;

/// Options controlling the HTTP fetch.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use htmldown::FetchOptions;
///
/// let options = FetchOptions {
///     timeout: Duration::from_secs(5),
///     ..FetchOptions::default()
/// };
/// assert_eq!(options.max_redirects, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Total wall-clock cap for the request, body included.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Cap on establishing the connection.
    ///
    /// Default: 10 seconds
    pub connect_timeout: Duration,

    /// Maximum number of redirects to follow. `0` disables redirects.
    ///
    /// Default: `10`
    pub max_redirects: usize,

    /// `User-Agent` header sent with the request.
    ///
    /// Default: `htmldown/<crate version>`
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_redirects: 10,
            user_agent: concat!("htmldown/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Options controlling HTML to Markdown rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RenderOptions {
    /// Column at which prose is wrapped. `0` disables wrapping.
    ///
    /// Code blocks, headings, list items and tables are never wrapped.
    ///
    /// Default: `80`
    pub body_width: usize,

    /// Render `<a>` elements as `[text](href)`. When false only the text is kept.
    ///
    /// Default: `true`
    pub include_links: bool,

    /// Render `<img>` elements as `![alt](src)`. When false they are dropped.
    ///
    /// Default: `true`
    pub include_images: bool,

    /// Keep `**strong**` and `_emphasis_` markers.
    ///
    /// Default: `true`
    pub include_emphasis: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            body_width: DEFAULT_BODY_WIDTH,
            include_links: true,
            include_images: true,
            include_emphasis: true,
        }
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub fetch: FetchOptions,
    pub render: RenderOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_defaults_match_reference_behaviour() {
        let opts = FetchOptions::default();
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert_eq!(opts.max_redirects, 10);
        assert!(opts.user_agent.starts_with("htmldown/"));
    }

    #[test]
    fn render_defaults_keep_links_images_and_emphasis() {
        let opts = RenderOptions::default();
        assert_eq!(opts.body_width, 80);
        assert!(opts.include_links);
        assert!(opts.include_images);
        assert!(opts.include_emphasis);
    }

    #[test]
    fn struct_update_overrides_selected_fields_only() {
        let opts = RenderOptions {
            body_width: 0,
            ..RenderOptions::default()
        };
        assert_eq!(opts.body_width, 0);
        assert!(opts.include_links);
    }
}
