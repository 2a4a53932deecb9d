//! Command-line interface.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use crate::options::{Config, FetchOptions, RenderOptions, DEFAULT_BODY_WIDTH};
use crate::output::{self, Destination};

/// Fetch a web page and save its main content as Markdown.
#[derive(Debug, Parser)]
#[command(name = "htmldown", version)]
#[command(about = "Fetch a web page and save its main content as Markdown", long_about = None)]
pub struct Cli {
    /// URL of the page to convert.
    pub url: String,

    /// Write the Markdown to this file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Directory for the derived output file.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Print the Markdown to stdout instead of writing a file.
    #[arg(short, long)]
    pub print: bool,

    /// Wrap prose at this column (0 disables wrapping).
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BODY_WIDTH)]
    pub width: usize,

    /// Give up on the request after this many seconds.
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Maximum number of redirects to follow.
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub max_redirects: usize,

    /// User-Agent header to send.
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Render links as plain text.
    #[arg(long)]
    pub no_links: bool,

    /// Drop images.
    #[arg(long)]
    pub no_images: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Pipeline configuration from the flags.
    #[must_use]
    pub fn config(&self) -> Config {
        let defaults = FetchOptions::default();
        Config {
            fetch: FetchOptions {
                timeout: Duration::from_secs(self.timeout),
                max_redirects: self.max_redirects,
                user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
                ..defaults
            },
            render: RenderOptions {
                body_width: self.width,
                include_links: !self.no_links,
                include_images: !self.no_images,
                ..RenderOptions::default()
            },
        }
    }

    /// Output destination: `--print`, then `--output`, then a path derived in `--dir`.
    #[must_use]
    pub fn destination(&self) -> Destination {
        if self.print {
            Destination::Stdout
        } else if let Some(path) = &self.output {
            Destination::Path(path.clone())
        } else {
            Destination::Derived {
                url: self.url.clone(),
                dir: self.dir.clone(),
            }
        }
    }
}

/// Run the CLI. Markdown (for `--print`) and the `Saved to:` line go to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = cli.config();
    let markdown = crate::fetch_and_convert(&cli.url, None, &config)?;

    let written = output::write(&markdown, &cli.destination(), out)?;
    if let Some(path) = written {
        writeln!(out, "Saved to: {}", path.display()).context("failed to write to stdout")?;
    }
    Ok(())
}
