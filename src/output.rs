//! Output destinations.
//!
//! Files are written through a temp file in the target directory and then
//! renamed over the destination, so a failed run never leaves a partial file.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::url_utils::output_stem;

/// Extension of derived output files.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Where rendered Markdown goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Standard output, followed by a newline. No file is touched.
    Stdout,
    /// An explicit file path, written exactly.
    Path(PathBuf),
    /// `{dir}/{output_stem(url)}.md`.
    Derived { url: String, dir: PathBuf },
}

impl Destination {
    /// The file this destination writes to, if any.
    #[must_use]
    pub fn file_path(&self) -> Option<PathBuf> {
        match self {
            Self::Stdout => None,
            Self::Path(path) => Some(path.clone()),
            Self::Derived { url, dir } => Some(derived_path(url, dir)),
        }
    }
}

/// Output path derived from a URL inside `dir`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use htmldown::output::derived_path;
///
/// let path = derived_path("https://example.com/posts/hello.html", Path::new("out"));
/// assert_eq!(path, Path::new("out/hello.md"));
/// ```
#[must_use]
pub fn derived_path(url: &str, dir: &Path) -> PathBuf {
    dir.join(format!("{}.{MARKDOWN_EXTENSION}", output_stem(url)))
}

/// Write Markdown to a destination. `stdout` receives [`Destination::Stdout`] output.
///
/// Returns the written path for file destinations.
pub fn write(markdown: &str, destination: &Destination, stdout: &mut impl Write) -> Result<Option<PathBuf>> {
    let Some(path) = destination.file_path() else {
        stdout
            .write_all(markdown.as_bytes())
            .and_then(|()| stdout.write_all(b"\n"))
            .and_then(|()| stdout.flush())
            .map_err(|source| Error::Io {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
        return Ok(None);
    };

    write_file(&path, markdown)?;
    Ok(Some(path))
}

/// Atomically create or replace `path` with `contents`.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(io_error)?;
    temp.write_all(contents.as_bytes()).map_err(io_error)?;
    temp.as_file().sync_all().map_err(io_error)?;
    temp.persist(path).map_err(|e| io_error(e.error))?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote markdown");
    Ok(())
}
