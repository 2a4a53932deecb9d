//! Output filename derivation.

use std::path::Path;

use htmldown::output::derived_path;
use htmldown::output_stem;

#[test]
fn last_path_segment_without_extension() {
    assert_eq!(output_stem("https://example.com/a/b/report.html"), "report");
    assert_eq!(output_stem("https://example.com/a/b/report.html?page=2#top"), "report");
    assert_eq!(output_stem("http://example.com/notes"), "notes");
}

#[test]
fn host_label_for_empty_path() {
    assert_eq!(output_stem("https://www.example.com"), "example");
    assert_eq!(output_stem("https://www.example.com/"), "example");
    assert_eq!(output_stem("https://docs.rs"), "docs");
}

#[test]
fn port_is_not_part_of_the_stem() {
    assert_eq!(output_stem("http://localhost:8080/"), "localhost");
}

#[test]
fn fallback_stem() {
    assert_eq!(output_stem(""), "output");
    assert_eq!(output_stem("garbage"), "output");
    assert_eq!(output_stem("https://example.com/.md"), "output");
}

#[test]
fn derived_path_adds_markdown_extension() {
    assert_eq!(
        derived_path("https://example.com/guide/intro.htm", Path::new("docs")),
        Path::new("docs").join("intro.md")
    );
    assert_eq!(
        derived_path("https://www.rust-lang.org", Path::new(".")),
        Path::new(".").join("rust-lang.md")
    );
}
