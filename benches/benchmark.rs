//! Performance benchmarks for htmldown.
//!
//! Run with: `cargo bench`
//!
//! Covers extraction alone, rendering alone and the full conversion, on a
//! small fixture and on a synthetic long article.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use htmldown::{extract, html_to_markdown, markdown, RenderOptions};

const SAMPLE_HTML: &str = include_str!("../tests/fixtures/article.html");
const PAGE_URL: &str = "https://example.com/blog/hello.html";

/// A long article with a navigation bar and a link-heavy sidebar.
fn long_article(paragraphs: usize) -> String {
    let mut html = String::from(
        r#"<html><head><title>Long Read</title></head><body>
        <nav><a href="/">Home</a> <a href="/blog">Blog</a></nav>
        <div class="sidebar"><ul><li><a href="/1">One</a></li><li><a href="/2">Two</a></li></ul></div>
        <div id="story">"#,
    );
    for i in 0..paragraphs {
        html.push_str(&format!(
            "<p>Paragraph {i} carries the argument forward, with a <a href=\"/ref/{i}#n\">reference</a>, \
             some <em>emphasis</em>, and enough words to be wrapped across several lines.</p>"
        ));
    }
    html.push_str("</div><footer>Footer</footer></body></html>");
    html
}

fn bench_extract(c: &mut Criterion) {
    c.bench_function("extract_sample", |b| {
        b.iter(|| extract(black_box(SAMPLE_HTML)));
    });
}

fn bench_render(c: &mut Criterion) {
    let fragment = extract(SAMPLE_HTML).content_html;
    let base = url::Url::parse(PAGE_URL).ok();
    let options = RenderOptions::default();

    c.bench_function("render_sample", |b| {
        b.iter(|| markdown::render(black_box(&fragment), base.as_ref(), &options));
    });
}

fn bench_convert_sizes(c: &mut Criterion) {
    let options = RenderOptions::default();
    let mut group = c.benchmark_group("html_to_markdown");

    for paragraphs in [10, 100, 1000] {
        let html = long_article(paragraphs);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("paragraphs", paragraphs),
            &html,
            |b, html| {
                b.iter(|| html_to_markdown(black_box(html), PAGE_URL, &options));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_extract, bench_render, bench_convert_sizes);
criterion_main!(benches);
