//! Fetch and write tests against a local mock server.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use std::net::TcpListener;
use std::time::Duration;

use htmldown::{fetch_and_convert, fetch_html, fetch_to_file, Config, Error, FetchOptions};

const ARTICLE: &str = include_str!("fixtures/article.html");

fn short_timeout() -> FetchOptions {
    FetchOptions {
        timeout: Duration::from_secs(1),
        connect_timeout: Duration::from_secs(1),
        ..FetchOptions::default()
    }
}

#[test]
fn fetches_html_text() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/article.html")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(ARTICLE)
        .create();

    let url = format!("{}/article.html", server.url());
    let html = fetch_html(&url, &FetchOptions::default()).expect("fetch succeeds");

    assert!(html.contains("<title>Hello Page</title>"));
    mock.assert();
}

#[test]
fn sends_configured_user_agent() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/")
        .match_header("user-agent", "htmldown-test/1.0")
        .with_body("<p>ok</p>")
        .create();

    let options = FetchOptions {
        user_agent: "htmldown-test/1.0".to_string(),
        ..FetchOptions::default()
    };
    fetch_html(&format!("{}/", server.url()), &options).expect("fetch succeeds");
    mock.assert();
}

#[test]
fn decodes_using_header_charset() {
    let mut server = mockito::Server::new();
    let mut body = b"<html><head><title>Caf".to_vec();
    body.push(0xE9);
    body.extend_from_slice(b"</title></head><body></body></html>");

    server
        .mock("GET", "/latin1")
        .with_header("content-type", "text/html; charset=windows-1252")
        .with_body(body)
        .create();

    let html = fetch_html(&format!("{}/latin1", server.url()), &FetchOptions::default())
        .expect("fetch succeeds");
    assert!(html.contains("Café"));
}

#[test]
fn non_success_status_is_an_error() {
    let mut server = mockito::Server::new();
    server.mock("GET", "/missing").with_status(404).create();

    let result = fetch_html(&format!("{}/missing", server.url()), &FetchOptions::default());
    match result {
        Err(Error::Status { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[test]
fn redirects_are_followed() {
    let mut server = mockito::Server::new();
    let target = format!("{}/new", server.url());
    server
        .mock("GET", "/old")
        .with_status(301)
        .with_header("location", &target)
        .create();
    server.mock("GET", "/new").with_body("<p>moved</p>").create();

    let html = fetch_html(&format!("{}/old", server.url()), &FetchOptions::default())
        .expect("redirect followed");
    assert!(html.contains("moved"));
}

#[test]
fn zero_redirect_limit_stops_at_the_redirect() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/old")
        .with_status(302)
        .with_header("location", "/new")
        .create();

    let options = FetchOptions {
        max_redirects: 0,
        ..FetchOptions::default()
    };
    let result = fetch_html(&format!("{}/old", server.url()), &options);
    assert!(matches!(result, Err(Error::Status { .. })), "{result:?}");
}

#[test]
fn unresponsive_server_times_out() {
    // Accepts connections at the OS level but never answers
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let url = format!("http://{}/slow", listener.local_addr().expect("addr"));

    let result = fetch_html(&url, &short_timeout());
    assert!(matches!(result, Err(Error::Timeout { .. })), "{result:?}");
    drop(listener);
}

#[test]
fn invalid_url_is_rejected() {
    let result = fetch_html("::not a url::", &FetchOptions::default());
    assert!(matches!(result, Err(Error::InvalidUrl { .. })));
}

#[test]
fn fetch_and_convert_writes_requested_path() {
    let mut server = mockito::Server::new();
    server.mock("GET", "/article.html").with_body(ARTICLE).create();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.md");

    let url = format!("{}/article.html", server.url());
    let markdown =
        fetch_and_convert(&url, Some(&path), &Config::default()).expect("convert succeeds");

    assert!(markdown.starts_with("# Hello Page\n\n"));
    assert_eq!(std::fs::read_to_string(&path).expect("read back"), markdown);
}

#[test]
fn fetch_to_file_derives_the_name_from_the_url() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/posts/hello-world.html")
        .with_body(ARTICLE)
        .create();
    let dir = tempfile::tempdir().expect("tempdir");

    let url = format!("{}/posts/hello-world.html", server.url());
    let path = fetch_to_file(&url, dir.path(), &Config::default()).expect("convert succeeds");

    assert_eq!(path, dir.path().join("hello-world.md"));
    assert!(path.exists());
}

#[test]
fn failed_fetch_writes_nothing() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let url = format!("http://{}/slow.html", listener.local_addr().expect("addr"));
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        fetch: short_timeout(),
        ..Config::default()
    };

    let result = fetch_to_file(&url, dir.path(), &config);

    assert!(result.is_err());
    assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 0);
}
