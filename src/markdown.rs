//! HTML to Markdown rendering.
//!
//! The renderer walks a parsed fragment and emits blocks (paragraphs,
//! headings, lists, code, quotes, tables) separated by blank lines. Prose is
//! word-wrapped to [`RenderOptions::body_width`]; everything else is emitted
//! as-is. Post-processing helpers strip link fragments and prepend the title.

use dom_query::Document;
use url::Url;

use crate::dom::{self, NodeRef};
use crate::options::RenderOptions;
use crate::patterns::LINK_WITH_FRAGMENT;
use crate::url_utils::create_absolute_url;

/// Characters that have special meaning in Markdown and need escaping.
const MARKDOWN_SPECIAL_CHARS: &[char] = &['\\', '*', '_', '`', '[', ']', '<', '>'];

/// Elements rendered as blocks in addition to [`dom::BLOCK_TAGS`].
const EXTRA_BLOCK_TAGS: &[&str] = &[
    "html", "body", "center", "summary", "caption", "thead", "tbody", "tfoot", "tr", "td", "th",
];

/// Escape Markdown special characters in text content.
///
/// # Examples
///
/// ```
/// use htmldown::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("*not italic*"), r"\*not italic\*");
/// assert_eq!(escape_markdown("my_variable_name"), r"my\_variable\_name");
/// ```
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 4);

    for ch in text.chars() {
        if MARKDOWN_SPECIAL_CHARS.contains(&ch) {
            result.push('\\');
        }
        result.push(ch);
    }

    result
}

/// Render an HTML fragment to Markdown.
///
/// Relative `href`/`src` values are resolved against `base_url`. The output
/// ends with a single newline unless it is empty.
///
/// # Examples
///
/// ```
/// use htmldown::markdown::render;
/// use htmldown::RenderOptions;
///
/// let md = render("<p>Hello <em>there</em></p><p>Bye</p>", None, &RenderOptions::default());
/// assert_eq!(md, "Hello _there_\n\nBye\n");
/// ```
#[must_use]
pub fn render(fragment: &str, base_url: Option<&Url>, options: &RenderOptions) -> String {
    let doc = Document::from(fragment);
    let Some(body) = doc.select("body").nodes().first().copied() else {
        return String::new();
    };

    let renderer = Renderer {
        options,
        base: base_url,
    };
    let mut blocks = Vec::new();
    renderer.blocks(
        &body,
        Context {
            width: options.body_width,
            indent: 0,
        },
        &mut blocks,
    );

    let mut out = blocks
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Remove `#fragment` suffixes from links that also have a path.
///
/// Same-page anchors such as `[top](#top)` have no path and are left as they are.
///
/// # Examples
///
/// ```
/// use htmldown::markdown::strip_link_fragments;
///
/// assert_eq!(strip_link_fragments("[a](https://x/y#z)"), "[a](https://x/y)");
/// assert_eq!(strip_link_fragments("[a](#z)"), "[a](#z)");
/// ```
#[must_use]
pub fn strip_link_fragments(markdown: &str) -> String {
    LINK_WITH_FRAGMENT
        .replace_all(markdown, "[${1}](${2})")
        .into_owned()
}

/// Prepend `# {title}` and a blank line when a non-blank title is given.
#[must_use]
pub fn prepend_title(markdown: &str, title: Option<&str>) -> String {
    match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => format!("# {title}\n\n{markdown}"),
        None => markdown.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Prose,
    List,
    Other,
}

struct Block {
    kind: BlockKind,
    text: String,
}

impl Block {
    fn new(kind: BlockKind, text: String) -> Self {
        Self { kind, text }
    }
}

/// Per-subtree rendering state.
#[derive(Debug, Clone, Copy)]
struct Context {
    /// Wrap width for prose; `0` disables wrapping.
    width: usize,
    /// Column at which nested list markers start.
    indent: usize,
}

struct Renderer<'a> {
    options: &'a RenderOptions,
    base: Option<&'a Url>,
}

impl Renderer<'_> {
    /// Render the children of `node` as a sequence of blocks.
    fn blocks(&self, node: &NodeRef, ctx: Context, out: &mut Vec<Block>) {
        let mut inline = String::new();

        for child in node.children() {
            if child.is_text() {
                inline.push_str(&text_node(&child));
                continue;
            }
            if !child.is_element() {
                continue;
            }

            let tag = dom::tag_name(&child);
            if dom::NON_CONTENT_TAGS.contains(&tag.as_str()) {
                continue;
            }

            if is_block_tag(&tag) {
                flush(&mut inline, ctx, out);
                self.block(&child, &tag, ctx, out);
            } else {
                inline.push_str(&self.inline(&child, &tag));
            }
        }

        flush(&mut inline, ctx, out);
    }

    fn block(&self, node: &NodeRef, tag: &str, ctx: Context, out: &mut Vec<Block>) {
        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = tag[1..].parse::<usize>().unwrap_or(1);
                let text = squeeze(&self.inline_children(node).replace('\n', " "));
                if !text.is_empty() {
                    out.push(Block::new(
                        BlockKind::Other,
                        format!("{} {text}", "#".repeat(level)),
                    ));
                }
            }
            "ul" | "ol" => {
                let text = self.list(node, tag == "ol", ctx);
                if !text.is_empty() {
                    out.push(Block::new(BlockKind::List, text));
                }
            }
            "pre" => {
                if let Some(code) = code_block(node) {
                    out.push(Block::new(BlockKind::Other, code));
                }
            }
            "blockquote" => {
                let mut inner = Vec::new();
                let inner_ctx = Context {
                    width: ctx.width.saturating_sub(2),
                    ..ctx
                };
                self.blocks(node, inner_ctx, &mut inner);
                let text = inner
                    .iter()
                    .map(|b| b.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n");
                if !text.is_empty() {
                    out.push(Block::new(BlockKind::Other, quote(&text)));
                }
            }
            "hr" => out.push(Block::new(BlockKind::Other, "* * *".to_string())),
            "table" if !is_layout_table(node) => {
                if let Some(table) = self.table(node) {
                    out.push(Block::new(BlockKind::Other, table));
                }
            }
            _ => self.blocks(node, ctx, out),
        }
    }

    fn list(&self, node: &NodeRef, ordered: bool, ctx: Context) -> String {
        let indent = " ".repeat(ctx.indent);
        let mut number = node
            .attr("start")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(1);
        let mut items = Vec::new();

        for child in dom::element_children(node) {
            let tag = dom::tag_name(&child);

            // Lists nested directly in lists, without an enclosing <li>
            if tag == "ul" || tag == "ol" {
                let nested_ctx = Context {
                    indent: ctx.indent + 2,
                    ..ctx
                };
                let nested = self.list(&child, tag == "ol", nested_ctx);
                if !nested.is_empty() {
                    items.push(nested);
                }
                continue;
            }
            if tag != "li" {
                continue;
            }

            let marker = if ordered {
                format!("{number}. ")
            } else {
                "* ".to_string()
            };
            number += 1;

            let mut blocks = Vec::new();
            let item_ctx = Context {
                width: 0,
                indent: ctx.indent + marker.len(),
            };
            self.blocks(&child, item_ctx, &mut blocks);
            if blocks.is_empty() {
                continue;
            }
            items.push(list_item(&indent, &marker, &blocks));
        }

        items.join("\n")
    }

    fn table(&self, node: &NodeRef) -> Option<String> {
        let rows: Vec<Vec<String>> = table_rows(node)
            .iter()
            .map(|tr| {
                table_cells(tr)
                    .iter()
                    .map(|cell| {
                        squeeze(&self.inline_children(cell).replace('\n', " ")).replace('|', "\\|")
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|cells| !cells.is_empty())
            .collect();

        let columns = rows.iter().map(Vec::len).max()?;
        let mut lines = Vec::with_capacity(rows.len() + 1);
        for (i, row) in rows.iter().enumerate() {
            let mut cells = row.clone();
            cells.resize(columns, String::new());
            lines.push(format!("| {} |", cells.join(" | ")));
            if i == 0 {
                lines.push(format!("|{}", " --- |".repeat(columns)));
            }
        }
        Some(lines.join("\n"))
    }

    fn inline(&self, node: &NodeRef, tag: &str) -> String {
        match tag {
            "br" => "\n".to_string(),
            "img" => self.image(node),
            "a" => self.link(node),
            "strong" | "b" => self.emphasis(node, "**"),
            "em" | "i" | "cite" | "dfn" => self.emphasis(node, "_"),
            "code" | "kbd" | "samp" | "tt" => code_span(&dom::collapse_whitespace(&node.text())),
            _ if dom::NON_CONTENT_TAGS.contains(&tag) => String::new(),
            _ if is_block_tag(tag) => format!(" {} ", self.inline_children(node)),
            _ => self.inline_children(node),
        }
    }

    fn inline_children(&self, node: &NodeRef) -> String {
        let mut out = String::new();
        for child in node.children() {
            if child.is_text() {
                out.push_str(&text_node(&child));
            } else if child.is_element() {
                let tag = dom::tag_name(&child);
                out.push_str(&self.inline(&child, &tag));
            }
        }
        out
    }

    fn emphasis(&self, node: &NodeRef, marker: &str) -> String {
        let inner = self.inline_children(node);
        if !self.options.include_emphasis {
            return inner;
        }
        surround(&inner, marker, marker)
    }

    fn link(&self, node: &NodeRef) -> String {
        let text = self.inline_children(node);
        if !self.options.include_links {
            return text;
        }

        let href = node
            .attr("href")
            .map(|h| h.trim().to_string())
            .unwrap_or_default();
        if href.is_empty() || href.to_ascii_lowercase().starts_with("javascript:") {
            return text;
        }
        if text.trim().is_empty() {
            return text;
        }

        let mut target = without_fragment(create_absolute_url(&href, self.base));
        if target.contains(char::is_whitespace) {
            target = format!("<{target}>");
        }
        surround(&text.replace('\n', " "), "[", &format!("]({target})"))
    }

    fn image(&self, node: &NodeRef) -> String {
        if !self.options.include_images {
            return String::new();
        }

        let Some(src) = node
            .attr("src")
            .or_else(|| node.attr("data-src"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        else {
            return String::new();
        };

        let alt = node
            .attr("alt")
            .map(|a| escape_markdown(dom::collapse_whitespace(&a).trim()))
            .unwrap_or_default();
        let src = create_absolute_url(&src, self.base);
        format!("![{alt}]({src})")
    }
}

/// Drop a `#fragment` from a link target that has a path. Same-page anchors
/// (`#top`) are returned as they are.
fn without_fragment(mut target: String) -> String {
    if let Some(pos) = target.find('#').filter(|&pos| pos > 0) {
        target.truncate(pos);
    }
    target
}

fn is_block_tag(tag: &str) -> bool {
    dom::BLOCK_TAGS.contains(&tag) || EXTRA_BLOCK_TAGS.contains(&tag)
}

fn text_node(node: &NodeRef) -> String {
    escape_markdown(&dom::collapse_whitespace(&node.text()))
}

/// Turn accumulated inline text into a wrapped prose block.
///
/// `\n` in the buffer marks a `<br>`; each hard-broken line is wrapped on
/// its own and the lines are joined with a Markdown hard break.
fn flush(inline: &mut String, ctx: Context, out: &mut Vec<Block>) {
    let text = inline
        .split('\n')
        .map(squeeze)
        .filter(|line| !line.is_empty())
        .map(|line| wrap(&escape_leading_marker(&line), ctx.width))
        .collect::<Vec<_>>()
        .join("  \n");
    inline.clear();

    if !text.is_empty() {
        out.push(Block::new(BlockKind::Prose, text));
    }
}

/// Collapse whitespace runs and trim.
fn squeeze(text: &str) -> String {
    dom::collapse_whitespace(text).trim().to_string()
}

/// Put `open`/`close` around the trimmed text, keeping outer whitespace outside.
fn surround(inner: &str, open: &str, close: &str) -> String {
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return inner.to_string();
    }
    let lead = if inner.starts_with(char::is_whitespace) { " " } else { "" };
    let trail = if inner.ends_with(char::is_whitespace) { " " } else { "" };
    format!("{lead}{open}{trimmed}{close}{trail}")
}

fn code_span(code: &str) -> String {
    let code = code.trim();
    if code.is_empty() {
        String::new()
    } else if code.contains('`') {
        format!("`` {code} ``")
    } else {
        format!("`{code}`")
    }
}

fn code_block(node: &NodeRef) -> Option<String> {
    let raw = node.text();
    let code = raw.trim_start_matches('\n').trim_end();
    if code.is_empty() {
        return None;
    }

    let language = code_language(node).unwrap_or_default();
    let fence = if code.contains("```") { "~~~" } else { "```" };
    Some(format!("{fence}{language}\n{code}\n{fence}"))
}

/// Language hint from a `language-*`/`lang-*` class on the `pre` or its `code`.
fn code_language(node: &NodeRef) -> Option<String> {
    let code_child = dom::element_children(node)
        .into_iter()
        .find(|c| dom::tag_name(c) == "code");

    [Some(*node), code_child]
        .into_iter()
        .flatten()
        .filter_map(|n| n.attr("class"))
        .find_map(|class| {
            class.split_whitespace().find_map(|token| {
                token
                    .strip_prefix("language-")
                    .or_else(|| token.strip_prefix("lang-"))
                    .filter(|lang| !lang.is_empty())
                    .map(str::to_string)
            })
        })
}

fn quote(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn list_item(indent: &str, marker: &str, blocks: &[Block]) -> String {
    let continuation = " ".repeat(indent.len() + marker.len());
    let mut lines: Vec<String> = Vec::new();
    let mut has_marker = false;

    for block in blocks {
        if block.kind == BlockKind::List {
            // Nested lists carry their own indentation
            lines.push(block.text.clone());
            continue;
        }
        for line in block.text.lines() {
            if !has_marker {
                lines.push(format!("{indent}{marker}{line}"));
                has_marker = true;
            } else if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{continuation}{line}"));
            }
        }
    }

    if !has_marker {
        lines.insert(0, format!("{indent}{}", marker.trim_end()));
    }
    lines.join("\n")
}

fn table_rows<'a>(table: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    table
        .descendants()
        .into_iter()
        .filter(|n| n.is_element() && dom::tag_name(n) == "tr")
        .collect()
}

fn table_cells<'a>(row: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    dom::element_children(row)
        .into_iter()
        .filter(|c| matches!(dom::tag_name(c).as_str(), "td" | "th"))
        .collect()
}

/// Tables used for page layout rather than data are rendered as plain blocks.
fn is_layout_table(table: &NodeRef) -> bool {
    if table
        .attr("role")
        .is_some_and(|role| role.eq_ignore_ascii_case("presentation"))
    {
        return true;
    }

    let rows = table_rows(table);
    let cells: Vec<NodeRef> = rows.iter().flat_map(table_cells).collect();
    if cells.iter().any(dom::has_block_children) {
        return true;
    }
    rows.iter().map(|r| table_cells(r).len()).max().unwrap_or(0) <= 1
}

/// Whether a word at the start of a line would be read as block syntax.
fn is_block_marker(word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    if word == "+" || word.chars().all(|c| c == '-' || c == '=') {
        return true;
    }
    if word.len() <= 6 && word.chars().all(|c| c == '#') {
        return true;
    }
    match word.strip_suffix('.').or_else(|| word.strip_suffix(')')) {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

/// Escape a leading word that would otherwise start a heading or list.
fn escape_leading_marker(line: &str) -> String {
    let first = line.split(' ').next().unwrap_or_default();
    if !is_block_marker(first) {
        return line.to_string();
    }
    if first.starts_with(|c: char| c.is_ascii_digit()) {
        // "1." -> "1\."
        let split = first.len() - 1;
        format!("{}\\{}", &line[..split], &line[split..])
    } else {
        format!("\\{line}")
    }
}

/// Greedy word wrap. Words are never broken, and a line never starts with
/// a word that would turn it into block syntax.
fn wrap(line: &str, width: usize) -> String {
    if width == 0 || line.chars().count() <= width {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / width + 1);
    let mut current = 0usize;

    for word in line.split(' ').filter(|w| !w.is_empty()) {
        let len = word.chars().count();
        if current == 0 {
            out.push_str(word);
            current = len;
        } else if current + 1 + len > width && !is_block_marker(word) {
            out.push('\n');
            out.push_str(word);
            current = len;
        } else {
            out.push(' ');
            out.push_str(word);
            current += 1 + len;
        }
    }

    out
}
