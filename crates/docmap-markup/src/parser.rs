//! Document parser.
//!
//! Scans raw document text for the custom block directives layered on top
//! of markdown (`{{group:<type>}} … {{endgroup}}`), extracts the title
//! and in-page crumb markers, and splits the body into plain markdown
//! spans and structured directive blocks.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::code_group::CodeGroup;

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^#\s(.+)").expect("valid title pattern"))
}

fn group_open_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{group:(\w+)\}\}").expect("valid group pattern"))
}

fn crumb_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{crumb:([^}]+)\}\}").expect("valid crumb pattern"))
}

/// An in-page jump target derived from a `{{crumb:label}}` marker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Crumb {
    /// Human-readable label, as written in the marker.
    pub label: String,
    /// Anchor id derived from the label.
    pub id: String,
}

impl Crumb {
    /// Build a crumb from a marker label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_owned();
        let id = crumb_id(&label);
        Self { label, id }
    }
}

/// Derive an anchor id: lowercase the label and collapse whitespace runs
/// to single hyphens.
#[must_use]
pub fn crumb_id(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Replace every `{{crumb:label}}` marker in `text` with the output of
/// `substitute`, which receives the crumb parsed from the marker.
pub fn replace_crumbs(text: &str, mut substitute: impl FnMut(&Crumb) -> String) -> String {
    crumb_regex()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            substitute(&Crumb::from_label(&caps[1]))
        })
        .into_owned()
}

/// A structured directive block extracted from the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveBlock {
    /// `{{group:code}}`: selectable per-language snippets.
    Code(CodeGroup),
    /// `{{group:center}}`: markdown wrapped in a centering container.
    Center(String),
    /// `{{group:carousel}}`: image strips with interleaved prose.
    Carousel(String),
    /// Unrecognized type: rendered as plain markdown.
    Other {
        /// Declared directive type.
        kind: String,
        /// Captured block content.
        content: String,
    },
}

impl DirectiveBlock {
    fn from_parts(kind: &str, content: String) -> Self {
        match kind {
            "code" => Self::Code(CodeGroup::extract(&content)),
            "center" => Self::Center(content),
            "carousel" => Self::Carousel(content),
            _ => Self::Other {
                kind: kind.to_owned(),
                content,
            },
        }
    }
}

/// One span of the parsed body, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Span {
    /// Plain markdown text between directive blocks.
    Markdown(String),
    /// A captured directive block.
    Directive(DirectiveBlock),
}

/// Parsed document: extracted title, ordered body spans, crumbs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// First top-level heading, removed from the body. `None` when the
    /// document has no heading (callers substitute a default).
    pub title: Option<String>,
    /// Body spans in document order.
    pub spans: Vec<Span>,
    /// Crumbs in order of first appearance, scanned against the original
    /// body (inside and outside directive blocks alike).
    pub crumbs: Vec<Crumb>,
    /// Recoverable parse problems (e.g., an unterminated block).
    pub warnings: Vec<String>,
}

/// Error raised when a document cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    /// A directive opened while another block was still open. Blocks do
    /// not nest.
    #[error("line {line}: directive {{{{group:{kind}}}}} opened inside an unclosed block")]
    NestedGroup {
        /// 1-based source line of the offending open marker.
        line: usize,
        /// Declared type of the nested directive.
        kind: String,
    },
}

/// Close marker for directive blocks.
const END_GROUP: &str = "{{endgroup}}";

/// Parse raw document text.
///
/// The title is the first `# …` line anywhere in the document and is
/// removed from the body. The body is scanned line by line; a
/// `{{group:<type>}}` line starts capturing block content until a line
/// that is exactly `{{endgroup}}`. Reaching end of input with an open
/// block demotes the captured content to plain markdown and records a
/// warning rather than discarding it.
///
/// # Errors
///
/// Returns [`MarkupError::NestedGroup`] if an open marker appears while a
/// block is already open.
pub fn parse_document(text: &str) -> Result<ParsedDocument, MarkupError> {
    let mut doc = ParsedDocument::default();

    // Title extraction: remove the matched heading text, keep its line
    // ending so line numbers below stay meaningful.
    let body = if let Some(caps) = title_regex().captures(text) {
        doc.title = Some(caps[1].trim().to_owned());
        let full = caps.get(0).expect("capture 0 always present");
        let mut body = String::with_capacity(text.len());
        body.push_str(&text[..full.start()]);
        body.push_str(&text[full.end()..]);
        body
    } else {
        text.to_owned()
    };

    for caps in crumb_regex().captures_iter(&body) {
        doc.crumbs.push(Crumb::from_label(&caps[1]));
    }

    let mut plain = String::new();
    let mut block: Option<(String, String)> = None;

    for (idx, line) in body.lines().enumerate() {
        if line.starts_with("{{group:") {
            if let Some(caps) = group_open_regex().captures(line) {
                let kind = caps[1].to_owned();
                if block.is_some() {
                    return Err(MarkupError::NestedGroup {
                        line: idx + 1,
                        kind,
                    });
                }
                if !plain.is_empty() {
                    doc.spans.push(Span::Markdown(std::mem::take(&mut plain)));
                }
                block = Some((kind, String::new()));
                continue;
            }
        }

        match &mut block {
            Some((_, content)) => {
                if line.trim() == END_GROUP {
                    let (kind, content) = block.take().expect("block is open");
                    doc.spans
                        .push(Span::Directive(DirectiveBlock::from_parts(&kind, content)));
                } else {
                    content.push_str(line);
                    content.push('\n');
                }
            }
            None => {
                plain.push_str(line);
                plain.push('\n');
            }
        }
    }

    if let Some((kind, content)) = block.take() {
        doc.warnings
            .push(format!("unterminated {{{{group:{kind}}}}} block"));
        plain.push_str(&content);
    }

    if !plain.is_empty() {
        doc.spans.push(Span::Markdown(plain));
    }

    Ok(doc)
}
