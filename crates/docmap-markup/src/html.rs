//! Structural HTML builder.
//!
//! Directive output is composed as a tree of elements and rendered to a
//! string once, instead of search-and-replace surgery on already
//! serialized markup.

use std::fmt::Write;

/// Elements rendered without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img"];

/// Escape text for safe inclusion in HTML content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// One node of composed display markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HtmlNode {
    /// A child element.
    Element(HtmlElement),
    /// Text content, escaped on render.
    Text(String),
    /// Pre-rendered markup included verbatim (converter output).
    Raw(String),
}

impl From<HtmlElement> for HtmlNode {
    fn from(element: HtmlElement) -> Self {
        Self::Element(element)
    }
}

/// An HTML element under construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlElement {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<HtmlNode>,
}

impl HtmlElement {
    /// Create an element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute. Values are escaped on render.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Add a `class` attribute.
    #[must_use]
    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    /// Append a child node.
    #[must_use]
    pub fn child(mut self, node: impl Into<HtmlNode>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(HtmlNode::Text(content.into()))
    }

    /// Append pre-rendered markup verbatim.
    #[must_use]
    pub fn raw(self, content: impl Into<String>) -> Self {
        self.child(HtmlNode::Raw(content.into()))
    }

    /// Append all nodes from an iterator.
    #[must_use]
    pub fn children(mut self, nodes: impl IntoIterator<Item = HtmlNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    /// Render the element and its subtree to a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape_html(value));
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            match child {
                HtmlNode::Element(element) => element.render_into(out),
                HtmlNode::Text(text) => out.push_str(&escape_html(text)),
                HtmlNode::Raw(raw) => out.push_str(raw),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}
