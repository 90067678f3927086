//! Directive parsing and content rendering.
//!
//! Documents are markdown with a thin directive layer on top:
//! `{{group:<type>}} … {{endgroup}}` blocks for code-language groups,
//! centered content and image carousels, plus `{{crumb:label}}` markers
//! for in-page jump targets. [`parser`] splits raw text into structured
//! spans; [`render`] turns them into display markup.

mod code_group;
mod html;
pub mod parser;
pub mod render;

pub use code_group::{CodeGroup, Language};
pub use html::{escape_html, HtmlElement, HtmlNode};
pub use parser::{
    crumb_id, parse_document, Crumb, DirectiveBlock, MarkupError, ParsedDocument, Span,
};
pub use render::{
    markdown_to_html, render, render_crumb_tray, RenderContext, RenderedDocument, DEFAULT_TITLE,
};
