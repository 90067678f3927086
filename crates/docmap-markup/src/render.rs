//! Content renderer.
//!
//! Turns a [`ParsedDocument`] into display markup. Plain spans go through
//! the markdown converter; directive blocks are composed as element trees
//! and serialized once. Crumb markers are substituted with empty anchors
//! before conversion so they survive as inline HTML at their original
//! positions.

use pulldown_cmark::{Options, Parser};

use crate::code_group::{CodeGroup, Language};
use crate::html::HtmlElement;
use crate::parser::{replace_crumbs, Crumb, DirectiveBlock, ParsedDocument, Span};

/// Title shown when a document has no top-level heading.
pub const DEFAULT_TITLE: &str = "Document";

/// Render-time settings.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext {
    /// Currently selected code-group language.
    pub language: Language,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            language: Language::Js,
        }
    }
}

/// A fully rendered document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Extracted title, or [`DEFAULT_TITLE`].
    pub title: String,
    /// Body markup.
    pub html: String,
    /// Crumbs for the jump tray, in order of appearance.
    pub crumbs: Vec<Crumb>,
}

/// Convert markdown text to HTML, substituting crumb markers with empty
/// anchor elements first.
#[must_use]
pub fn markdown_to_html(text: &str) -> String {
    let text = replace_crumbs(text, |crumb| {
        HtmlElement::new("a").attr("id", crumb.id.clone()).render()
    });

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(&text, options);
    let mut html = String::with_capacity(text.len() * 2);
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

/// Render a parsed document against the given context.
#[must_use]
pub fn render(doc: &ParsedDocument, ctx: &RenderContext) -> RenderedDocument {
    let mut html = String::new();
    for span in &doc.spans {
        match span {
            Span::Markdown(text) => html.push_str(&markdown_to_html(text)),
            Span::Directive(block) => {
                html.push_str(&render_directive(block, ctx));
                html.push('\n');
            }
        }
    }

    RenderedDocument {
        title: doc
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
        html,
        crumbs: doc.crumbs.clone(),
    }
}

fn render_directive(block: &DirectiveBlock, ctx: &RenderContext) -> String {
    match block {
        DirectiveBlock::Code(group) => render_code_group(group, ctx).render(),
        DirectiveBlock::Center(content) => render_centered(content).render(),
        DirectiveBlock::Carousel(content) => render_carousel(content).render(),
        DirectiveBlock::Other { content, .. } => markdown_to_html(content),
    }
}

/// Compose a code group: a language selector, one code block per matched
/// language, and a warning slot. Only the block for the context language
/// is visible; if the group has no snippet for it, the warning shows
/// instead.
fn render_code_group(group: &CodeGroup, ctx: &RenderContext) -> HtmlElement {
    let mut selector = HtmlElement::new("select").class("language-selector");
    if group.is_empty() {
        selector = selector.child(
            HtmlElement::new("option")
                .attr("value", "none")
                .text("NONE"),
        );
    }
    for (lang, _) in group.snippets() {
        let mut option = HtmlElement::new("option")
            .attr("value", lang.tag())
            .text(lang.label());
        if *lang == ctx.language {
            option = option.attr("selected", "selected");
        }
        selector = selector.child(option);
    }

    let mut root = HtmlElement::new("div").class("code-group").child(selector);

    let mut language_found = false;
    for (lang, code) in group.snippets() {
        let visible = *lang == ctx.language;
        language_found |= visible;
        let display = if visible { "block" } else { "none" };
        root = root.child(
            HtmlElement::new("pre")
                .attr("style", format!("display: {display};"))
                .child(
                    HtmlElement::new("code")
                        .class(format!("language-{}", lang.tag()))
                        .text(code.clone()),
                ),
        );
    }

    let mut warning = HtmlElement::new("div").class("language-warning");
    if language_found {
        warning = warning.attr("style", "display: none;");
    } else {
        warning = warning.attr("style", "display: block;").text(format!(
            "{} does not support this feature.",
            ctx.language.label()
        ));
    }
    root.child(warning)
}

/// Compose a centered block: the content rendered as markdown inside a
/// centering container.
fn render_centered(content: &str) -> HtmlElement {
    HtmlElement::new("div")
        .class("centered-content")
        .raw(markdown_to_html(content))
}

/// Compose a carousel: runs of consecutive image lines become strips;
/// any other non-empty line breaks the strip and is rendered as prose
/// between strips. The whole block sits in a centering container.
fn render_carousel(content: &str) -> HtmlElement {
    let mut root = HtmlElement::new("div").class("centered-content");
    let mut strip: Vec<String> = Vec::new();

    for line in content.lines() {
        if line.starts_with("![") {
            let rendered = markdown_to_html(line);
            strip.push(strip_paragraph(rendered.trim_end()));
        } else {
            root = flush_strip(root, &mut strip);
            if !line.trim().is_empty() {
                root = root.raw(markdown_to_html(line));
            }
        }
    }
    flush_strip(root, &mut strip)
}

fn flush_strip(root: HtmlElement, strip: &mut Vec<String>) -> HtmlElement {
    if strip.is_empty() {
        return root;
    }
    let mut carousel = HtmlElement::new("div").class("carousel");
    for image in strip.drain(..) {
        carousel = carousel.raw(image);
    }
    root.child(carousel)
}

/// Drop the `<p>` wrapper the converter puts around a bare image line.
fn strip_paragraph(html: &str) -> String {
    html.strip_prefix("<p>")
        .and_then(|h| h.strip_suffix("</p>"))
        .map_or_else(|| html.to_owned(), ToOwned::to_owned)
}

/// Compose the crumb jump tray: one button per crumb, targeting its
/// anchor id. Empty when the document has no crumbs.
#[must_use]
pub fn render_crumb_tray(crumbs: &[Crumb]) -> HtmlElement {
    let mut tray = HtmlElement::new("div").attr("id", "crumbtray");
    if crumbs.is_empty() {
        return tray.class("crumbs");
    }
    tray = tray.class("crumbs has-content");
    for crumb in crumbs {
        tray = tray.child(
            HtmlElement::new("button")
                .attr("data-target", crumb.id.clone())
                .text(crumb.label.clone()),
        );
    }
    tray
}
