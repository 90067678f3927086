//! Code-language groups.
//!
//! A `{{group:code}}` block carries one fenced snippet per language; the
//! recognized set and its preference order are fixed. Only languages that
//! actually match in the block are offered as selectable options.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// A recognized code-group language, in fixed preference order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Js,
    Node,
    Python,
}

impl Language {
    /// All recognized languages, in scan/preference order.
    pub const ALL: [Self; 3] = [Self::Js, Self::Node, Self::Python];

    /// Fence tag and selector value (e.g., `"js"`).
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Node => "node",
            Self::Python => "python",
        }
    }

    /// Display label (uppercased tag).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Js => "JS",
            Self::Node => "NODE",
            Self::Python => "PYTHON",
        }
    }

    /// Parse a selector value back into a language.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.tag() == tag)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Per-language snippets extracted from one `code` group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeGroup {
    snippets: Vec<(Language, String)>,
}

fn fence_regex(language: Language) -> &'static Regex {
    // One compiled regex per recognized language.
    static REGEXES: OnceLock<Vec<(Language, Regex)>> = OnceLock::new();
    let regexes = REGEXES.get_or_init(|| {
        Language::ALL
            .into_iter()
            .map(|lang| {
                let pattern = format!(r"(?ms)^[ \t]*```{}[ \t]*$\n?(.*?)^[ \t]*```", lang.tag());
                (lang, Regex::new(&pattern).expect("valid fence pattern"))
            })
            .collect()
    });
    regexes
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, re)| re)
        .expect("all languages have a fence regex")
}

impl CodeGroup {
    /// Extract per-language snippets from a group's raw content.
    ///
    /// Languages are scanned in [`Language::ALL`] order; a language
    /// matches when the content holds a fenced span tagged with exactly
    /// that name. Snippet text is whitespace-trimmed.
    #[must_use]
    pub fn extract(content: &str) -> Self {
        let snippets = Language::ALL
            .into_iter()
            .filter_map(|lang| {
                fence_regex(lang)
                    .captures(content)
                    .map(|caps| (lang, caps[1].trim().to_owned()))
            })
            .collect();
        Self { snippets }
    }

    /// True if no recognized language matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Matched snippets in preference order.
    #[must_use]
    pub fn snippets(&self) -> &[(Language, String)] {
        &self.snippets
    }

    /// Snippet for one language, if it matched.
    #[must_use]
    pub fn get(&self, language: Language) -> Option<&str> {
        self.snippets
            .iter()
            .find(|(l, _)| *l == language)
            .map(|(_, code)| code.as_str())
    }
}
