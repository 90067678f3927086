//! Display-name formatting for sidebar entries.

/// Short words left lowercase unless they lead the name.
const FILLER_WORDS: &[&str] = &["in", "of", "the", "and", "a", "to", "for", "with"];

/// Format a raw entry name for display: strip the `.md` suffix, turn
/// underscores into spaces and title-case each word, keeping filler
/// words lowercase except in first position.
#[must_use]
pub fn sanitize_name(input: &str) -> String {
    let base = input.strip_suffix(".md").unwrap_or(input);
    let spaced = base.replace('_', " ");

    spaced
        .split(' ')
        .enumerate()
        .map(|(index, word)| {
            if index == 0 || !FILLER_WORDS.contains(&word.to_lowercase().as_str()) {
                title_case(word)
            } else {
                word.to_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
    })
}
