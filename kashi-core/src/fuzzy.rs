//! Title variants differing only in the width of `?` and `!`.

const FULLWIDTH_QUESTION: char = '？';
const FULLWIDTH_EXCLAMATION: char = '！';

/// Build the ordered list of titles to try for a song.
///
/// The original title always comes first. A half-width variant follows when
/// the original contains `？` or `！`, and a full-width variant when it contains
/// `?` or `!`. Both checks look at the original title, so substitutions never
/// chain.
#[must_use]
pub fn title_variants(title: &str) -> Vec<String> {
    let mut variants = vec![title.to_string()];

    if title.contains([FULLWIDTH_QUESTION, FULLWIDTH_EXCLAMATION]) {
        variants.push(
            title
                .replace(FULLWIDTH_QUESTION, "?")
                .replace(FULLWIDTH_EXCLAMATION, "!"),
        );
    }

    if title.contains(['?', '!']) {
        variants.push(
            title
                .replace('?', &FULLWIDTH_QUESTION.to_string())
                .replace('!', &FULLWIDTH_EXCLAMATION.to_string()),
        );
    }

    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fullwidth_title_gets_halfwidth_variant() {
        assert_eq!(title_variants("Hello？"), vec!["Hello？", "Hello?"]);
    }

    #[test]
    fn test_halfwidth_title_gets_fullwidth_variant() {
        assert_eq!(title_variants("Hi!"), vec!["Hi!", "Hi！"]);
    }

    #[test]
    fn test_plain_title_has_single_variant() {
        assert_eq!(title_variants("蕾"), vec!["蕾"]);
    }

    #[test]
    fn test_mixed_title_expands_from_original_only() {
        assert_eq!(
            title_variants("Why？ Now!"),
            vec!["Why？ Now!", "Why? Now!", "Why？ Now！"]
        );
    }

    #[test]
    fn test_other_fullwidth_characters_are_untouched() {
        assert_eq!(title_variants("Ａ！"), vec!["Ａ！", "Ａ!"]);
    }
}
