//! Text normalization for ranking entries.

use regex::Regex;

const FULLWIDTH_START: u32 = 0xFF01;
const FULLWIDTH_END: u32 = 0xFF5E;
const FULLWIDTH_OFFSET: u32 = 0xFEE0;
const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Convert full-width ASCII forms and the ideographic space to half-width.
///
/// Kana and every other character are left as they are.
#[must_use]
pub fn zen_to_han(text: &str) -> String {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ FULLWIDTH_START..=FULLWIDTH_END => {
                char::from_u32(code - FULLWIDTH_OFFSET).unwrap_or(c)
            }
            _ if c == IDEOGRAPHIC_SPACE => ' ',
            _ => c,
        })
        .collect()
}

/// Removes one trailing `(...)` or `(...)[...]` group from a title
#[derive(Debug)]
pub struct TrailingParen {
    pattern: Regex,
}

impl TrailingParen {
    /// Compile the pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(r"(\(.+\)|\(.+\)\[.+\])$")?,
        })
    }

    #[must_use]
    pub fn strip(&self, title: &str) -> String {
        self.pattern.replace(title, "").trim_end().to_string()
    }
}
