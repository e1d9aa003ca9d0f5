//! Post-processing of extracted lyrics markup.
//!
//! Lyrics containers are serialized back to HTML and cleaned with a short,
//! site-specific list of textual rewrites. Tags that no step names are left
//! in place.

use regex::Regex;

/// A single rewrite applied to the serialized lyrics container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    /// Remove opening and closing tags with this name, keeping their contents
    Unwrap(&'static str),
    /// Drop `</br>` and turn `<br>` / `<br/>` into newlines
    LineBreaks,
    /// Turn the serializer's `&nbsp;` back into U+00A0
    NonBreakingSpaces,
}

#[derive(Debug)]
enum CompiledStep {
    Unwrap(Regex),
    LineBreaks { close: Regex, open: Regex },
    NonBreakingSpaces,
}

/// Compiled, ordered list of post-processing steps
#[derive(Debug)]
pub struct PostProcessor {
    steps: Vec<CompiledStep>,
}

impl PostProcessor {
    /// Compile the given steps.
    ///
    /// # Errors
    ///
    /// Returns an error if a step's pattern fails to compile.
    pub fn compile(steps: &[PostProcess]) -> Result<Self, regex::Error> {
        let steps = steps
            .iter()
            .map(|step| match step {
                PostProcess::Unwrap(tag) => {
                    let tag = regex::escape(tag);
                    Ok(CompiledStep::Unwrap(Regex::new(&format!(
                        "<{tag}.*?>|</{tag}>"
                    ))?))
                }
                PostProcess::LineBreaks => Ok(CompiledStep::LineBreaks {
                    close: Regex::new("</br>")?,
                    open: Regex::new("<br>|<br/>")?,
                }),
                PostProcess::NonBreakingSpaces => Ok(CompiledStep::NonBreakingSpaces),
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self { steps })
    }

    /// Apply all steps in order
    #[must_use]
    pub fn apply(&self, markup: &str) -> String {
        self.steps
            .iter()
            .fold(markup.to_string(), |text, step| match step {
                CompiledStep::Unwrap(pattern) => pattern.replace_all(&text, "").into_owned(),
                CompiledStep::LineBreaks { close, open } => {
                    let text = close.replace_all(&text, "");
                    open.replace_all(&text, "\n").into_owned()
                }
                CompiledStep::NonBreakingSpaces => text.replace("&nbsp;", "\u{a0}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_keeps_contents() {
        let processor = PostProcessor::compile(&[PostProcess::Unwrap("div")]).unwrap();
        assert_eq!(
            processor.apply(r#"<div id="kashi_area" itemprop="text">hello</div>"#),
            "hello"
        );
    }

    #[test]
    fn test_unwrap_leaves_other_tags() {
        let processor = PostProcessor::compile(&[PostProcess::Unwrap("p")]).unwrap();
        assert_eq!(
            processor.apply(r#"<p id="Lyric"><span>a</span></p>"#),
            "<span>a</span>"
        );
    }

    #[test]
    fn test_line_breaks() {
        let processor = PostProcessor::compile(&[PostProcess::LineBreaks]).unwrap();
        assert_eq!(processor.apply("one<br>two<br/>three</br>"), "one\ntwo\nthree");
    }

    #[test]
    fn test_non_breaking_spaces_are_decoded() {
        let processor = PostProcessor::compile(&[PostProcess::NonBreakingSpaces]).unwrap();
        assert_eq!(
            processor.apply("Rock&nbsp;&amp;&nbsp;Roll"),
            "Rock\u{a0}&amp;\u{a0}Roll"
        );
    }

    #[test]
    fn test_steps_apply_in_order() {
        let processor = PostProcessor::compile(&[
            PostProcess::Unwrap("div"),
            PostProcess::LineBreaks,
            PostProcess::Unwrap("canvas"),
        ])
        .unwrap();
        let markup = r#"<div id="lyrics"><canvas id="c"></canvas>咲いた<br>蕾</div>"#;
        assert_eq!(processor.apply(markup), "咲いた\n蕾");
    }

    #[test]
    fn test_no_steps_is_identity() {
        let processor = PostProcessor::compile(&[]).unwrap();
        assert_eq!(processor.apply("<b>x</b>"), "<b>x</b>");
    }
}
