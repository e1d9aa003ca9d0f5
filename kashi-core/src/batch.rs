//! Batch lyrics download from a `title<TAB>artist` list.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::SearchError;
use crate::fetcher::LyricsFetcher;
use crate::paths::lyrics_path;
use crate::provider::SearchQuery;

/// Settings for a batch run
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory lyrics files are written to
    pub output_dir: PathBuf,
    /// Require exact artist equality when a search lists several songs
    pub strict: bool,
    /// Report transport and lyrics-file write failures per record instead of aborting
    pub continue_on_error: bool,
}

/// Counts of record outcomes in a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub found: usize,
    pub not_found: usize,
    pub failed: usize,
    pub malformed: usize,
}

impl BatchSummary {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.found + self.not_found + self.failed + self.malformed
    }
}

/// Split a list line into `(title, artist)`.
///
/// Returns `None` unless the line has exactly two tab-separated fields.
#[must_use]
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let mut fields = line.split('\t');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(title), Some(artist), None) => Some((title, artist)),
        _ => None,
    }
}

/// Drives a fuzzy search for every record of a list and writes the results
pub struct BatchDriver<'a> {
    fetcher: &'a LyricsFetcher,
    options: BatchOptions,
}

impl<'a> BatchDriver<'a> {
    #[must_use]
    pub const fn new(fetcher: &'a LyricsFetcher, options: BatchOptions) -> Self {
        Self { fetcher, options }
    }

    /// Process every line of `input`, writing one status line per record to `status`.
    ///
    /// Existing lyrics files are overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing status fails, or on a
    /// transport or lyrics-file write failure when `continue_on_error` is off.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        input: R,
        status: &mut W,
    ) -> Result<BatchSummary, SearchError> {
        tokio::fs::create_dir_all(&self.options.output_dir).await?;

        let mut summary = BatchSummary::default();

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let Some((title, artist)) = parse_line(&line) else {
                warn!("Skipping malformed line {}: {:?}", index + 1, line);
                writeln!(status, "Malformed line {}: {}", index + 1, line)?;
                summary.malformed += 1;
                continue;
            };

            match self.save_lyrics(title, artist).await {
                Ok(()) => {
                    writeln!(status, "Lyrics found: {title} - {artist}")?;
                    summary.found += 1;
                }
                Err(e) if e.is_not_found() => {
                    writeln!(status, "Lyrics not found: {title} - {artist}")?;
                    summary.not_found += 1;
                }
                Err(e) if self.options.continue_on_error => {
                    warn!("Lyrics failed for {} - {}: {}", title, artist, e);
                    writeln!(status, "Lyrics failed: {title} - {artist} ({e})")?;
                    summary.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Batch finished: {} found, {} not found, {} failed, {} malformed",
            summary.found, summary.not_found, summary.failed, summary.malformed
        );
        Ok(summary)
    }

    /// Search one record and write its lyrics file, named by the original title
    async fn save_lyrics(&self, title: &str, artist: &str) -> Result<(), SearchError> {
        let query = SearchQuery::new(artist, title).with_strict(self.options.strict);
        let document = self.fetcher.fuzzy_search(&query).await?;

        let path = lyrics_path(&self.options.output_dir, artist, title);
        tokio::fs::write(&path, &document.text).await?;
        info!(
            "Saved lyrics from {} to {}",
            document.source,
            path.display()
        );
        Ok(())
    }
}
