use crate::error::SearchError;
use async_trait::async_trait;

/// Query parameters for a lyrics search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Artist name as given by the user
    pub artist: String,
    /// Song title as given by the user
    pub title: String,
    /// Require exact artist equality when several candidates are listed
    pub strict: bool,
}

impl SearchQuery {
    /// Create a new strict query
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            strict: true,
        }
    }

    /// Set strictness of artist matching
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Copy this query with a different title, keeping artist and strictness
    #[must_use]
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            artist: self.artist.clone(),
            title: title.into(),
            strict: self.strict,
        }
    }

    pub(crate) fn not_found(&self) -> SearchError {
        SearchError::not_found(&self.title, &self.artist)
    }
}

/// Lyrics with source metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsDocument {
    /// Name of the source that produced the lyrics
    pub source: String,
    /// Lyrics page the text was extracted from
    pub url: String,
    /// Extracted and cleaned lyrics text
    pub text: String,
}

/// Trait for lyrics sources
#[async_trait]
pub trait LyricsSource: Send + Sync {
    /// Get the source name
    fn name(&self) -> &str;

    /// Fetch lyrics for a query.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotFound`] when the source has no match for the query,
    /// and any other variant for transport or parse failures.
    async fn fetch(&self, query: &SearchQuery) -> Result<LyricsDocument, SearchError>;
}
