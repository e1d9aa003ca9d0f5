//! Generic search-and-extract workflow shared by every lyrics site.
//!
//! A site is described by a [`SiteDescriptor`]: a search URL template, four
//! CSS selectors, a base URL for result links and a list of post-processing
//! steps. [`SiteSearcher`] runs the same algorithm over any descriptor:
//!
//! 1. fetch the search page built from the template,
//! 2. collect candidate rows and pick one by artist name,
//! 3. fetch the picked lyrics page and clean up the lyrics container.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::SearchError;
use crate::extract::{PostProcess, PostProcessor};
use crate::http::PageFetcher;
use crate::provider::{LyricsDocument, LyricsSource, SearchQuery};

/// How a site wants the user's title before it goes into the search URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitlePolicy {
    /// Use the title as given
    #[default]
    Verbatim,
    /// Strip leading and trailing whitespace
    Trimmed,
}

impl TitlePolicy {
    #[must_use]
    pub fn apply(self, title: &str) -> &str {
        match self {
            Self::Verbatim => title,
            Self::Trimmed => title.trim(),
        }
    }
}

/// Static description of one lyrics site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDescriptor {
    /// Source name used in logs and results
    pub name: &'static str,
    /// Search URL with `{title}` and `{artist}` placeholders
    pub search_url: &'static str,
    /// Selector for result rows in the search page
    pub result_selector: &'static str,
    /// Selector for the artist name inside a result row
    pub artist_selector: &'static str,
    /// Selector for the lyrics link inside a result row
    pub link_selector: &'static str,
    /// Prefix for the link's `href`; empty when links are absolute
    pub lyrics_base_url: &'static str,
    /// Selector for the lyrics container in the lyrics page
    pub lyrics_selector: &'static str,
    pub title_policy: TitlePolicy,
    pub post_process: &'static [PostProcess],
}

impl SiteDescriptor {
    /// Copy this descriptor under a new name with a different search URL template
    #[must_use]
    pub const fn with_search_url(self, name: &'static str, search_url: &'static str) -> Self {
        Self {
            name,
            search_url,
            ..self
        }
    }

    /// Check that every policy the search needs is present.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidDescriptor`] naming the first empty field.
    pub fn validate(&self) -> Result<(), SearchError> {
        let required = [
            ("search_url", self.search_url),
            ("result_selector", self.result_selector),
            ("artist_selector", self.artist_selector),
            ("link_selector", self.link_selector),
            ("lyrics_selector", self.lyrics_selector),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(SearchError::InvalidDescriptor {
                site: self.name.to_string(),
                field,
            }),
            None => Ok(()),
        }
    }

    /// Build the search URL for an artist and an already preprocessed title
    #[must_use]
    pub fn search_url_for(&self, artist: &str, title: &str) -> String {
        self.search_url
            .replace("{title}", &urlencoding::encode(title))
            .replace("{artist}", &urlencoding::encode(artist))
    }
}

/// One row of a search results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Displayed artist name, if the row has one
    pub artist: Option<String>,
    /// Absolute lyrics page URL, if the row has a link
    pub link: Option<String>,
}

fn same_initial(a: &str, b: &str) -> bool {
    match (a.chars().next(), b.chars().next()) {
        (Some(x), Some(y)) => x.to_lowercase().eq(y.to_lowercase()),
        _ => false,
    }
}

/// Pick the candidate whose artist matches the query.
///
/// A lone candidate only needs the same first letter. Otherwise the artist
/// must be equal, or share the first letter when the query is not strict.
/// Rows without an artist or a link are skipped.
#[must_use]
pub fn pick_candidate<'a>(
    candidates: &'a [Candidate],
    query: &SearchQuery,
) -> Option<&'a Candidate> {
    let single = candidates.len() == 1;

    candidates.iter().find(|candidate| {
        let (Some(artist), Some(_)) = (candidate.artist.as_deref(), candidate.link.as_deref())
        else {
            return false;
        };

        if single && same_initial(artist, &query.artist) {
            return true;
        }
        artist == query.artist || (!query.strict && same_initial(artist, &query.artist))
    })
}

struct SiteSelectors {
    result: Selector,
    artist: Selector,
    link: Selector,
    lyrics: Selector,
}

impl SiteSelectors {
    fn compile(descriptor: &SiteDescriptor) -> Result<Self, SearchError> {
        let parse = |selector: &str| {
            Selector::parse(selector).map_err(|e| SearchError::InvalidSelector {
                site: descriptor.name.to_string(),
                selector: selector.to_string(),
                reason: e.to_string(),
            })
        };

        Ok(Self {
            result: parse(descriptor.result_selector)?,
            artist: parse(descriptor.artist_selector)?,
            link: parse(descriptor.link_selector)?,
            lyrics: parse(descriptor.lyrics_selector)?,
        })
    }
}

/// Runs the search-and-extract workflow for one site
pub struct SiteSearcher {
    descriptor: SiteDescriptor,
    selectors: SiteSelectors,
    post_processor: PostProcessor,
    fetcher: Arc<dyn PageFetcher>,
}

impl SiteSearcher {
    /// Create a searcher for a site.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor has an empty policy, an invalid
    /// selector or an invalid post-processing step.
    pub fn new(
        descriptor: SiteDescriptor,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Result<Self, SearchError> {
        descriptor.validate()?;
        let selectors = SiteSelectors::compile(&descriptor)?;
        let post_processor = PostProcessor::compile(descriptor.post_process).map_err(|e| {
            SearchError::InvalidPattern {
                site: descriptor.name.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            descriptor,
            selectors,
            post_processor,
            fetcher,
        })
    }

    #[must_use]
    pub const fn descriptor(&self) -> &SiteDescriptor {
        &self.descriptor
    }

    /// Parse result rows out of a search page
    #[must_use]
    pub fn parse_candidates(&self, html: &str) -> Vec<Candidate> {
        let document = Html::parse_document(html);

        document
            .select(&self.selectors.result)
            .map(|row| Candidate {
                artist: row
                    .select(&self.selectors.artist)
                    .next()
                    .map(|a| a.text().collect::<String>()),
                link: row
                    .select(&self.selectors.link)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .map(|href| format!("{}{}", self.descriptor.lyrics_base_url, href)),
            })
            .collect()
    }

    /// Extract and clean the lyrics container of a lyrics page
    #[must_use]
    pub fn extract_lyrics(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let container = document.select(&self.selectors.lyrics).next()?;
        Some(self.post_processor.apply(&container.html()))
    }

    fn find_lyrics_link(&self, html: &str, query: &SearchQuery) -> Option<String> {
        let candidates = self.parse_candidates(html);
        debug!(
            "{} returned {} candidates for {} - {}",
            self.descriptor.name,
            candidates.len(),
            query.artist,
            query.title
        );

        pick_candidate(&candidates, query).and_then(|candidate| candidate.link.clone())
    }
}

#[async_trait]
impl LyricsSource for SiteSearcher {
    fn name(&self) -> &str {
        self.descriptor.name
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<LyricsDocument, SearchError> {
        let title = self.descriptor.title_policy.apply(&query.title);
        let search_url = self.descriptor.search_url_for(&query.artist, title);
        info!(
            "Searching {} for: {} - {}",
            self.descriptor.name, query.artist, title
        );

        let search_page = self.fetcher.get_text(&search_url).await?;
        let Some(lyrics_url) = self.find_lyrics_link(&search_page, query) else {
            info!("{} has no matching candidate", self.descriptor.name);
            return Err(query.not_found());
        };

        debug!("{} picked lyrics page {}", self.descriptor.name, lyrics_url);
        let lyrics_page = self.fetcher.get_text(&lyrics_url).await?;
        let Some(text) = self.extract_lyrics(&lyrics_page) else {
            info!(
                "{} lyrics page {} has no lyrics container",
                self.descriptor.name, lyrics_url
            );
            return Err(query.not_found());
        };

        Ok(LyricsDocument {
            source: self.descriptor.name.to_string(),
            url: lyrics_url,
            text,
        })
    }
}
