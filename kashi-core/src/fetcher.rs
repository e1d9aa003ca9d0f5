//! Lyrics fetcher that orchestrates multiple lyrics sources.

use std::sync::Arc;
use tracing::info;

use crate::error::SearchError;
use crate::fuzzy::title_variants;
use crate::http::PageFetcher;
use crate::provider::{LyricsDocument, LyricsSource, SearchQuery};
use crate::site::{SiteDescriptor, SiteSearcher};

/// Tries lyrics sources in priority order until one finds the song
pub struct LyricsFetcher {
    sources: Vec<Box<dyn LyricsSource>>,
}

impl LyricsFetcher {
    /// Create a new lyrics fetcher
    ///
    /// # Arguments
    /// * `sources` - List of lyrics sources to try in order
    #[must_use]
    pub fn new(sources: Vec<Box<dyn LyricsSource>>) -> Self {
        Self { sources }
    }

    /// Create a fetcher with one [`SiteSearcher`] per descriptor, sharing a page fetcher.
    ///
    /// # Errors
    ///
    /// Returns an error if any descriptor is unusable.
    pub fn from_sites(
        sites: impl IntoIterator<Item = SiteDescriptor>,
        page_fetcher: &Arc<dyn PageFetcher>,
    ) -> Result<Self, SearchError> {
        let sources = sites
            .into_iter()
            .map(|site| {
                SiteSearcher::new(site, Arc::clone(page_fetcher))
                    .map(|searcher| Box::new(searcher) as Box<dyn LyricsSource>)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(sources))
    }

    /// Names of the sources, in priority order
    #[must_use]
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Search every source in order with the same query.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotFound`] when every source comes up empty, or
    /// the first transport error any source hits.
    pub async fn search(&self, query: &SearchQuery) -> Result<LyricsDocument, SearchError> {
        for source in &self.sources {
            info!("Trying source: {}", source.name());
            match source.fetch(query).await {
                Ok(document) => {
                    info!(
                        "Found lyrics from {} ({} chars)",
                        source.name(),
                        document.text.chars().count()
                    );
                    return Ok(document);
                }
                Err(e) if e.is_not_found() => {
                    info!("Source {} returned no lyrics", source.name());
                }
                Err(e) => return Err(e),
            }
        }

        Err(query.not_found())
    }

    /// Search with each width variant of the title until one is found.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotFound`] when no variant is found on any
    /// source, or the first transport error hit along the way.
    pub async fn fuzzy_search(&self, query: &SearchQuery) -> Result<LyricsDocument, SearchError> {
        for title in title_variants(&query.title) {
            let variant = query.with_title(title);
            match self.search(&variant).await {
                Err(e) if e.is_not_found() => {
                    info!("No lyrics for title variant: {}", variant.title);
                }
                result => return result,
            }
        }

        info!(
            "No lyrics found for {} - {} (tried {} sources: {:?})",
            query.artist,
            query.title,
            self.sources.len(),
            self.source_names()
        );
        Err(query.not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Source answering from a fixed title table and recording every call
    struct ScriptedSource {
        name: &'static str,
        titles: Vec<&'static str>,
        fail_transport: bool,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl LyricsSource for ScriptedSource {
        fn name(&self) -> &str {
            self.name
        }

        async fn fetch(&self, query: &SearchQuery) -> Result<LyricsDocument, SearchError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.name, query.title));

            if self.fail_transport {
                return Err(SearchError::Io(std::io::Error::other("connection reset")));
            }
            if self.titles.iter().any(|title| *title == query.title) {
                return Ok(LyricsDocument {
                    source: self.name.to_string(),
                    url: format!("https://{}/lyrics", self.name),
                    text: format!("lyrics from {}", self.name),
                });
            }
            Err(SearchError::not_found(&query.title, &query.artist))
        }
    }

    type Calls = Arc<Mutex<Vec<String>>>;

    fn fetcher(specs: &[(&'static str, Vec<&'static str>, bool)]) -> (LyricsFetcher, Calls) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sources = specs
            .iter()
            .map(|(name, titles, fail_transport)| {
                Box::new(ScriptedSource {
                    name: *name,
                    titles: titles.clone(),
                    fail_transport: *fail_transport,
                    calls: Arc::clone(&calls),
                }) as Box<dyn LyricsSource>
            })
            .collect();
        (LyricsFetcher::new(sources), calls)
    }

    #[tokio::test]
    async fn test_search_returns_first_found_and_stops() {
        let (fetcher, calls) = fetcher(&[
            ("a1", vec![], false),
            ("a2", vec![], false),
            ("a3", vec!["蕾"], false),
            ("a4", vec!["蕾"], false),
        ]);

        let document = fetcher.search(&SearchQuery::new("flumpool", "蕾")).await.unwrap();

        assert_eq!(document.source, "a3");
        assert_eq!(*calls.lock().unwrap(), vec!["a1:蕾", "a2:蕾", "a3:蕾"]);
    }

    #[tokio::test]
    async fn test_search_all_not_found() {
        let (fetcher, calls) = fetcher(&[("a1", vec![], false), ("a2", vec![], false)]);

        let result = fetcher.search(&SearchQuery::new("flumpool", "蕾")).await;

        assert!(result.is_err_and(|e| e.is_not_found()));
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_transport_error_is_not_absorbed() {
        let (fetcher, calls) = fetcher(&[("a1", vec![], true), ("a2", vec!["蕾"], false)]);

        let result = fetcher.search(&SearchQuery::new("flumpool", "蕾")).await;

        assert!(matches!(result, Err(SearchError::Io(_))));
        assert_eq!(*calls.lock().unwrap(), vec!["a1:蕾"]);
    }

    #[tokio::test]
    async fn test_fuzzy_search_tries_variants_after_all_sources() {
        let (fetcher, calls) = fetcher(&[("a1", vec![], false), ("a2", vec!["Hello?"], false)]);

        let document = fetcher
            .fuzzy_search(&SearchQuery::new("artist", "Hello？"))
            .await
            .unwrap();

        assert_eq!(document.source, "a2");
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["a1:Hello？", "a2:Hello？", "a1:Hello?", "a2:Hello?"]
        );
    }

    #[tokio::test]
    async fn test_fuzzy_search_exhausted() {
        let (fetcher, calls) = fetcher(&[("a1", vec![], false)]);

        let result = fetcher.fuzzy_search(&SearchQuery::new("artist", "Hi!")).await;

        assert!(result.is_err_and(|e| e.is_not_found()));
        assert_eq!(*calls.lock().unwrap(), vec!["a1:Hi!", "a1:Hi！"]);
    }

    #[tokio::test]
    async fn test_search_falls_through_error_status_page() {
        use crate::extract::PostProcess;
        use crate::site::TitlePolicy;
        use crate::testing::StaticPageFetcher;

        const SITE_A: SiteDescriptor = SiteDescriptor {
            name: "site_a",
            search_url: "https://a.test/search?title={title}&artist={artist}",
            result_selector: "#results tr",
            artist_selector: ".artist",
            link_selector: ".title a",
            lyrics_base_url: "https://a.test",
            lyrics_selector: "#lyrics",
            title_policy: TitlePolicy::Verbatim,
            post_process: &[PostProcess::Unwrap("div"), PostProcess::LineBreaks],
        };
        const SITE_B: SiteDescriptor = SiteDescriptor {
            name: "site_b",
            search_url: "https://b.test/search?title={title}&artist={artist}",
            lyrics_base_url: "https://b.test",
            ..SITE_A
        };

        let page_fetcher = StaticPageFetcher::new()
            .with_status_page(
                SITE_A.search_url_for("flumpool", "蕾"),
                reqwest::StatusCode::NOT_FOUND,
                "<html><body>no results</body></html>",
            )
            .with_page(
                SITE_B.search_url_for("flumpool", "蕾"),
                r#"<table id="results"><tr><td class="title"><a href="/song/1">蕾</a></td><td class="artist">flumpool</td></tr></table>"#,
            )
            .with_page(
                "https://b.test/song/1",
                r#"<div id="lyrics">first<br>second</div>"#,
            );
        let page_fetcher: Arc<dyn PageFetcher> = Arc::new(page_fetcher);
        let fetcher = LyricsFetcher::from_sites([SITE_A, SITE_B], &page_fetcher).unwrap();

        let document = fetcher.search(&SearchQuery::new("flumpool", "蕾")).await.unwrap();

        assert_eq!(document.source, "site_b");
        assert_eq!(document.url, "https://b.test/song/1");
        assert_eq!(document.text, "first\nsecond");
    }

    #[test]
    fn test_source_names_keep_priority_order() {
        let (fetcher, _) = fetcher(&[("j_lyric", vec![], false), ("uta_net", vec![], false)]);
        assert_eq!(fetcher.source_names(), vec!["j_lyric", "uta_net"]);
    }
}
