//! Monthly karaoke ranking scraper.
//!
//! Produces `title<TAB>artist` lines in the format the batch driver reads.

pub mod error;
pub mod normalize;

use scraper::{Html, Selector};
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};

use kashi_core::PageFetcher;

pub use error::RankingError;
pub use normalize::{zen_to_han, TrailingParen};

const RANKING_URL: &str = "https://www.karatetsu.com/ranking/index.php?top_ym=";

/// Header rows at the top of the ranking table
const HEADER_ROWS: usize = 2;

/// One ranked song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedSong {
    pub title: String,
    pub artist: String,
}

impl RankedSong {
    /// Format as a batch input line
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{}\t{}", self.title, self.artist)
    }
}

/// Months to scrape, newest year first and January to December within a year
#[must_use]
pub fn months(from_year: u16, to_year: u16) -> Vec<String> {
    (from_year..=to_year)
        .rev()
        .flat_map(|year| (1..=12).map(move |month| format!("{year:04}{month:02}")))
        .collect()
}

fn validate_month(year_month: &str) -> Result<(), RankingError> {
    if year_month.len() == 6 && year_month.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(RankingError::InvalidMonth {
            value: year_month.to_string(),
        })
    }
}

/// Outcome counts of a multi-month scrape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub months: usize,
    pub failed_months: usize,
    pub songs: usize,
}

pub struct RankingScraper {
    fetcher: Arc<dyn PageFetcher>,
    row: Selector,
    title: Selector,
    artist: Selector,
    paren: TrailingParen,
}

impl RankingScraper {
    /// Create a scraper using the given page fetcher.
    ///
    /// # Errors
    ///
    /// Returns an error if a selector or pattern fails to compile.
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Result<Self, RankingError> {
        let parse = |selector: &str| {
            Selector::parse(selector).map_err(|e| RankingError::Pattern {
                reason: e.to_string(),
            })
        };

        Ok(Self {
            fetcher,
            row: parse("#ranking tr")?,
            title: parse("td:nth-of-type(3)")?,
            artist: parse("td:nth-of-type(4)")?,
            paren: TrailingParen::new().map_err(|e| RankingError::Pattern {
                reason: e.to_string(),
            })?,
        })
    }

    /// Ranking page URL for a month
    #[must_use]
    pub fn url_for(year_month: &str) -> String {
        format!("{RANKING_URL}{year_month}")
    }

    /// Parse songs out of a ranking page, skipping header rows and incomplete rows
    #[must_use]
    pub fn parse_ranking(&self, html: &str) -> Vec<RankedSong> {
        let document = Html::parse_document(html);
        let cell_text = |row: &scraper::ElementRef<'_>, selector: &Selector| {
            row.select(selector)
                .next()
                .map(|cell| zen_to_han(cell.text().collect::<String>().trim()))
        };

        document
            .select(&self.row)
            .skip(HEADER_ROWS)
            .filter_map(|row| {
                let title = cell_text(&row, &self.title)?;
                let artist = cell_text(&row, &self.artist)?;
                Some(RankedSong {
                    title: self.paren.strip(&title),
                    artist,
                })
            })
            .collect()
    }

    /// Fetch the ranking for one `YYYYMM` month.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is malformed or the page cannot be fetched.
    pub async fn fetch_month(&self, year_month: &str) -> Result<Vec<RankedSong>, RankingError> {
        validate_month(year_month)?;
        let page = self.fetcher.get_text(&Self::url_for(year_month)).await?;
        Ok(self.parse_ranking(&page))
    }

    /// Scrape every month in order, writing batch lines to `out`.
    ///
    /// A month that fails is logged and skipped. Months with at most one
    /// row are not written.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to `out` fails.
    pub async fn scrape<W: Write>(
        &self,
        months: &[String],
        out: &mut W,
    ) -> Result<ScrapeSummary, RankingError> {
        let mut summary = ScrapeSummary::default();

        for year_month in months {
            summary.months += 1;
            match self.fetch_month(year_month).await {
                Ok(songs) => {
                    info!("{}: {}", year_month, songs.len());
                    if songs.len() > 1 {
                        for song in &songs {
                            writeln!(out, "{}", song.to_line())?;
                        }
                        summary.songs += songs.len();
                    }
                }
                Err(e) => {
                    warn!("{}: failed ({})", year_month, e);
                    summary.failed_months += 1;
                }
            }
        }

        Ok(summary)
    }
}
