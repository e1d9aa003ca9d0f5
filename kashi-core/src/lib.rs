pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod fuzzy;
pub mod http;
pub mod paths;
pub mod provider;
pub mod site;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use batch::{BatchDriver, BatchOptions, BatchSummary};
pub use config::{HttpConfig, KashiConfig, OutputConfig, SearchConfig, SiteKind};
pub use error::{ConfigError, SearchError};
pub use extract::PostProcess;
pub use fetcher::LyricsFetcher;
pub use fuzzy::title_variants;
pub use http::{HttpPageFetcher, PageFetcher};
pub use paths::{config_dir, lyrics_file_name, lyrics_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use provider::{LyricsDocument, LyricsSource, SearchQuery};
pub use site::{pick_candidate, Candidate, SiteDescriptor, SiteSearcher, TitlePolicy};
