//! Descriptors for the supported Japanese lyrics sites.

use kashi_core::{
    LyricsFetcher, PageFetcher, PostProcess, SearchError, SiteDescriptor, SiteKind, TitlePolicy,
};
use std::sync::Arc;
use tracing::info;

/// J-Lyric.net, forward match on title and artist
pub const J_LYRIC: SiteDescriptor = SiteDescriptor {
    name: "j_lyric",
    search_url: "http://search.j-lyric.net/index.php?kt={title}&ct=2&ka={artist}&ca=2",
    result_selector: "#bas #cnt #mnb .bdy",
    artist_selector: ".sml a",
    link_selector: ".mid a",
    lyrics_base_url: "",
    lyrics_selector: "#Lyric",
    title_policy: TitlePolicy::Trimmed,
    post_process: &[
        PostProcess::Unwrap("p"),
        PostProcess::LineBreaks,
        PostProcess::NonBreakingSpaces,
    ],
};

/// J-Lyric.net, forward match on title only
pub const J_LYRIC_TITLE: SiteDescriptor = J_LYRIC.with_search_url(
    "j_lyric_title",
    "http://search.j-lyric.net/index.php?kt={title}&ct=2&ka=&ca=2",
);

/// Uta-Net, full match of title
pub const UTA_NET: SiteDescriptor = SiteDescriptor {
    name: "uta_net",
    search_url: "https://www.uta-net.com/search/?Aselect=2&Keyword={title}&Bselect=4&x=0&y=0",
    result_selector: "#ichiran .result_table table tbody tr",
    artist_selector: ".td2 a",
    link_selector: ".td1 a",
    lyrics_base_url: "https://www.uta-net.com",
    lyrics_selector: "#kashi_area",
    title_policy: TitlePolicy::Verbatim,
    post_process: &[
        PostProcess::Unwrap("div"),
        PostProcess::LineBreaks,
        PostProcess::NonBreakingSpaces,
    ],
};

/// PetitLyrics, full match of title
pub const PETIT_LYRICS: SiteDescriptor = SiteDescriptor {
    name: "petit_lyrics",
    search_url: "https://petitlyrics.com/search_lyrics?title={title}",
    result_selector: "#lyrics_list tr",
    artist_selector: "td:nth-of-type(2) a:nth-of-type(2)",
    link_selector: "td:nth-of-type(2) a:nth-of-type(1)",
    lyrics_base_url: "https://petitlyrics.com",
    lyrics_selector: "#lyrics",
    title_policy: TitlePolicy::Verbatim,
    post_process: &[
        PostProcess::Unwrap("div"),
        PostProcess::LineBreaks,
        PostProcess::Unwrap("canvas"),
        PostProcess::NonBreakingSpaces,
    ],
};

/// Get the descriptor for a site
#[must_use]
pub const fn descriptor(kind: SiteKind) -> SiteDescriptor {
    match kind {
        SiteKind::JLyric => J_LYRIC,
        SiteKind::UtaNet => UTA_NET,
        SiteKind::PetitLyrics => PETIT_LYRICS,
        SiteKind::JLyricTitle => J_LYRIC_TITLE,
    }
}

/// Build a fetcher that tries the given sites in order.
///
/// # Errors
///
/// Returns an error if a site's descriptor cannot be compiled.
pub fn lyrics_fetcher(
    sites: &[SiteKind],
    page_fetcher: &Arc<dyn PageFetcher>,
) -> Result<LyricsFetcher, SearchError> {
    let fetcher =
        LyricsFetcher::from_sites(sites.iter().map(|kind| descriptor(*kind)), page_fetcher)?;
    info!("Lyrics sources in priority order: {:?}", fetcher.source_names());
    Ok(fetcher)
}
