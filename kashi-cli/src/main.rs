mod cli;

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command, StrictnessArgs};
use kashi_core::{
    BatchDriver, BatchOptions, HttpPageFetcher, KashiConfig, LyricsFetcher, PageFetcher,
    SearchQuery,
};
use kashi_ranking::RankingScraper;

/// Initialize tracing on stderr; stdout carries lyrics and list output
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn build_fetcher(
    config: &KashiConfig,
    page_fetcher: &Arc<dyn PageFetcher>,
) -> anyhow::Result<LyricsFetcher> {
    kashi_sites::lyrics_fetcher(&config.search.sources, page_fetcher)
        .context("build lyrics sources")
}

async fn run_batch(
    config: &KashiConfig,
    page_fetcher: &Arc<dyn PageFetcher>,
    input: PathBuf,
    output: Option<PathBuf>,
    strictness: StrictnessArgs,
) -> anyhow::Result<ExitCode> {
    let fetcher = build_fetcher(config, page_fetcher)?;
    let options = BatchOptions {
        output_dir: output.unwrap_or_else(|| config.output.dir.clone()),
        strict: strictness.resolve(config.search.strict),
        continue_on_error: config.output.continue_on_error,
    };
    info!("Writing lyrics to {}", options.output_dir.display());

    let file = File::open(&input).with_context(|| format!("open {}", input.display()))?;
    let driver = BatchDriver::new(&fetcher, options);
    let summary = driver
        .run(BufReader::new(file), &mut io::stdout().lock())
        .await
        .context("batch run")?;

    info!("{} of {} records found", summary.found, summary.total());
    Ok(ExitCode::SUCCESS)
}

async fn run_search(
    config: &KashiConfig,
    page_fetcher: &Arc<dyn PageFetcher>,
    artist: String,
    title: String,
    strictness: StrictnessArgs,
) -> anyhow::Result<ExitCode> {
    let fetcher = build_fetcher(config, page_fetcher)?;
    let query =
        SearchQuery::new(artist, title).with_strict(strictness.resolve(config.search.strict));

    match fetcher.fuzzy_search(&query).await {
        Ok(document) => {
            info!("Lyrics from {} ({})", document.source, document.url);
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", document.text)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_not_found() => {
            eprintln!("Lyrics not found: {} - {}", query.title, query.artist);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e).context("search lyrics"),
    }
}

async fn run_ranking(
    page_fetcher: &Arc<dyn PageFetcher>,
    from: u16,
    to: u16,
) -> anyhow::Result<ExitCode> {
    let scraper = RankingScraper::new(Arc::clone(page_fetcher)).context("build ranking scraper")?;
    let months = kashi_ranking::months(from, to);
    let summary = scraper
        .scrape(&months, &mut io::stdout().lock())
        .await
        .context("scrape ranking")?;

    info!(
        "Scraped {} songs from {} months ({} failed)",
        summary.songs, summary.months, summary.failed_months
    );
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let config = KashiConfig::load(cli.config.as_deref()).context("load config")?;
    let page_fetcher: Arc<dyn PageFetcher> =
        Arc::new(HttpPageFetcher::new(&config.http).context("build HTTP client")?);

    match cli.command {
        Command::Batch {
            input,
            output,
            strictness,
        } => run_batch(&config, &page_fetcher, input, output, strictness).await,
        Command::Search {
            artist,
            title,
            strictness,
        } => run_search(&config, &page_fetcher, artist, title, strictness).await,
        Command::Ranking { from, to } => run_ranking(&page_fetcher, from, to).await,
    }
}
