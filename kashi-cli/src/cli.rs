use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "kashi", version, about = "Fetch song lyrics from Japanese lyrics sites")]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download lyrics for every `title<TAB>artist` line of a file.
    Batch {
        input: PathBuf,
        /// Directory to write lyrics files to.
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        strictness: StrictnessArgs,
    },
    /// Search one song and print its lyrics to stdout.
    Search {
        artist: String,
        title: String,
        #[command(flatten)]
        strictness: StrictnessArgs,
    },
    /// Print `title<TAB>artist` lines from the monthly karaoke ranking.
    Ranking {
        /// Oldest year to scrape.
        #[arg(long, default_value_t = 2008)]
        from: u16,
        /// Newest year to scrape.
        #[arg(long, default_value_t = 2018)]
        to: u16,
    },
}

/// `--strict` / `--no-strict`; the last one given wins.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct StrictnessArgs {
    /// Require exact artist names when a search lists several songs.
    #[arg(long, overrides_with = "no_strict")]
    strict: bool,
    /// Accept a matching first letter even if the config file sets `strict`.
    #[arg(long, overrides_with = "strict")]
    no_strict: bool,
}

impl StrictnessArgs {
    /// Strictness after applying the flags over the configured value
    #[must_use]
    pub const fn resolve(self, configured: bool) -> bool {
        if self.strict {
            true
        } else if self.no_strict {
            false
        } else {
            configured
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_batch() {
        let cli =
            Cli::try_parse_from(["kashi", "batch", "list.tsv", "--output", "out", "--strict"])
                .unwrap();
        let Command::Batch {
            input,
            output,
            strictness,
        } = cli.command
        else {
            unreachable!("expected the batch command");
        };
        assert_eq!(input, PathBuf::from("list.tsv"));
        assert_eq!(output, Some(PathBuf::from("out")));
        assert!(strictness.resolve(false));
    }

    fn search_strictness(flags: &[&str]) -> StrictnessArgs {
        let args = ["kashi", "search", "flumpool", "蕾"].iter().chain(flags);
        let Command::Search { strictness, .. } = Cli::try_parse_from(args).unwrap().command else {
            unreachable!("expected the search command");
        };
        strictness
    }

    #[test]
    fn test_strictness_defaults_to_config() {
        assert!(!search_strictness(&[]).resolve(false));
        assert!(search_strictness(&[]).resolve(true));
    }

    #[test]
    fn test_no_strict_overrides_config() {
        assert!(!search_strictness(&["--no-strict"]).resolve(true));
        assert!(search_strictness(&["--strict"]).resolve(false));
    }

    #[test]
    fn test_last_strictness_flag_wins() {
        assert!(!search_strictness(&["--strict", "--no-strict"]).resolve(true));
        assert!(search_strictness(&["--no-strict", "--strict"]).resolve(false));
    }

    #[test]
    fn test_parse_ranking_defaults() {
        let cli = Cli::try_parse_from(["kashi", "ranking"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Ranking {
                from: 2008,
                to: 2018
            }
        ));
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["kashi", "search", "flumpool", "蕾", "--config", "c.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }
}
