// src/main.rs
use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lexisplit::pipeline::{run, RunConfig};
use lexisplit::Category;

/// Split a text file into Chinese characters, Chinese words, English words
/// and English phrases.
#[derive(Debug, Parser)]
#[command(name = "lexisplit", version, about)]
struct Cli {
    /// Text file to analyze.
    input: Option<PathBuf>,

    /// Directory the output lists are written to.
    #[arg(long, short = 'o', default_value = ".")]
    output_dir: PathBuf,

    /// Also write Chinese-word and English-phrase lists.
    #[arg(long)]
    all_categories: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> RunConfig {
        let mut config = RunConfig {
            input: self.input,
            output_dir: self.output_dir,
            categories: lexisplit::pipeline::DEFAULT_OUTPUT_CATEGORIES.to_vec(),
        };
        if self.all_categories {
            config.categories = Category::ALL.to_vec();
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.into_config();
    let report = run(&config).context("analysis aborted, no output written")?;

    let attempted = report.written.len() + report.failed.len();
    if !report.is_complete() {
        bail!(
            "{} of {} output files could not be written",
            report.failed.len(),
            attempted
        );
    }
    info!("all {} output files written successfully", attempted);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose, rust_log.as_deref()))
        .with_target(false)
        .with_level(true)
        .init();
}

/// `RUST_LOG` wins when set and parseable; otherwise `--verbose` picks debug
/// over info.
fn build_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "info" };
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("valid arguments")
    }

    #[test]
    fn defaults_write_reference_categories_to_current_dir() {
        let config = parse(&["lexisplit", "in.txt"]).into_config();
        assert_eq!(config.input, Some(PathBuf::from("in.txt")));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(
            config.categories,
            lexisplit::pipeline::DEFAULT_OUTPUT_CATEGORIES.to_vec()
        );
    }

    #[test]
    fn all_categories_flag_selects_every_category() {
        let config = parse(&["lexisplit", "in.txt", "--all-categories", "-o", "out"]).into_config();
        assert_eq!(config.categories, Category::ALL.to_vec());
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn missing_input_is_not_a_parse_error() {
        assert_eq!(parse(&["lexisplit"]).into_config().input, None);
    }

    #[test]
    fn verbose_chooses_default_level() {
        assert_eq!(build_filter(false, None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(build_filter(true, None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(build_filter(true, Some("  ")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn rust_log_overrides_verbose() {
        assert_eq!(build_filter(true, Some("off")).max_level_hint(), Some(LevelFilter::OFF));
        assert_eq!(build_filter(false, Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn target_directives_are_kept() {
        let filter = build_filter(false, Some("nothere=debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        assert!(filter.to_string().starts_with("nothere="));
    }
}
