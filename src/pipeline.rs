// src/pipeline.rs

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{error, info};

use crate::aggregate::{analyze_reader, Analysis};
use crate::error::{AnalyzeError, SinkError};
use crate::pattern::Category;
use crate::rank::rank;
use crate::sink::write_all;

/// Categories whose lists are written unless every category is requested.
pub const DEFAULT_OUTPUT_CATEGORIES: [Category; 2] =
    [Category::ChineseCharacter, Category::EnglishWord];

#[derive(Clone, Debug)]
pub struct RunConfig {
    /// `None` means no input was selected.
    pub input: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub categories: Vec<Category>,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        RunConfig {
            input: Some(input.into()),
            output_dir: output_dir.into(),
            categories: DEFAULT_OUTPUT_CATEGORIES.to_vec(),
        }
    }

    pub fn with_all_categories(mut self) -> Self {
        self.categories = Category::ALL.to_vec();
        self
    }
}

// ----- OUTPUT NAMING -----

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// Distinct keys, most frequent first.
    Deduplicated,
    /// Raw tokens in input order.
    Duplicated,
}

impl ListKind {
    fn prefix(self) -> &'static str {
        match self {
            ListKind::Deduplicated => "deduplicated",
            ListKind::Duplicated => "duplicated",
        }
    }
}

pub fn output_file_name(category: Category, kind: ListKind) -> String {
    format!("{}_{}.txt", kind.prefix(), category.file_stem())
}

// ----- RUN -----

#[derive(Debug)]
pub struct WrittenOutput {
    pub path: PathBuf,
    pub records: usize,
}

#[derive(Debug)]
pub struct RunReport {
    pub analysis: Analysis,
    pub written: Vec<WrittenOutput>,
    pub failed: Vec<SinkError>,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Opens the selected input for buffered line reading.
pub fn open_source(input: Option<&Path>) -> Result<BufReader<File>, AnalyzeError> {
    let path = input.ok_or(AnalyzeError::NoSource)?;
    let file = File::open(path).map_err(|source| AnalyzeError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Scans the input, then ranks and writes the configured categories. Input
/// errors abort before anything is written; output errors are collected in
/// the report.
pub fn run(config: &RunConfig) -> Result<RunReport, AnalyzeError> {
    let reader = open_source(config.input.as_deref())?;
    if let Some(input) = &config.input {
        info!("selected input file: {}", input.display());
    }

    let scan_start = Instant::now();
    let analysis = analyze_reader(reader)?;
    info!(
        "scanned {} lines in {} ms",
        analysis.lines(),
        scan_start.elapsed().as_millis()
    );
    log_summary(&analysis);

    let mut lists: Vec<(PathBuf, Vec<String>)> = Vec::new();
    for &category in &config.categories {
        lists.push((
            config
                .output_dir
                .join(output_file_name(category, ListKind::Deduplicated)),
            rank(analysis.frequencies(category)),
        ));
        lists.push((
            config
                .output_dir
                .join(output_file_name(category, ListKind::Duplicated)),
            analysis.duplicated(category).to_vec(),
        ));
    }

    let mut written = Vec::new();
    let mut failed = Vec::new();
    let outcomes = write_all(
        lists
            .iter()
            .map(|(path, items)| (path.clone(), items.as_slice())),
    );
    for outcome in outcomes {
        match outcome.result {
            Ok(records) => {
                info!("wrote {} records to {}", records, outcome.path.display());
                written.push(WrittenOutput {
                    path: outcome.path,
                    records,
                });
            }
            Err(err) => {
                error!("{err}");
                failed.push(err);
            }
        }
    }

    Ok(RunReport {
        analysis,
        written,
        failed,
    })
}

fn log_summary(analysis: &Analysis) {
    for category in Category::ALL {
        let table = analysis.frequencies(category);
        match table.most_frequent() {
            Some((key, count)) => info!(
                "{}: {} tokens, {} distinct, most frequent {:?} ({})",
                category,
                table.total(),
                table.len(),
                key,
                count
            ),
            None => info!("{}: no tokens", category),
        }
    }
}
