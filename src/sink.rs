// src/sink.rs

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::SinkError;

/// Writes each item followed by `\n`, truncating `path` first. Returns the
/// number of records written.
pub fn write_lines<I, S>(path: &Path, items: I) -> Result<usize, SinkError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let wrap = |source| SinkError {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(wrap)?;
    let mut writer = BufWriter::new(file);
    let mut records = 0usize;
    for item in items {
        writer.write_all(item.as_ref().as_bytes()).map_err(wrap)?;
        writer.write_all(b"\n").map_err(wrap)?;
        records += 1;
    }
    writer.flush().map_err(wrap)?;
    Ok(records)
}

/// Outcome of one destination in a batch.
#[derive(Debug)]
pub struct SinkOutcome {
    pub path: PathBuf,
    pub result: Result<usize, SinkError>,
}

/// Writes every `(path, items)` pair. A failing destination does not stop
/// the ones after it.
pub fn write_all<'a, I>(outputs: I) -> Vec<SinkOutcome>
where
    I: IntoIterator<Item = (PathBuf, &'a [String])>,
{
    outputs
        .into_iter()
        .map(|(path, items)| {
            let result = write_lines(&path, items);
            SinkOutcome { path, result }
        })
        .collect()
}
