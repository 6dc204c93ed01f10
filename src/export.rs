//! CSV export of an experiment's responses
//!
//! One row per response in stored order. The header and numeric columns are
//! written bare; the response text is always double-quoted, with embedded
//! quotes doubled, so numeric-looking text stays distinguishable.

use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use crate::experiment::{Experiment, ResponseRecord};
use crate::Result;

/// Column headers, in row order.
pub const CSV_HEADERS: [&str; 9] = [
    "Temperature",
    "Top-p",
    "Max Tokens",
    "Completeness",
    "Coherence",
    "Creativity",
    "Relevance",
    "Overall",
    "Response Text",
];

/// Render every response of `experiment` as CSV.
///
/// # Errors
///
/// Returns [`crate::Error::Csv`] if the writer fails.
pub fn to_csv(experiment: &Experiment) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, experiment.responses())?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write `responses` as CSV to any writer.
///
/// # Errors
///
/// Returns [`crate::Error::Csv`] if writing fails.
pub fn write_records<W: std::io::Write>(writer: W, responses: &[ResponseRecord]) -> Result<()> {
    // The text column is quoted by hand; the writer only quotes by style.
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(CSV_HEADERS)?;
    for response in responses {
        let p = &response.parameters;
        let m = &response.metrics;
        wtr.write_record([
            p.temperature.to_string(),
            p.top_p.to_string(),
            p.max_tokens.to_string(),
            m.completeness.to_string(),
            m.coherence.to_string(),
            m.creativity.to_string(),
            m.relevance.to_string(),
            m.overall.to_string(),
            quoted(&response.text),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// `text` wrapped in double quotes, inner quotes doubled.
fn quoted(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Download name for an experiment: non-alphanumerics become `_`,
/// lowercased, suffixed `_results.csv`.
#[must_use]
pub fn file_name(experiment_name: &str) -> String {
    let stem: String = experiment_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}_results.csv")
}

/// Write the CSV for `experiment` into `dir` and return the file path.
///
/// # Errors
///
/// Returns error if the file cannot be created or written.
pub fn write_csv<P: AsRef<Path>>(experiment: &Experiment, dir: P) -> Result<PathBuf> {
    let path = dir.as_ref().join(file_name(experiment.name()));
    let file = std::fs::File::create(&path)?;
    write_records(file, experiment.responses())?;
    debug!(path = %path.display(), rows = experiment.responses().len(), "exported csv");
    Ok(path)
}
