//! CSV export of the session history.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};

use sentisense_core::types::{AnalysisRecord, SentimentLabel};

pub const EXPORT_FILE_NAME: &str = "sentiment_analysis_results.csv";
pub const EXPORT_MIME: &str = "text/csv";
pub const EXPORT_HEADER: [&str; 6] = [
    "Text",
    "Primary Sentiment",
    "Positive",
    "Neutral",
    "Negative",
    "Compound",
];

/// One exported row, column for column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Primary Sentiment")]
    pub primary_sentiment: String,
    #[serde(rename = "Positive")]
    pub positive: f64,
    #[serde(rename = "Neutral")]
    pub neutral: f64,
    #[serde(rename = "Negative")]
    pub negative: f64,
    #[serde(rename = "Compound")]
    pub compound: f64,
}

impl From<&AnalysisRecord> for ExportRow {
    fn from(record: &AnalysisRecord) -> Self {
        let score = record.score();
        Self {
            text: record.text().to_string(),
            primary_sentiment: record.label().to_string(),
            positive: score.positive,
            neutral: score.neutral,
            negative: score.negative,
            compound: score.compound,
        }
    }
}

impl ExportRow {
    pub fn label(&self) -> Result<SentimentLabel> {
        self.primary_sentiment.parse()
    }
}

/// Serialize records to UTF-8 CSV with a header row, in history order.
pub fn to_csv(records: &[AnalysisRecord]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    // Written explicitly so an empty history still yields a header.
    writer
        .write_record(EXPORT_HEADER)
        .context("failed to write CSV header")?;
    for record in records {
        writer
            .serialize(ExportRow::from(record))
            .context("failed to write CSV row")?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV export: {}", e.error()))
}

/// Parse an export back into rows.
pub fn from_csv(data: &[u8]) -> Result<Vec<ExportRow>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(data);

    let headers = reader.headers().context("failed to read CSV header")?;
    if headers.iter().ne(EXPORT_HEADER.iter().copied()) {
        anyhow::bail!(
            "unexpected CSV header: expected {}",
            EXPORT_HEADER.join(",")
        );
    }

    reader
        .deserialize()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("failed to parse CSV row {}", i + 1)))
        .collect()
}

/// Write the export to `path`. A directory path gets the default file name.
/// Returns the path actually written.
pub fn write_file(path: &Path, records: &[AnalysisRecord]) -> Result<PathBuf> {
    let target = if path.is_dir() {
        path.join(EXPORT_FILE_NAME)
    } else {
        path.to_path_buf()
    };
    let data = to_csv(records)?;
    std::fs::write(&target, data)
        .with_context(|| format!("failed to write export to {}", target.display()))?;
    tracing::info!(path = %target.display(), rows = records.len(), "exported history");
    Ok(target)
}
