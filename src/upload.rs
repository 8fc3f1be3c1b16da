use async_trait::async_trait;
use std::path::Path;

use crate::error::{check_status, Error, Result};
use crate::types::UploadRow;

pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Name",
    "Description",
    "URL",
    "Size",
    "Stars",
    "Forks",
    "Issues",
    "Watchers",
    "Language",
    "Topics",
];

/// Where validated rows go.
#[async_trait]
pub trait IngestSink: Send + Sync {
    /// Sends the whole batch in one request.
    async fn submit(&self, rows: &[UploadRow]) -> Result<()>;
}

pub struct IngestClient {
    http: reqwest::Client,
    endpoint: String,
}

impl IngestClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("reposearch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/api/upload", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl IngestSink for IngestClient {
    async fn submit(&self, rows: &[UploadRow]) -> Result<()> {
        tracing::debug!(endpoint = %self.endpoint, rows = rows.len(), "posting batch");
        let resp = self.http.post(&self.endpoint).json(rows).send().await?;
        check_status(resp).await?;
        Ok(())
    }
}

/// Only files declared as `text/csv` are accepted.
pub fn check_media_type(path: &Path) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(()),
        _ => Err(Error::NotCsv),
    }
}

/// The header must be exactly the required columns, in order.
pub fn validate_header(header: &[&str]) -> Result<()> {
    for (i, required) in REQUIRED_COLUMNS.iter().enumerate() {
        if !header.contains(required) {
            return Err(Error::Schema(format!("Missing required field: {}", required)));
        }
        if header[i] != *required {
            return Err(order_error());
        }
    }
    if header.len() != REQUIRED_COLUMNS.len() {
        return Err(order_error());
    }
    Ok(())
}

fn order_error() -> Error {
    Error::Schema(format!(
        "Columns must be in the following order: {}",
        REQUIRED_COLUMNS.join(", ")
    ))
}

/// Splits on commas and trims each piece. Empty pieces are kept, so a
/// trailing comma yields a trailing `""`.
pub fn split_topics(topics: &str) -> Vec<String> {
    topics.split(',').map(|t| t.trim().to_string()).collect()
}

/// Parses and validates a whole file. Any bad row rejects the batch.
pub fn parse_rows(data: &[u8]) -> Result<Vec<UploadRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let header: Vec<&str> = headers.iter().collect();
    validate_header(&header)?;

    // Blank lines never reach here; a row of bare commas is still a row.
    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != REQUIRED_COLUMNS.len() {
            return Err(Error::Schema(format!(
                "Row {} has {} fields, expected {}",
                line + 1,
                record.len(),
                REQUIRED_COLUMNS.len()
            )));
        }

        let field = |i: usize| record[i].to_string();
        rows.push(UploadRow {
            name: field(0),
            description: field(1),
            url: field(2),
            size: field(3),
            stars: field(4),
            forks: field(5),
            issues: field(6),
            watchers: field(7),
            language: field(8),
            topics: split_topics(&record[9]),
        });
    }

    if rows.is_empty() {
        return Err(Error::Schema("The CSV file has no data rows.".to_string()));
    }
    Ok(rows)
}

/// Validates `path` and submits its rows as one batch. Returns the row count.
pub async fn upload_file(path: &Path, sink: &dyn IngestSink) -> Result<usize> {
    check_media_type(path)?;
    let data = tokio::fs::read(path).await?;
    let rows = parse_rows(&data)?;
    tracing::info!(file = %path.display(), rows = rows.len(), "uploading");
    sink.submit(&rows).await?;
    Ok(rows.len())
}
