use std::path::Path;

use crate::error::ErrorKind;
use crate::upload::{self, IngestClient};

pub async fn upload_csv(path: &Path, ingest_url: &str) {
    let sink = match IngestClient::new(ingest_url) {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("Can't create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    println!("Uploading {} to {}...", path.display(), ingest_url);
    match upload::upload_file(path, &sink).await {
        Ok(rows) => println!("✓ File uploaded successfully! ({} rows)", rows),
        Err(e) if e.kind() == ErrorKind::SchemaViolation => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(file = %path.display(), kind = %e.kind(), "Upload failed: {}", e);
            eprintln!("An error occurred during upload. ({})", e.kind());
            std::process::exit(1);
        }
    }
}
