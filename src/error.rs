use reqwest::StatusCode;

/// Coarse classification surfaced to callers. The human-readable text for
/// each kind lives in the command layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Upstream4xx,
    Upstream5xx,
    SchemaViolation,
    Configuration,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Upstream4xx => "upstream-4xx",
            ErrorKind::Upstream5xx => "upstream-5xx",
            ErrorKind::SchemaViolation => "schema-violation",
            ErrorKind::Configuration => "configuration",
        };
        f.write_str(label)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("unexpected payload: {0}")]
    Payload(String),

    #[error("Please upload a CSV file.")]
    NotCsv,

    #[error("{0}")]
    Schema(String),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) | Error::Io(_) => ErrorKind::Transport,
            Error::Upstream { status, .. } if status.is_server_error() => ErrorKind::Upstream5xx,
            Error::Upstream { .. } => ErrorKind::Upstream4xx,
            Error::Payload(_) | Error::NotCsv | Error::Schema(_) | Error::Csv(_) => {
                ErrorKind::SchemaViolation
            }
            Error::Config(_) => ErrorKind::Configuration,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Turns a non-success response into `Error::Upstream`, keeping the body for the logs.
pub async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::Upstream { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_splits_into_client_and_server_kinds() {
        let not_found = Error::Upstream {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        let bad_gateway = Error::Upstream {
            status: StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        assert_eq!(not_found.kind(), ErrorKind::Upstream4xx);
        assert_eq!(bad_gateway.kind(), ErrorKind::Upstream5xx);
    }

    #[test]
    fn input_problems_are_schema_violations() {
        assert_eq!(Error::NotCsv.kind(), ErrorKind::SchemaViolation);
        assert_eq!(Error::Payload("x".into()).kind(), ErrorKind::SchemaViolation);
        assert_eq!(Error::Schema("x".into()).kind(), ErrorKind::SchemaViolation);
    }
}
