use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("records are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of records, found {found}")]
    NotAnArray { found: &'static str },
}
