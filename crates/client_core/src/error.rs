use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid word service url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("word service url '{url}' cannot carry a path")]
    UnsupportedBaseUrl { url: String },
    #[error("word service request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected word service response: {0}")]
    Decode(#[from] serde_json::Error),
}
