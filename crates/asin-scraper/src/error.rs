use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// No ASIN could be found in the caller's input.
    #[error("Invalid ASIN or URL")]
    InvalidIdentifier { input: String },

    /// Both fetch tiers failed. Tier causes are logged, not carried.
    #[error("Failed to load page content.")]
    Fetch,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("unusable page body from {url}: {reason}")]
    UnusableBody { url: String, reason: &'static str },

    #[error("invalid proxy endpoint \"{endpoint}\": {reason}")]
    InvalidProxy { endpoint: String, reason: String },

    #[error("browser error: {0}")]
    Browser(String),

    #[error("browser fetch timed out after {secs}s")]
    BrowserTimeout { secs: u64 },
}

impl From<chromiumoxide::error::CdpError> for ScraperError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Self::Browser(err.to_string())
    }
}
