#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid API base URL {base:?}: {source}")]
    BadApiBase {
        base: String,
        source: url::ParseError,
    },
    #[error("unable to encode request parameters: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
    /// Failure reported by a session backend while building the URL.
    #[error("{0}")]
    Session(String),
}
