use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Format Error: {0}")]
    Format(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    /// The fingerprint set outgrew its ceiling before the game ended or repeated.
    #[error("State Explosion: {states} distinct hand states exceed the ceiling of {limit}")]
    StateExplosion { states: usize, limit: usize },

    #[error("Error running arrangement {arrangement}: {source}")]
    Worker {
        arrangement: String,
        #[source]
        source: Box<SearchError>,
    },
}

pub type SearchResult<T> = Result<T, SearchError>;
