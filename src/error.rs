use thiserror::Error;

/// Failures of a whole search. These never escape `find_nearby`; they are
/// logged and turned into an empty result.
#[derive(Debug, Error)]
pub enum PoiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to Overpass API failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Overpass API returned error status: {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to parse Overpass JSON response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Failures of a single element. The element is skipped, the batch goes on.
#[derive(Debug, Error, PartialEq)]
pub enum ElementError {
    #[error("{kind} element has no resolvable coordinate")]
    MissingCoordinate { kind: String },

    #[error("failed to build map link: {0}")]
    Link(#[from] url::ParseError),
}

/// Failures reading an explicit config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: std::path::PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
