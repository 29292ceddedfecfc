use std::fmt;
use std::path::PathBuf;

/// Result type for steno-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Transport failure or undecodable response body
    Http(reqwest::Error),

    /// Remote answered with a non-success status
    Status { url: String, status: u16 },

    /// Schema layer error
    Types(steno_types::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// JSON encoding/decoding failed
    Json(serde_json::Error),

    /// Configuration error
    Config(String),

    /// Input file or directory cannot be used
    InvalidInput(String),

    /// Processing a specific file failed
    File { path: PathBuf, source: Box<Error> },
}

impl Error {
    /// Whether this error came from talking to the remote API
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Status { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(err) => write!(f, "HTTP error: {}", err),
            Error::Status { url, status } => write!(f, "HTTP status {} for {}", status, url),
            Error::Types(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::File { path, source } => write!(f, "{}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(err) => Some(err),
            Error::Types(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::File { source, .. } => Some(source.as_ref()),
            Error::Status { .. } | Error::Config(_) | Error::InvalidInput(_) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

impl From<steno_types::Error> for Error {
    fn from(err: steno_types::Error) -> Self {
        Error::Types(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        match err.into_io_error() {
            Some(io) => Error::Io(io),
            None => Error::InvalidInput("directory traversal loop".to_string()),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
