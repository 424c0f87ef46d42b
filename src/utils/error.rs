use thiserror::Error;

#[derive(Error, Debug)]
pub enum TzError {
    #[error("Unknown timezone: {identifier}")]
    UnknownTimezone { identifier: String },

    #[error("Invalid timezone identifier: {identifier}")]
    InvalidTimezone { identifier: String },

    #[error("Local time {parts} does not exist in {identifier} (daylight saving gap)")]
    NonexistentLocalTime { identifier: String, parts: String },

    #[error("Date/time parse error: {0}")]
    Parse(#[from] chrono::ParseError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Processing error: {message}")]
    Processing { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog file error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TzError>;
