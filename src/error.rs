use thiserror::Error;

#[derive(Error, Debug)]
pub enum SysrecError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("malformed siegfried report {path}: {reason}")]
    MalformedReport { path: String, reason: String },

    #[error("catalog parse error: {0}")]
    CatalogParse(String),

    #[error("no labeled disks to tune against: {0}")]
    EmptyTuningSet(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SysrecError>;
