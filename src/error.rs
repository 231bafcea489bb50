use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse embedded {what}: {source}")]
    Content {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate question id {0}")]
    DuplicateId(i64),

    #[error("question {id} has an empty {field}")]
    EmptyField { id: i64, field: &'static str },

    #[error("unknown subject '{0}'")]
    UnknownSubject(String),

    #[error("no topic matching '{topic}' in {guide}")]
    UnknownTopic { guide: String, topic: String },

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
