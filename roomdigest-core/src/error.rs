use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("invalid footer template: {0}")]
    InvalidFooterTemplate(String),

    #[error("invalid subject template: {0}")]
    InvalidSubjectTemplate(String),

    #[error("unknown locale: {locale} (supported: {supported})")]
    UnknownLocale { locale: String, supported: String },

    #[error("invalid time pattern: {0}")]
    InvalidTimePattern(String),

    #[error("invalid utc offset: {0}")]
    InvalidUtcOffset(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("cannot determine home directory")]
    HomeDirectoryNotFound,

    #[error("invalid json in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DigestError>;
