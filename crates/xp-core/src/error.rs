use thiserror::Error;

#[derive(Error, Debug)]
pub enum XpError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid pattern {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
    #[error("Corpus format error at line {line}: {message}")]
    CorpusFormat { line: usize, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, XpError>;
