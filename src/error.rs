use std::io;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Glob error: {0}")]
    Glob(#[from] globset::Error),

    #[error("Rotation of {artifact} failed: {source}")]
    Rotation { artifact: String, source: io::Error },
}

pub type Result<T> = std::result::Result<T, LogError>;
