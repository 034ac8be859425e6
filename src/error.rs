use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Duplicate job id in fleet data: {0}")]
    DuplicateJobId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
