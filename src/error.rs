use thiserror::Error;

#[derive(Error, Debug)]
pub enum JudgeError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("submissions file not found: {0}")]
    SubmissionsNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("report parse error: {0}")]
    ReportParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JudgeError>;
