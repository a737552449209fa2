use thiserror::Error;

#[derive(Error, Debug)]
pub enum RevealError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Audio error: {0}")]
    AudioError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),
}

impl From<&str> for RevealError {
    fn from(error: &str) -> Self {
        RevealError::ConfigError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RevealError>;
