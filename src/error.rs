use thiserror::Error;

use crate::surface::HandleRole;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Surface is missing required handle: {0}")]
    MissingHandle(HandleRole),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Widget channel closed")]
    ChannelClosed,
}

impl From<&str> for WidgetError {
    fn from(error: &str) -> Self {
        WidgetError::Config(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WidgetError>;
