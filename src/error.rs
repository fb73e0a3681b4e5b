pub type PosterResult<T> = Result<T, PosterError>;

#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    #[error("config error: {0}")]
    Config(String),

    #[error("discovery error: {0}")]
    Discovery(String),

    #[error("image error: {0}")]
    Image(String),

    #[error("text error: {0}")]
    Text(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }
}
