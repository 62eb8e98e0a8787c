pub type KnotloopResult<T> = Result<T, KnotloopError>;

#[derive(thiserror::Error, Debug)]
pub enum KnotloopError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KnotloopError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
