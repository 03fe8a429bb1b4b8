use super::config::ConfigError;
use super::curve::TrimError;
use super::render::RenderError;
use super::store::SourceError;
use std::error::Error;
use std::fmt::Display;

#[derive(Debug)]
pub enum XSecError {
    Config(ConfigError),
    Source(SourceError),
    Trim(TrimError),
    Render(RenderError),
}

impl From<ConfigError> for XSecError {
    fn from(err: ConfigError) -> XSecError {
        XSecError::Config(err)
    }
}

impl From<SourceError> for XSecError {
    fn from(err: SourceError) -> XSecError {
        XSecError::Source(err)
    }
}

impl From<TrimError> for XSecError {
    fn from(value: TrimError) -> Self {
        XSecError::Trim(value)
    }
}

impl From<RenderError> for XSecError {
    fn from(value: RenderError) -> Self {
        XSecError::Render(value)
    }
}

impl Display for XSecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            XSecError::Config(x) => write!(f, "Configuration error: {x}"),
            XSecError::Source(x) => write!(f, "Cross section source error: {x}"),
            XSecError::Trim(x) => write!(f, "Trimming error: {x}"),
            XSecError::Render(x) => write!(f, "Rendering error: {x}"),
        }
    }
}

impl Error for XSecError {}
