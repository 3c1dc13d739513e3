use thiserror::Error;

#[derive(Error, Debug)]
pub enum InkwrapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Markup error: {0}")]
    Markup(#[from] inkmark::ParseError),

    #[error("Layout error: {0}")]
    Wrap(#[from] flow::WrapError),

    #[error("Color error: {0}")]
    Color(#[from] ColorParseError),

    #[error("A logger was already installed")]
    LoggerAlreadySet,
}

/// Errors that can occur when parsing a color.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Unknown color name.
    #[error("unknown color name: {0}")]
    UnknownName(String),

    /// Invalid hex color format.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),

    /// Invalid RGB color format.
    #[error("invalid RGB color: {0}")]
    InvalidRgb(String),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, InkwrapError>;
