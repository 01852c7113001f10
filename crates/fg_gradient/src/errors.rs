//! Errors of a single gradient to filter conversion
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GradientError {
    /// The gradient text does not match the supported grammar
    #[error("`{0}` is not a valid linear gradient value.")]
    Syntax(String),

    /// One of the end colors could not be parsed
    #[error("{message} in `{gradient}`")]
    Color { message: String, gradient: String },
}
