/// Errors raised while reading an import file as a whole.
///
/// Row-level problems never surface here; they are collected as
/// `ImportRowError`s so the rest of the file can still be processed.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
