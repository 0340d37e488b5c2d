//! Error types for article extraction.

/// Error type for document loading and extraction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTML parser rejected the input outright.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// The parsed document lacks one of `<html>`, `<head>` or `<body>`.
    #[error("document is missing its <html>, <head> or <body> element")]
    MalformedDocument,
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
