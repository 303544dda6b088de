use thiserror::Error;

use crate::regex::ParseError;

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("no pattern given (use -E <pattern>, or pass one as the first argument)")]
    MissingPattern,
    #[error("missing argument for {0}")]
    MissingArgument(&'static str),
}

// Everything that can stop the program before it attempts to match a
// single line. Reported to stderr; the process exits with code 2
// without running any search.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("usage: {0}")]
    Usage(#[from] UsageError),
    #[error("bad pattern: {0}")]
    Pattern(#[from] ParseError),
}
