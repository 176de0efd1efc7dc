use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A numeral run that the unit-table evaluator cannot resolve, or whose
    /// value does not fit in a `u64`.
    #[error("malformed numeral run {run:?}: {reason}")]
    MalformedNumeralRun { run: String, reason: &'static str },

    #[error("width normalization failed: {0}")]
    Normalization(String),

    /// A fixed-point rewrite rule still matched after `limit` passes.
    #[error("rewrite rule {rule:?} did not settle within {limit} passes")]
    RewriteLimitExceeded { rule: &'static str, limit: usize },

    #[error("{0} protected patterns exceed the private-use placeholder range")]
    TooManyProtectedPatterns(usize),

    #[error("protected-span matcher: {0}")]
    ProtectedSpans(#[from] aho_corasick::BuildError),

    #[error("input is not UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
