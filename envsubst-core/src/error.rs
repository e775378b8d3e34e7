//! Error facilities

/// Monolithic error type for substitution evaluation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input could not be parsed.
    #[error("{source}")]
    Parse {
        /// The underlying parse error.
        source: envsubst_parser::ParseError,
        /// The original, unmodified input.
        input: String,
    },

    /// A `${v:?message}` or `${v?message}` substitution found its variable unset.
    #[error("{name}: {message}")]
    RequiredVariable {
        /// Name of the variable.
        name: String,
        /// The user-facing message.
        message: String,
    },

    /// A shell pattern could not be translated.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] envsubst_parser::PatternError),

    /// A translated pattern was not a valid regular expression.
    #[error("invalid regex '{1}': {0}")]
    InvalidRegex(#[source] fancy_regex::Error, String),

    /// An error occurred while matching a regular expression.
    #[error("regex error: {0}")]
    Regex(#[from] fancy_regex::Error),
}

impl Error {
    /// For parse failures, returns the original input that failed to parse.
    pub fn input(&self) -> Option<&str> {
        match self {
            Self::Parse { input, .. } => Some(input.as_str()),
            _ => None,
        }
    }

    /// Returns the parse error, if this is a parse failure.
    pub const fn parse_error(&self) -> Option<&envsubst_parser::ParseError> {
        match self {
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
