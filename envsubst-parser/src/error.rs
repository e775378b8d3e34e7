/// Represents an error that occurred while parsing a substitution string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// An operator or delimiter inside a substitution was not recognized.
    #[error("bad substitution")]
    BadSubstitution,

    /// A substitution was opened but never closed.
    #[error("missing closing brace")]
    MissingClosingBrace,

    /// An identifier was expected but not found.
    #[error("unable to parse variable name")]
    VariableName,

    /// An argument of a substitution contained an unexpected token.
    #[error("unable to parse substitution within function")]
    FunctionSubstitution,

    /// The operator of a default-value substitution could not be scanned.
    #[error("unable to parse default function")]
    DefaultFunction,

    /// A `$$` escape produced something other than a literal dollar sign.
    #[error("unable to parse double dollar sign {0}")]
    DoubleDollar(String),

    /// Substitutions were nested deeper than the configured limit.
    #[error("substitutions nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// Represents an error that occurred while translating a shell pattern.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// The pattern could not be parsed.
    #[error("failed to parse pattern")]
    Pattern(#[from] peg::error::ParseError<peg::str::LineCol>),
}
