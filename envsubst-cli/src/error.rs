/// Errors that terminate an envsubst run.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    /// A line could not be expanded.
    #[error(transparent)]
    Substitution(#[from] envsubst_core::Error),

    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// An explicitly requested configuration file could not be loaded.
    #[error("{path}: {source}")]
    Config {
        path: String,
        #[source]
        source: crate::config::ConfigLoadError,
    },
}
