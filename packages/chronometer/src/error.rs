use thiserror::Error;

/// Errors that can occur when recording or wrapping measurements.
///
/// All of these indicate a mistake in how the measurements are set up by the caller,
/// not a transient condition. None of them are retried or recovered internally.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A timer was stopped without a matching start under the same key.
    #[error("timer '{key}' was stopped but never started")]
    NotStarted {
        /// The key that was stopped.
        key: String,
    },

    /// A parameter name requested for echoing is not known for the wrapped function.
    ///
    /// This is reported when wrapping if the name is not a declared parameter, and again
    /// on each call if the parameter ends up without a value for that call.
    #[error("parameter '{name}' is not available for echoing on function '{function}'")]
    UnknownParameter {
        /// The parameter name that was requested.
        name: String,

        /// The name of the wrapped function.
        function: String,
    },

    /// Combining was requested over an empty set of chronometers.
    #[error("at least one chronometer is required to combine")]
    NothingToCombine,
}

/// A specialized `Result` type for chronometer operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
