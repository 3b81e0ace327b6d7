//! Error handling for tesseract subprocess invocations.

use std::io;

/// Result type alias for tesseract operations.
///
/// This is a convenience type alias that defaults to using [`Error`] as the
/// error type. Most functions in this crate return this type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for tesseract subprocess invocations.
///
/// Covers the three failure classes of a call: configuration rejected
/// before any process is spawned, the binary failing to start, and the
/// tool itself reporting an error on its error stream.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration rejected during validation, before any spawn.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// The tesseract binary could not be located or started.
    #[error("Failed to spawn '{binary}': {source}")]
    Spawn {
        /// The binary the spawn was attempted with
        binary: String,
        /// Underlying launch failure
        #[source]
        source: io::Error,
    },

    /// The tool wrote to its error stream.
    ///
    /// The message is the decoded error-stream text verbatim. The exit code
    /// is never consulted; non-empty stderr is the sole failure signal, so
    /// warnings the tool emits there also surface as this variant.
    #[error("{message}")]
    Tool {
        /// Decoded error-stream text
        message: String,
    },

    /// I/O failure while feeding or draining the subprocess streams.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a spawn error for the given binary.
    pub fn spawn(binary: impl Into<String>, source: io::Error) -> Self {
        Self::Spawn {
            binary: binary.into(),
            source,
        }
    }

    /// Create a tool error carrying the decoded error-stream text.
    pub fn tool(message: impl Into<String>) -> Self {
        Self::Tool {
            message: message.into(),
        }
    }

    /// Check if this is a client-side error (configuration issue the caller
    /// should fix before retrying).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Config { .. })
    }

    /// Check if this error came from the external tool itself.
    pub fn is_tool_error(&self) -> bool {
        matches!(self, Error::Tool { .. })
    }

    /// Get the error category for metrics/logging.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config",
            Error::Spawn { .. } => "spawn",
            Error::Tool { .. } => "tool",
            Error::Io(_) => "io",
        }
    }
}
