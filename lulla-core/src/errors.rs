// lulla-core/src/errors.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can end a utility run.
#[derive(Error, Debug)]
pub enum LullaError {
    /// A required argument is missing or unusable. The usage text is printed.
    #[error("{0}")]
    Usage(String),

    /// An input path or precondition failed a check after argument parsing.
    #[error("{0}")]
    Validation(String),

    /// The external tool ran but exited with a non-zero status.
    #[error("{message}")]
    ToolFailed { status: i32, message: String },

    /// The external program could not be started at all.
    #[error("Failed to spawn process for command: {command}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// A command line had an opening quote without its closing partner.
    #[error("No closing quotation in command line: {0}")]
    UnbalancedQuote(String),

    #[error("Failed to parse XML in {path:?}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl LullaError {
    pub fn usage(msg: impl Into<String>) -> Self {
        LullaError::Usage(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        LullaError::Validation(msg.into())
    }

    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        LullaError::Io {
            context: context.into(),
            source,
        }
    }

    /// The process exit code this error should terminate with.
    ///
    /// A failed external tool hands its own status through untouched; every
    /// failure detected by the utility itself exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            LullaError::ToolFailed { status, .. } => *status,
            _ => 1,
        }
    }

    /// Whether the usage text should follow the error message.
    pub fn shows_usage(&self) -> bool {
        matches!(self, LullaError::Usage(_))
    }
}

pub type Result<T> = std::result::Result<T, LullaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failure_keeps_status() {
        let err = LullaError::ToolFailed {
            status: 42,
            message: "MSBuild failed".to_string(),
        };
        assert_eq!(err.exit_code(), 42);
        assert!(!err.shows_usage());
    }

    #[test]
    fn test_internal_failures_exit_with_one() {
        assert_eq!(LullaError::usage("missing").exit_code(), 1);
        assert_eq!(LullaError::validation("bad path").exit_code(), 1);
        let spawn = LullaError::Spawn {
            command: "nuget restore a.sln".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(spawn.exit_code(), 1);
    }

    #[test]
    fn test_only_usage_errors_show_usage() {
        assert!(LullaError::usage("missing").shows_usage());
        assert!(!LullaError::validation("bad path").shows_usage());
    }
}
