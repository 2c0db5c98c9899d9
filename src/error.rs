//! Error types for a3s-crontab

use thiserror::Error;

/// Errors that can occur while parsing crontabs or computing next runs
#[derive(Debug, Error)]
pub enum CronError {
    /// Malformed range/step syntax, bad step, reversed or out-of-bounds range
    #[error("Invalid field: '{0}'")]
    InvalidField(String),

    /// Job line without five time fields and a command
    #[error("Invalid job: '{0}'")]
    InvalidJob(String),

    /// The schedule can never be satisfied (e.g. February 31st)
    #[error("Couldn't find a valid time for the cron job '{0}'")]
    Unschedulable(String),

    /// A parse error raised while scanning a multi-line crontab
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<CronError>,
    },

    /// I/O error while reading a crontab
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CronError {
    /// Attach a 1-based crontab line number to this error.
    pub fn at_line(self, line: usize) -> Self {
        CronError::Line {
            line,
            source: Box::new(self),
        }
    }

    /// Line number this error was raised at, if it came from a crontab.
    pub fn line(&self) -> Option<usize> {
        match self {
            CronError::Line { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// The underlying error with any line-number wrapping removed.
    pub fn root(&self) -> &CronError {
        match self {
            CronError::Line { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias for crontab operations
pub type Result<T> = std::result::Result<T, CronError>;
