use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from reading the tree file or driving the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// The document tree file is not valid JSON for the expected shape.
    #[error("Malformed document tree: {0}")]
    Json(#[from] serde_json::Error),

    /// The document tree parsed but violates a structural rule.
    #[error("Invalid document tree: {0}")]
    InvalidTree(String),

    /// Invalid path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The log subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Out-of-band crash signalling.
///
/// Search validation problems never reach this; they live in the engine state.
pub trait FatalReporter {
    fn report_fatal(&mut self, error: &AppError);
}

/// Reporter that records the fault in the log.
#[derive(Debug, Default)]
pub struct LogReporter {
    reported: usize,
}

#[cfg(test)]
impl LogReporter {
    fn reported(&self) -> usize {
        self.reported
    }
}

impl FatalReporter for LogReporter {
    fn report_fatal(&mut self, error: &AppError) {
        self.reported += 1;
        tracing::error!(%error, count = self.reported, "fatal error");
    }
}
