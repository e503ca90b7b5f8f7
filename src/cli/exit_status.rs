use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): the command found something to report
/// - `Failure` (1): the command ran but found no types
/// - `Error` (2): the command failed (unreadable project, invalid pattern, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Nothing was found.
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
