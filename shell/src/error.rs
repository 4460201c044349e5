use std::fmt::Display;
use std::process::{ExitCode, Termination};

use error_stack::{Context, Report};

use kernel::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShellError {
    /// Standard input reached end of file.
    InputClosed,
    Io,
    Service,
}

impl Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::InputClosed => write!(f, "Input closed"),
            ShellError::Io => write!(f, "Console I/O failed"),
            ShellError::Service => write!(f, "Library service failed"),
        }
    }
}

impl Context for ShellError {}

#[derive(Debug)]
pub struct StackTrace(Report<ShellError>);

impl From<Report<ShellError>> for StackTrace {
    fn from(e: Report<ShellError>) -> Self {
        StackTrace(e)
    }
}

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e.change_context(ShellError::Service))
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}
