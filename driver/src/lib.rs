use error_stack::Report;
use kernel::KernelError;

pub mod database;
mod error;

/// Reads `key` from the process environment, loading `.env` first.
/// A missing variable is `None`; an unreadable one is an error.
pub(crate) fn env(key: &str) -> error_stack::Result<Option<String>, KernelError> {
    match dotenvy::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(error) => Err(Report::new(error)
            .change_context(KernelError::Internal)
            .attach_printable(format!("Env {} could not be read", key))),
    }
}
