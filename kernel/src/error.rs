use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    MemberNotFound,
    BookNotFound,
    BookUnavailable,
    BookBorrowed,
    InvalidStatus,
    MemberHasOpenBorrowing,
    NoOpenBorrowing,
    Concurrency,
    Timeout,
    Internal,
}

impl KernelError {
    /// Business-rule violations the user can recover from by changing the input.
    pub fn is_domain(&self) -> bool {
        !matches!(
            self,
            KernelError::Concurrency | KernelError::Timeout | KernelError::Internal
        )
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::MemberNotFound => write!(f, "Member does not exist"),
            KernelError::BookNotFound => write!(f, "Book does not exist"),
            KernelError::BookUnavailable => write!(f, "Book is not available for borrowing"),
            KernelError::BookBorrowed => write!(f, "Book is currently borrowed"),
            KernelError::InvalidStatus => {
                write!(f, "Borrowed status can only change through borrow or return")
            }
            KernelError::MemberHasOpenBorrowing => write!(f, "Member is still borrowing a book"),
            KernelError::NoOpenBorrowing => write!(f, "No open borrowing found"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
