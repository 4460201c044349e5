use std::fmt::Display;

use error_stack::Report;

use crate::KernelError;

/// Stored as `0`, `1` and `2` respectively.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum BookStatus {
    Available,
    Borrowed,
    Other,
}

impl From<BookStatus> for i32 {
    fn from(value: BookStatus) -> Self {
        match value {
            BookStatus::Available => 0,
            BookStatus::Borrowed => 1,
            BookStatus::Other => 2,
        }
    }
}

impl TryFrom<i32> for BookStatus {
    type Error = Report<KernelError>;
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BookStatus::Available),
            1 => Ok(BookStatus::Borrowed),
            2 => Ok(BookStatus::Other),
            _ => Err(Report::new(KernelError::InvalidStatus)
                .attach_printable(format!("unknown book status code: {value}"))),
        }
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookStatus::Available => write!(f, "available"),
            BookStatus::Borrowed => write!(f, "borrowed"),
            BookStatus::Other => write!(f, "other"),
        }
    }
}
