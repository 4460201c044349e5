use error_stack::Report;

use kernel::KernelError;

mod book;
mod borrowing;
mod member;
mod report;

pub use self::{book::*, borrowing::*, member::*, report::*};

/// Builds the report for a business-rule violation and logs it.
pub(crate) fn rejected(error: KernelError, detail: impl Into<String>) -> Report<KernelError> {
    let detail = detail.into();
    tracing::warn!("{}: {}", error, detail);
    Report::new(error).attach_printable(detail)
}
