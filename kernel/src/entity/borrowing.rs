mod date;
mod id;

pub use self::{date::*, id::*};
use crate::entity::{BookId, MemberId};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Borrowing {
    id: BorrowingId,
    member_id: MemberId,
    book_id: BookId,
    borrow_date: BorrowDate,
    due_date: DueDate,
    return_date: Option<ReturnDate>,
}

impl Borrowing {
    pub fn new(
        id: BorrowingId,
        member_id: MemberId,
        book_id: BookId,
        borrow_date: BorrowDate,
        due_date: DueDate,
        return_date: Option<ReturnDate>,
    ) -> Self {
        Self {
            id,
            member_id,
            book_id,
            borrow_date,
            due_date,
            return_date,
        }
    }
}
