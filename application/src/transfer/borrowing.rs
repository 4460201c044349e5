use time::Date;

use kernel::prelude::entity::{BorrowDate, DueDate};

pub struct BorrowBookDto {
    pub member_id: i64,
    pub book_id: i64,
    pub borrow_date: Date,
    pub due_date: Date,
}

impl BorrowBookDto {
    /// Borrowing that starts on `borrow_date` and is due after the standard loan period.
    pub fn with_loan_policy(member_id: i64, book_id: i64, borrow_date: Date) -> Self {
        let due_date = DueDate::from_borrow_date(&BorrowDate::new(borrow_date));
        Self {
            member_id,
            book_id,
            borrow_date,
            due_date: due_date.into(),
        }
    }
}

pub struct ReturnBookDto {
    pub member_id: i64,
    pub book_id: i64,
    pub return_date: Date,
}
