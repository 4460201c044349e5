use time::Date;

use application::transfer::{BorrowBookDto, ReturnBookDto};

use crate::controller::Intake;

#[derive(Debug)]
pub struct BorrowBookRequest {
    member_id: i64,
    book_id: i64,
    today: Date,
}

impl BorrowBookRequest {
    pub fn new(member_id: i64, book_id: i64, today: Date) -> Self {
        Self {
            member_id,
            book_id,
            today,
        }
    }
}

#[derive(Debug)]
pub struct ReturnBookRequest {
    member_id: i64,
    book_id: i64,
    today: Date,
}

impl ReturnBookRequest {
    pub fn new(member_id: i64, book_id: i64, today: Date) -> Self {
        Self {
            member_id,
            book_id,
            today,
        }
    }
}

pub struct BorrowingTransformer;

impl Intake<BorrowBookRequest> for BorrowingTransformer {
    type To = BorrowBookDto;
    fn emit(&self, input: BorrowBookRequest) -> Self::To {
        BorrowBookDto::with_loan_policy(input.member_id, input.book_id, input.today)
    }
}

impl Intake<ReturnBookRequest> for BorrowingTransformer {
    type To = ReturnBookDto;
    fn emit(&self, input: ReturnBookRequest) -> Self::To {
        ReturnBookDto {
            member_id: input.member_id,
            book_id: input.book_id,
            return_date: input.today,
        }
    }
}
