use time::Date;

use application::transfer::BorrowedBookDto;

use crate::controller::Exhaust;
use crate::response::Screen;

pub struct BorrowingPresenter;

impl Exhaust<Date> for BorrowingPresenter {
    type To = Screen;
    fn emit(&self, due_date: Date) -> Self::To {
        Screen::from(format!("Borrowed. Due date: {}", due_date))
    }
}

/// A member's current loans, listed before picking the one to return.
impl Exhaust<Vec<BorrowedBookDto>> for BorrowingPresenter {
    type To = (Vec<i64>, Screen);
    fn emit(&self, input: Vec<BorrowedBookDto>) -> Self::To {
        let ids = input.iter().map(|book| book.book_id).collect();
        let screen = input
            .iter()
            .map(|book| format!("[{}] {} - {}", book.book_id, book.title, book.author))
            .collect();
        (ids, screen)
    }
}
