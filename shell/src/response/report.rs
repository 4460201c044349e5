use application::transfer::{
    ActiveBorrowingDto, BorrowingHistoryDto, BorrowingRecordDto, OverdueDto, StatsDto,
};

use crate::controller::Exhaust;
use crate::response::Screen;

pub struct ReportPresenter;

impl Exhaust<Vec<OverdueDto>> for ReportPresenter {
    type To = Screen;
    fn emit(&self, input: Vec<OverdueDto>) -> Self::To {
        if input.is_empty() {
            return Screen::from("No overdue books.");
        }
        let lines = input.into_iter().map(|o| {
            format!(
                "- Member [{}] {} | Book [{}] {} | Borrowed {} | Due {} | Late {} days",
                o.member_id,
                o.member_name,
                o.book_id,
                o.title,
                o.borrow_date,
                o.due_date,
                o.days_overdue
            )
        });
        std::iter::once("Overdue books:".to_string())
            .chain(lines)
            .collect()
    }
}

impl Exhaust<Vec<BorrowingHistoryDto>> for ReportPresenter {
    type To = Screen;
    fn emit(&self, input: Vec<BorrowingHistoryDto>) -> Self::To {
        if input.is_empty() {
            return Screen::from("No borrowing history.");
        }
        input
            .into_iter()
            .map(|h| {
                format!(
                    "- {} by {} | Borrowed {} | {}",
                    h.title, h.author, h.borrow_date, h.state
                )
            })
            .collect()
    }
}

impl Exhaust<Vec<ActiveBorrowingDto>> for ReportPresenter {
    type To = Screen;
    fn emit(&self, input: Vec<ActiveBorrowingDto>) -> Self::To {
        if input.is_empty() {
            return Screen::from("No books are currently borrowed.");
        }
        input
            .into_iter()
            .map(|a| {
                format!(
                    "- {} | Borrower: {} | Borrowed {} | Due {}",
                    a.title, a.member_name, a.borrow_date, a.due_date
                )
            })
            .collect()
    }
}

impl Exhaust<Vec<BorrowingRecordDto>> for ReportPresenter {
    type To = Screen;
    fn emit(&self, input: Vec<BorrowingRecordDto>) -> Self::To {
        if input.is_empty() {
            return Screen::from("No borrowings recorded.");
        }
        input
            .into_iter()
            .map(|r| {
                format!(
                    "[{}] {} | {} | Borrowed {} | {}",
                    r.id, r.member_name, r.title, r.borrow_date, r.state
                )
            })
            .collect()
    }
}

impl Exhaust<StatsDto> for ReportPresenter {
    type To = Screen;
    fn emit(&self, input: StatsDto) -> Self::To {
        Screen::default()
            .line(format!("Total books: {}", input.total_books))
            .line(format!("Total members: {}", input.total_members))
            .line(format!("Currently borrowed: {}", input.currently_borrowed))
            .line(format!("Overdue: {}", input.overdue))
    }
}
