use std::fmt::Display;

use time::{Date, Duration};
use vodca::{AsRefln, Fromln};

/// Fixed loan policy: every borrowing is due two weeks after it starts.
pub const LOAN_PERIOD_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct BorrowDate(Date);

impl BorrowDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct DueDate(Date);

impl DueDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }

    pub fn from_borrow_date(borrow_date: &BorrowDate) -> Self {
        Self(borrow_date.0.saturating_add(Duration::days(LOAN_PERIOD_DAYS)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct ReturnDate(Date);

impl ReturnDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}

/// Display state of a borrowing row: closed by a return, or still out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanState {
    Returned(ReturnDate),
    Outstanding(DueDate),
}

impl LoanState {
    pub fn of(due_date: &DueDate, return_date: Option<&ReturnDate>) -> Self {
        match return_date {
            Some(returned) => LoanState::Returned(*returned),
            None => LoanState::Outstanding(*due_date),
        }
    }
}

impl Display for LoanState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoanState::Returned(date) => write!(f, "returned on {}", date.0),
            LoanState::Outstanding(date) => write!(f, "outstanding, due {}", date.0),
        }
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use crate::entity::{BorrowDate, DueDate, LoanState, ReturnDate};

    #[test]
    fn due_two_weeks_after_borrowing() {
        let due = DueDate::from_borrow_date(&BorrowDate::new(date!(2024 - 01 - 01)));
        assert_eq!(due, DueDate::new(date!(2024 - 01 - 15)));

        let due = DueDate::from_borrow_date(&BorrowDate::new(date!(2024 - 02 - 20)));
        assert_eq!(due, DueDate::new(date!(2024 - 03 - 05)));
    }

    #[test]
    fn loan_state_display() {
        let due = DueDate::new(date!(2024 - 01 - 15));
        let returned = ReturnDate::new(date!(2024 - 01 - 10));
        assert_eq!(
            LoanState::of(&due, Some(&returned)).to_string(),
            "returned on 2024-01-10"
        );
        assert_eq!(
            LoanState::of(&due, None).to_string(),
            "outstanding, due 2024-01-15"
        );
    }
}
