use time::Date;

use kernel::prelude::entity::{
    ActiveBorrowing, BorrowedBook, BorrowingHistory, BorrowingRecord, DestructActiveBorrowing,
    DestructBorrowedBook, DestructBorrowingHistory, DestructBorrowingRecord, DestructLibraryStats,
    DestructOverdueBorrowing, LibraryStats, LoanState, OverdueBorrowing,
};

pub struct GetOverdueDto {
    pub today: Date,
}

pub struct GetStatsDto {
    pub today: Date,
}

pub struct GetMemberBorrowingDto {
    pub member_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverdueDto {
    pub member_id: i64,
    pub member_name: String,
    pub book_id: i64,
    pub title: String,
    pub borrow_date: Date,
    pub due_date: Date,
    pub days_overdue: i64,
}

impl From<OverdueBorrowing> for OverdueDto {
    fn from(value: OverdueBorrowing) -> Self {
        let DestructOverdueBorrowing {
            member_id,
            member_name,
            book_id,
            title,
            borrow_date,
            due_date,
            days_overdue,
        } = value.into_destruct();
        Self {
            member_id: member_id.into(),
            member_name: member_name.into(),
            book_id: book_id.into(),
            title: title.into(),
            borrow_date: borrow_date.into(),
            due_date: due_date.into(),
            days_overdue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowedBookDto {
    pub book_id: i64,
    pub title: String,
    pub author: String,
}

impl From<BorrowedBook> for BorrowedBookDto {
    fn from(value: BorrowedBook) -> Self {
        let DestructBorrowedBook {
            book_id,
            title,
            author,
        } = value.into_destruct();
        Self {
            book_id: book_id.into(),
            title: title.into(),
            author: author.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowingHistoryDto {
    pub title: String,
    pub author: String,
    pub borrow_date: Date,
    pub due_date: Date,
    pub state: LoanState,
}

impl From<BorrowingHistory> for BorrowingHistoryDto {
    fn from(value: BorrowingHistory) -> Self {
        let state = value.state();
        let DestructBorrowingHistory {
            title,
            author,
            borrow_date,
            due_date,
            ..
        } = value.into_destruct();
        Self {
            title: title.into(),
            author: author.into(),
            borrow_date: borrow_date.into(),
            due_date: due_date.into(),
            state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveBorrowingDto {
    pub member_name: String,
    pub title: String,
    pub borrow_date: Date,
    pub due_date: Date,
}

impl From<ActiveBorrowing> for ActiveBorrowingDto {
    fn from(value: ActiveBorrowing) -> Self {
        let DestructActiveBorrowing {
            member_name,
            title,
            borrow_date,
            due_date,
        } = value.into_destruct();
        Self {
            member_name: member_name.into(),
            title: title.into(),
            borrow_date: borrow_date.into(),
            due_date: due_date.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowingRecordDto {
    pub id: i64,
    pub member_name: String,
    pub title: String,
    pub borrow_date: Date,
    pub due_date: Date,
    pub state: LoanState,
}

impl From<BorrowingRecord> for BorrowingRecordDto {
    fn from(value: BorrowingRecord) -> Self {
        let state = value.state();
        let DestructBorrowingRecord {
            id,
            member_name,
            title,
            borrow_date,
            due_date,
            ..
        } = value.into_destruct();
        Self {
            id: id.into(),
            member_name: member_name.into(),
            title: title.into(),
            borrow_date: borrow_date.into(),
            due_date: due_date.into(),
            state,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsDto {
    pub total_books: i64,
    pub total_members: i64,
    pub currently_borrowed: i64,
    pub overdue: i64,
}

impl From<LibraryStats> for StatsDto {
    fn from(value: LibraryStats) -> Self {
        let DestructLibraryStats {
            total_books,
            total_members,
            currently_borrowed,
            overdue,
        } = value.into_destruct();
        Self {
            total_books,
            total_members,
            currently_borrowed,
            overdue,
        }
    }
}
