use destructure::Destructure;
use vodca::References;

use crate::entity::{
    BookAuthor, BookId, BookTitle, BorrowDate, BorrowingId, DueDate, LoanState, MemberId,
    MemberName, ReturnDate,
};

/// An open borrowing whose due date has already passed.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct OverdueBorrowing {
    member_id: MemberId,
    member_name: MemberName,
    book_id: BookId,
    title: BookTitle,
    borrow_date: BorrowDate,
    due_date: DueDate,
    days_overdue: i64,
}

impl OverdueBorrowing {
    pub fn new(
        member_id: MemberId,
        member_name: MemberName,
        book_id: BookId,
        title: BookTitle,
        borrow_date: BorrowDate,
        due_date: DueDate,
        days_overdue: i64,
    ) -> Self {
        Self {
            member_id,
            member_name,
            book_id,
            title,
            borrow_date,
            due_date,
            days_overdue,
        }
    }
}

/// A book a member is holding right now.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct BorrowedBook {
    book_id: BookId,
    title: BookTitle,
    author: BookAuthor,
}

impl BorrowedBook {
    pub fn new(book_id: BookId, title: BookTitle, author: BookAuthor) -> Self {
        Self {
            book_id,
            title,
            author,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct BorrowingHistory {
    title: BookTitle,
    author: BookAuthor,
    borrow_date: BorrowDate,
    due_date: DueDate,
    return_date: Option<ReturnDate>,
}

impl BorrowingHistory {
    pub fn new(
        title: BookTitle,
        author: BookAuthor,
        borrow_date: BorrowDate,
        due_date: DueDate,
        return_date: Option<ReturnDate>,
    ) -> Self {
        Self {
            title,
            author,
            borrow_date,
            due_date,
            return_date,
        }
    }

    pub fn state(&self) -> LoanState {
        LoanState::of(&self.due_date, self.return_date.as_ref())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct ActiveBorrowing {
    member_name: MemberName,
    title: BookTitle,
    borrow_date: BorrowDate,
    due_date: DueDate,
}

impl ActiveBorrowing {
    pub fn new(
        member_name: MemberName,
        title: BookTitle,
        borrow_date: BorrowDate,
        due_date: DueDate,
    ) -> Self {
        Self {
            member_name,
            title,
            borrow_date,
            due_date,
        }
    }
}

/// One line of the full borrowing log.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct BorrowingRecord {
    id: BorrowingId,
    member_name: MemberName,
    title: BookTitle,
    borrow_date: BorrowDate,
    due_date: DueDate,
    return_date: Option<ReturnDate>,
}

impl BorrowingRecord {
    pub fn new(
        id: BorrowingId,
        member_name: MemberName,
        title: BookTitle,
        borrow_date: BorrowDate,
        due_date: DueDate,
        return_date: Option<ReturnDate>,
    ) -> Self {
        Self {
            id,
            member_name,
            title,
            borrow_date,
            due_date,
            return_date,
        }
    }

    pub fn state(&self) -> LoanState {
        LoanState::of(&self.due_date, self.return_date.as_ref())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, References, Destructure)]
pub struct LibraryStats {
    total_books: i64,
    total_members: i64,
    currently_borrowed: i64,
    overdue: i64,
}

impl LibraryStats {
    pub fn new(total_books: i64, total_members: i64, currently_borrowed: i64, overdue: i64) -> Self {
        Self {
            total_books,
            total_members,
            currently_borrowed,
            overdue,
        }
    }
}
