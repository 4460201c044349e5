use std::str::FromStr;

pub const MENU: &str = "\
============== Menu ==============
LIBRARY MANAGEMENT SYSTEM
1. Add book
2. Update book
3. Delete book
4. Search books
5. List all books
6. Add member
7. Update member
8. Delete member
9. Search members
10. List all members
11. Borrow book
12. Return book
13. Overdue books (with borrowers)
14. Member borrowing history
15. Currently borrowed books
16. Library statistics
17. Borrowing log
0. Exit
==================================";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MenuChoice {
    Exit,
    AddBook,
    UpdateBook,
    DeleteBook,
    SearchBooks,
    ListBooks,
    AddMember,
    UpdateMember,
    DeleteMember,
    SearchMembers,
    ListMembers,
    BorrowBook,
    ReturnBook,
    OverdueReport,
    MemberHistory,
    BorrowedReport,
    Stats,
    BorrowingLog,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice = match s.trim() {
            "0" => MenuChoice::Exit,
            "1" => MenuChoice::AddBook,
            "2" => MenuChoice::UpdateBook,
            "3" => MenuChoice::DeleteBook,
            "4" => MenuChoice::SearchBooks,
            "5" => MenuChoice::ListBooks,
            "6" => MenuChoice::AddMember,
            "7" => MenuChoice::UpdateMember,
            "8" => MenuChoice::DeleteMember,
            "9" => MenuChoice::SearchMembers,
            "10" => MenuChoice::ListMembers,
            "11" => MenuChoice::BorrowBook,
            "12" => MenuChoice::ReturnBook,
            "13" => MenuChoice::OverdueReport,
            "14" => MenuChoice::MemberHistory,
            "15" => MenuChoice::BorrowedReport,
            "16" => MenuChoice::Stats,
            "17" => MenuChoice::BorrowingLog,
            _ => return Err(()),
        };
        Ok(choice)
    }
}

/// Sub-menu of option 4.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BookSearch {
    ById,
    ByTitle,
    ByKeyword,
}

impl FromStr for BookSearch {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" => Ok(BookSearch::ById),
            "b" => Ok(BookSearch::ByTitle),
            "c" => Ok(BookSearch::ByKeyword),
            _ => Err(()),
        }
    }
}

/// Sub-menu of option 9.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MemberSearch {
    ById,
    ByName,
}

impl FromStr for MemberSearch {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" => Ok(MemberSearch::ById),
            "b" => Ok(MemberSearch::ByName),
            _ => Err(()),
        }
    }
}
