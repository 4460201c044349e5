use std::io::{BufRead, Write};

use error_stack::ResultExt;

use application::service::{
    BorrowBookService, GetBookService, GetBorrowingReportService, GetMemberService,
    ReturnBookService,
};
use application::transfer::GetMemberDto;

use crate::controller::Controller;
use crate::error::ShellError;
use crate::request::{
    BookTransformer, BorrowBookRequest, BorrowingTransformer, MemberBorrowingRequest,
    ReportTransformer, ReturnBookRequest, SearchBookRequest,
};
use crate::response::{Acknowledge, BookChoicePresenter, BorrowingPresenter};
use crate::session::Session;
use crate::validate;

impl<R: BufRead, W: Write> Session<R, W> {
    /// Picks a book among the available ones matching a keyword and lends it from today.
    pub(crate) async fn borrow_book(&mut self) -> error_stack::Result<(), ShellError> {
        let member_id = self.ask_id("Member id: ")?;
        let db = self.app.database();
        let member = db
            .get_member(GetMemberDto { id: member_id })
            .await
            .change_context(ShellError::Service)?;
        if member.is_none() {
            return self.console.write_line("Member not found.");
        }

        let keyword = self.console.ask("Search title: ", validate::text)?;
        let (offered, screen) = Controller::new(BookTransformer, BookChoicePresenter)
            .intake(SearchBookRequest::available(keyword))
            .handle(|dto| db.search_books(dto))
            .await
            .change_context(ShellError::Service)?;
        if offered.is_empty() {
            return self.console.write_line("No available books found.");
        }
        self.console.show(screen)?;

        let book_id = self.console.ask("Book id: ", validate::integer)?;
        if !offered.contains(&book_id) {
            return self.console.write_line("Invalid book id.");
        }
        let today = self.today();
        let screen = Controller::new(BorrowingTransformer, BorrowingPresenter)
            .intake(BorrowBookRequest::new(member_id, book_id, today))
            .handle(|dto| async move {
                let due_date = dto.due_date;
                db.borrow_book(dto).await.map(|_| due_date)
            })
            .await
            .change_context(ShellError::Service)?;
        self.console.show(screen)
    }

    /// Lists the member's loans and closes the chosen one today.
    pub(crate) async fn return_book(&mut self) -> error_stack::Result<(), ShellError> {
        let member_id = self.ask_id("Member id: ")?;
        let db = self.app.database();
        let (borrowed, screen) = Controller::new(ReportTransformer, BorrowingPresenter)
            .intake(MemberBorrowingRequest::new(member_id))
            .handle(|dto| db.get_borrowed_by_member(dto))
            .await
            .change_context(ShellError::Service)?;
        if borrowed.is_empty() {
            return self.console.write_line("This member has no borrowed books.");
        }
        self.console.show(screen)?;

        let book_id = self.console.ask("Book id: ", validate::integer)?;
        if !borrowed.contains(&book_id) {
            return self.console.write_line("Invalid book id.");
        }
        let today = self.today();
        let screen = Controller::new(BorrowingTransformer, Acknowledge("Returned."))
            .intake(ReturnBookRequest::new(member_id, book_id, today))
            .handle(|dto| db.return_book(dto))
            .await
            .change_context(ShellError::Service)?;
        self.console.show(screen)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use error_stack::ResultExt;
    use time::macros::date;
    use time::Date;

    use kernel::KernelError;

    use crate::console::Console;
    use crate::handler::AppModule;
    use crate::session::Session;

    fn today() -> Date {
        date!(2024 - 01 - 01)
    }

    #[tokio::test]
    async fn only_listed_books_can_be_picked() -> error_stack::Result<(), KernelError> {
        let script = concat!(
            "6\nAlice\n",
            "1\nHarry Potter\nJ Rowling\n320\n1997\n0\nFantasy\n",
            "1\nHarry and Sally\nNora Ephron\n200\n1989\n2\nScript\n",
            "11\n1\nHarry\n2\n",
            "11\n1\nHarry\n1\n",
            "11\n1\nHarry\n",
            "12\n1\n7\n",
            "0\n",
        );
        let app = AppModule::in_memory().await?;
        let console = Console::new(Cursor::new(script), Vec::new());
        let mut session = Session::with_clock(app, console, today);
        session.run().await.change_context(KernelError::Internal)?;
        let output = String::from_utf8_lossy(&session.into_console().into_output()).to_string();

        assert!(output.contains("[1] Harry Potter - J Rowling\n"));
        assert!(!output.contains("[2] Harry and Sally - Nora Ephron\n"));
        assert_eq!(output.matches("Invalid book id.").count(), 2);
        assert!(output.contains("Borrowed. Due date: 2024-01-15"));
        assert!(output.contains("No available books found."));
        Ok(())
    }
}
