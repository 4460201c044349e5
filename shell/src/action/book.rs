use std::io::{BufRead, Write};

use error_stack::ResultExt;

use application::service::{
    CreateBookService, DeleteBookService, GetBookService, UpdateBookService,
};
use application::transfer::GetBookDto;
use kernel::prelude::entity::{BookStatus, EARLIEST_PUBLISHED_YEAR};

use crate::controller::Controller;
use crate::error::ShellError;
use crate::menu::BookSearch;
use crate::request::{
    BookTransformer, CreateBookRequest, DeleteBookRequest, GetBookByTitleRequest, GetBookRequest,
    SearchBookRequest, UpdateBookRequest,
};
use crate::response::{Acknowledge, BookPresenter};
use crate::session::Session;
use crate::validate;

impl<R: BufRead, W: Write> Session<R, W> {
    /// Asks for every book field; `status` is fixed when the book is out on loan.
    fn ask_book(
        &mut self,
        status: Option<i64>,
    ) -> error_stack::Result<CreateBookRequest, ShellError> {
        let min_year = i64::from(EARLIEST_PUBLISHED_YEAR);
        let max_year = i64::from(self.today().year());
        let year_prompt = format!("Year published ({}-{}): ", min_year, max_year);

        let title = self.console.ask("Title: ", validate::text)?;
        let author = self.console.ask("Author: ", validate::name)?;
        let pages = self.console.ask("Pages: ", |input| {
            validate::integer_between(input, Some(1), Some(i64::from(i32::MAX)))
        })?;
        let year_published = self.console.ask(&year_prompt, |input| {
            validate::integer_between(input, Some(min_year), Some(max_year))
        })?;
        let status = match status {
            Some(status) => status,
            None => self
                .console
                .ask("Status (0 = available, 2 = other): ", |input| {
                    validate::integer_in(input, &[0, 2])
                })?,
        };
        let category = self.console.ask("Category: ", validate::text)?;

        Ok(CreateBookRequest {
            title,
            author,
            pages,
            year_published,
            status,
            category,
        })
    }

    pub(crate) async fn add_book(&mut self) -> error_stack::Result<(), ShellError> {
        let request = self.ask_book(None)?;
        let db = self.app.database();
        let screen = Controller::new(BookTransformer, BookPresenter)
            .intake(request)
            .handle(|dto| db.create_book(dto))
            .await
            .change_context(ShellError::Service)?;
        self.console.show(screen)
    }

    pub(crate) async fn update_book(&mut self) -> error_stack::Result<(), ShellError> {
        let id = self.ask_id("Book id: ")?;
        let current = self
            .app
            .database()
            .get_book(GetBookDto { id })
            .await
            .change_context(ShellError::Service)?;
        let Some(current) = current else {
            return self.console.write_line("Book not found.");
        };
        self.console
            .write_line(format!("Current: {}", BookPresenter::line(&current)))?;

        let locked_status = (current.status == BookStatus::Borrowed)
            .then(|| i64::from(i32::from(BookStatus::Borrowed)));
        let book = self.ask_book(locked_status)?;
        let db = self.app.database();
        let screen = Controller::new(BookTransformer, Acknowledge("Book updated."))
            .intake(UpdateBookRequest { id, book })
            .handle(|dto| db.update_book(dto))
            .await
            .change_context(ShellError::Service)?;
        self.console.show(screen)
    }

    pub(crate) async fn delete_book(&mut self) -> error_stack::Result<(), ShellError> {
        let id = self.ask_id("Book id: ")?;
        let db = self.app.database();
        let screen = Controller::new(BookTransformer, Acknowledge("Book deleted."))
            .intake(DeleteBookRequest::new(id))
            .handle(|dto| db.delete_book(dto))
            .await
            .change_context(ShellError::Service)?;
        self.console.show(screen)
    }

    pub(crate) async fn search_books(&mut self) -> error_stack::Result<(), ShellError> {
        self.console
            .write_line("a. By id\nb. By exact title\nc. By keyword")?;
        let choice = self.console.read_line("Choose: ")?;
        let screen = match choice.parse::<BookSearch>() {
            Ok(BookSearch::ById) => {
                let id = self.ask_id("Book id: ")?;
                let db = self.app.database();
                Controller::new(BookTransformer, BookPresenter)
                    .intake(GetBookRequest::new(id))
                    .handle(|dto| db.get_book(dto))
                    .await
            }
            Ok(BookSearch::ByTitle) => {
                let title = self.console.ask("Title: ", validate::text)?;
                let db = self.app.database();
                Controller::new(BookTransformer, BookPresenter)
                    .intake(GetBookByTitleRequest::new(title))
                    .handle(|dto| db.get_book_by_title(dto))
                    .await
            }
            Ok(BookSearch::ByKeyword) => {
                let keyword = self.console.ask("Keyword: ", validate::text)?;
                let db = self.app.database();
                Controller::new(BookTransformer, BookPresenter)
                    .intake(SearchBookRequest::any(keyword))
                    .handle(|dto| db.search_books(dto))
                    .await
            }
            Err(()) => return self.console.write_line("Invalid choice."),
        }
        .change_context(ShellError::Service)?;
        self.console.show(screen)
    }

    pub(crate) async fn list_books(&mut self) -> error_stack::Result<(), ShellError> {
        let db = self.app.database();
        let screen = Controller::new((), BookPresenter)
            .bypass(|| db.get_all_books())
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
        date!(2024 - 03 - 01)
    }

    #[tokio::test]
    async fn update_then_search_every_way() -> error_stack::Result<(), KernelError> {
        let script = concat!(
            "1\nDune\nFrank Herbert\n412\n1965\n0\nScience Fiction\n",
            "1\nEmma\nJane Austen\n474\n1815\n0\nNovel\n",
            "2\n1\nDune Messiah\nFrank Herbert\n256\n1969\n2\nScience Fiction\n",
            "2\n9\n",
            "4\na\n2\n",
            "4\nB\nDune Messiah\n",
            "4\nc\nzz\n",
            "5\n",
            "3\n2\n",
            "3\n2\n",
            "0\n",
        );
        let app = AppModule::in_memory().await?;
        let console = Console::new(Cursor::new(script), Vec::new());
        let mut session = Session::with_clock(app, console, today);
        session.run().await.change_context(KernelError::Internal)?;
        let output = String::from_utf8_lossy(&session.into_console().into_output()).to_string();

        assert!(output
            .contains("Current: [1] Dune - Frank Herbert | 412 pp | 1965 | Science Fiction | available"));
        assert!(output.contains("Book updated."));
        assert!(output.contains("Book not found."));
        assert!(output.contains("[2] Emma - Jane Austen | 474 pp | 1815 | Novel | available"));
        assert!(output
            .contains("[1] Dune Messiah - Frank Herbert | 256 pp | 1969 | Science Fiction | other"));
        assert!(output.contains("No books found."));
        assert!(output.contains("Book deleted."));
        assert!(output.contains("Error: Book does not exist"));
        Ok(())
    }
}
