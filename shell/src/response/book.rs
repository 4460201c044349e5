use application::transfer::BookDto;

use crate::controller::Exhaust;
use crate::response::Screen;

pub struct BookPresenter;

impl BookPresenter {
    pub fn line(book: &BookDto) -> String {
        format!(
            "[{}] {} - {} | {} pp | {} | {} | {}",
            book.id,
            book.title,
            book.author,
            book.pages,
            book.year_published,
            book.category,
            book.status
        )
    }
}

impl Exhaust<i64> for BookPresenter {
    type To = Screen;
    fn emit(&self, input: i64) -> Self::To {
        Screen::from(format!("Book added with id {}.", input))
    }
}

impl Exhaust<Option<BookDto>> for BookPresenter {
    type To = Screen;
    fn emit(&self, input: Option<BookDto>) -> Self::To {
        match input {
            Some(book) => Screen::from(Self::line(&book)),
            None => Screen::from("Book not found."),
        }
    }
}

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = Screen;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        if input.is_empty() {
            return Screen::from("No books found.");
        }
        input.iter().map(Self::line).collect()
    }
}

/// Short listing used when picking a book to borrow.
pub struct BookChoicePresenter;

impl Exhaust<Vec<BookDto>> for BookChoicePresenter {
    type To = (Vec<i64>, Screen);
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        let ids = input.iter().map(|book| book.id).collect();
        let screen = input
            .iter()
            .map(|book| format!("[{}] {} - {}", book.id, book.title, book.author))
            .collect();
        (ids, screen)
    }
}
