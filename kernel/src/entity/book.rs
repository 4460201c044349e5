mod author;
mod category;
mod id;
mod pages;
mod status;
mod title;
mod year;

pub use self::{author::*, category::*, id::*, pages::*, status::*, title::*, year::*};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    pages: BookPages,
    year_published: BookPublishedYear,
    status: BookStatus,
    category: BookCategory,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        pages: BookPages,
        year_published: BookPublishedYear,
        status: BookStatus,
        category: BookCategory,
    ) -> Self {
        Self {
            id,
            title,
            author,
            pages,
            year_published,
            status,
            category,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }
}
