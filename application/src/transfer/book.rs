use kernel::prelude::entity::{Book, BookStatus, DestructBook};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub pages: i32,
    pub year_published: i32,
    pub status: BookStatus,
    pub category: String,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            pages,
            year_published,
            status,
            category,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            pages: pages.into(),
            year_published: year_published.into(),
            status,
            category: category.into(),
        }
    }
}

pub struct GetBookDto {
    pub id: i64,
}

pub struct GetBookByTitleDto {
    pub title: String,
}

pub struct SearchBookDto {
    pub keyword: String,
    pub available_only: bool,
}

/// `status` is the stored code: 0 available, 1 borrowed, 2 other.
pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub pages: i32,
    pub year_published: i32,
    pub status: i32,
    pub category: String,
}

pub struct UpdateBookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub pages: i32,
    pub year_published: i32,
    pub status: i32,
    pub category: String,
}

pub struct DeleteBookDto {
    pub id: i64,
}
