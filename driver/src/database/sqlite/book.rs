use error_stack::Report;
use sqlx::SqliteConnection;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookAuthor, BookCategory, BookId, BookPages, BookPublishedYear, BookStatus, BookTitle,
    SearchKeyword,
};
use kernel::KernelError;

use crate::database::SqliteTransaction;
use crate::error::ConvertError;

pub struct SqliteBookRepository;

#[async_trait::async_trait]
impl BookQuery for SqliteBookRepository {
    type Transaction = SqliteTransaction;

    async fn find_by_id(
        &self,
        con: &mut SqliteTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        SqliteBookInternal::find_by_id(con, id).await
    }

    async fn find_by_title(
        &self,
        con: &mut SqliteTransaction,
        title: &BookTitle,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        SqliteBookInternal::find_by_title(con, title).await
    }

    async fn search_by_title(
        &self,
        con: &mut SqliteTransaction,
        keyword: &SearchKeyword,
        available_only: bool,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        SqliteBookInternal::search_by_title(con, keyword, available_only).await
    }

    async fn find_all(
        &self,
        con: &mut SqliteTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        SqliteBookInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl BookModifier for SqliteBookRepository {
    type Transaction = SqliteTransaction;

    async fn create(
        &self,
        con: &mut SqliteTransaction,
        book: &Book,
    ) -> error_stack::Result<BookId, KernelError> {
        SqliteBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut SqliteTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        SqliteBookInternal::update(con, book).await
    }

    async fn update_status(
        &self,
        con: &mut SqliteTransaction,
        book_id: &BookId,
        expected: &BookStatus,
        status: &BookStatus,
    ) -> error_stack::Result<bool, KernelError> {
        SqliteBookInternal::update_status(con, book_id, expected, status).await
    }

    async fn delete(
        &self,
        con: &mut SqliteTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        SqliteBookInternal::delete(con, book_id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    book_id: i64,
    title: String,
    author: String,
    pages: i32,
    year_published: i32,
    status: i32,
    category: String,
}

impl TryFrom<BookRow> for Book {
    type Error = Report<KernelError>;
    fn try_from(value: BookRow) -> Result<Self, Self::Error> {
        Ok(Book::new(
            BookId::new(value.book_id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            BookPages::new(value.pages),
            BookPublishedYear::new(value.year_published),
            BookStatus::try_from(value.status)?,
            BookCategory::new(value.category),
        ))
    }
}

fn into_books(rows: Vec<BookRow>) -> error_stack::Result<Vec<Book>, KernelError> {
    rows.into_iter().map(Book::try_from).collect()
}

pub(in crate::database) struct SqliteBookInternal;

impl SqliteBookInternal {
    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn find_by_id(
        con: &mut SqliteConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT book_id, title, author, pages, year_published, status, category
            FROM books
            WHERE book_id = ?
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Book::try_from).transpose()
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn find_by_title(
        con: &mut SqliteConnection,
        title: &BookTitle,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT book_id, title, author, pages, year_published, status, category
            FROM books
            WHERE title = ?
            ORDER BY book_id
            LIMIT 1
            "#,
        )
        .bind(title.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Book::try_from).transpose()
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn search_by_title(
        con: &mut SqliteConnection,
        keyword: &SearchKeyword,
        available_only: bool,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT book_id, title, author, pages, year_published, status, category
            FROM books
            WHERE title LIKE ? AND (? = 0 OR status = ?)
            ORDER BY book_id
            "#,
        )
        .bind(keyword.pattern())
        .bind(available_only)
        .bind(i32::from(BookStatus::Available))
        .fetch_all(con)
        .await
        .convert_error()?;
        into_books(rows)
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn find_all(con: &mut SqliteConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT book_id, title, author, pages, year_published, status, category
            FROM books
            ORDER BY book_id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        into_books(rows)
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn create(
        con: &mut SqliteConnection,
        book: &Book,
    ) -> error_stack::Result<BookId, KernelError> {
        let result = sqlx::query(
            r#"
            INSERT INTO books (title, author, pages, year_published, status, category)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.pages().as_ref())
        .bind(book.year_published().as_ref())
        .bind(i32::from(*book.status()))
        .bind(book.category().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(BookId::new(result.last_insert_rowid()))
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn update(
        con: &mut SqliteConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            r#"
            UPDATE books
            SET title = ?, author = ?, pages = ?, year_published = ?, status = ?, category = ?
            WHERE book_id = ?
            "#,
        )
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.pages().as_ref())
        .bind(book.year_published().as_ref())
        .bind(i32::from(*book.status()))
        .bind(book.category().as_ref())
        .bind(book.id().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn update_status(
        con: &mut SqliteConnection,
        book_id: &BookId,
        expected: &BookStatus,
        status: &BookStatus,
    ) -> error_stack::Result<bool, KernelError> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET status = ?
            WHERE book_id = ? AND status = ?
            "#,
        )
        .bind(i32::from(*status))
        .bind(book_id.as_ref())
        .bind(i32::from(*expected))
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() == 1)
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn delete(
        con: &mut SqliteConnection,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            r#"
            DELETE FROM books
            WHERE book_id = ?
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
pub(in crate::database) mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        Book, BookAuthor, BookCategory, BookId, BookPages, BookPublishedYear, BookStatus,
        BookTitle, SearchKeyword,
    };
    use kernel::KernelError;

    use crate::database::{SqliteBookRepository, SqliteDatabase};

    pub fn book(title: &str) -> Book {
        Book::new(
            BookId::default(),
            BookTitle::new(title),
            BookAuthor::new("J. K. Rowling"),
            BookPages::new(320),
            BookPublishedYear::new(1997),
            BookStatus::Available,
            BookCategory::new("Fantasy"),
        )
    }

    #[tokio::test]
    async fn create_update_delete() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;

        let id = SqliteBookRepository
            .create(&mut con, &book("Harry Potter"))
            .await?;
        let found = SqliteBookRepository.find_by_id(&mut con, &id).await?;
        let expected = book("Harry Potter").reconstruct(|b| b.id = id);
        assert_eq!(found, Some(expected.clone()));

        let updated = expected.reconstruct(|b| {
            b.title = BookTitle::new("Harry Potter 2");
            b.pages = BookPages::new(352);
        });
        SqliteBookRepository.update(&mut con, &updated).await?;
        let found = SqliteBookRepository
            .find_by_title(&mut con, &BookTitle::new("Harry Potter 2"))
            .await?;
        assert_eq!(found, Some(updated));

        SqliteBookRepository.delete(&mut con, &id).await?;
        let found = SqliteBookRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn status_update_is_guarded() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;
        let id = SqliteBookRepository.create(&mut con, &book("Dune")).await?;

        let changed = SqliteBookRepository
            .update_status(&mut con, &id, &BookStatus::Available, &BookStatus::Borrowed)
            .await?;
        assert!(changed);
        let changed = SqliteBookRepository
            .update_status(&mut con, &id, &BookStatus::Available, &BookStatus::Borrowed)
            .await?;
        assert!(!changed);

        let found = SqliteBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found.map(|b| *b.status()), Some(BookStatus::Borrowed));
        Ok(())
    }

    #[tokio::test]
    async fn search_can_skip_unavailable() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;
        let potter = SqliteBookRepository
            .create(&mut con, &book("Harry Potter"))
            .await?;
        let guide = SqliteBookRepository
            .create(&mut con, &book("Harry's Guide"))
            .await?;
        SqliteBookRepository.create(&mut con, &book("Dune")).await?;
        SqliteBookRepository
            .update_status(&mut con, &potter, &BookStatus::Available, &BookStatus::Borrowed)
            .await?;

        let keyword = SearchKeyword::new("Harry");
        let all = SqliteBookRepository
            .search_by_title(&mut con, &keyword, false)
            .await?;
        let ids = all.iter().map(|b| *b.id()).collect::<Vec<_>>();
        assert_eq!(ids, vec![potter, guide]);

        let available = SqliteBookRepository
            .search_by_title(&mut con, &keyword, true)
            .await?;
        let ids = available.iter().map(|b| *b.id()).collect::<Vec<_>>();
        assert_eq!(ids, vec![guide]);

        let every = SqliteBookRepository.find_all(&mut con).await?;
        assert_eq!(every.len(), 3);
        Ok(())
    }
}
