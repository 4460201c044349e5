use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookCategory, BookId, BookPages, BookPublishedYear, BookStatus, BookTitle,
    SearchKeyword,
};
use kernel::KernelError;

use crate::service::rejected;
use crate::transfer::{
    BookDto, CreateBookDto, DeleteBookDto, GetBookByTitleDto, GetBookDto, SearchBookDto,
    UpdateBookDto,
};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = BookId::new(dto.id);
        let book = self.book_query().find_by_id(&mut connection, &id).await?;
        Ok(book.map(BookDto::from))
    }

    async fn get_book_by_title(
        &self,
        dto: GetBookByTitleDto,
    ) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let title = BookTitle::new(dto.title);
        let book = self
            .book_query()
            .find_by_title(&mut connection, &title)
            .await?;
        Ok(book.map(BookDto::from))
    }

    async fn search_books(
        &self,
        dto: SearchBookDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let keyword = SearchKeyword::new(dto.keyword);
        let books = self
            .book_query()
            .search_by_title(&mut connection, &keyword, dto.available_only)
            .await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookModifier {
    /// Books enter the catalogue available or other; only a borrow marks them borrowed.
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<i64, KernelError> {
        let status = BookStatus::try_from(dto.status)?;
        if status == BookStatus::Borrowed {
            return Err(rejected(
                KernelError::InvalidStatus,
                "a new book cannot start out borrowed",
            ));
        }
        let book = Book::new(
            BookId::default(),
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            BookPages::new(dto.pages),
            BookPublishedYear::new(dto.year_published),
            status,
            BookCategory::new(dto.category),
        );

        let mut connection = self.database_connection().transact().await?;
        let id: i64 = self
            .book_modifier()
            .create(&mut connection, &book)
            .await?
            .into();
        connection.commit().await?;
        tracing::info!("book {} added", id);
        Ok(id)
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    /// Overwrites every field of an existing book.
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<(), KernelError> {
        let status = BookStatus::try_from(dto.status)?;
        let mut connection = self.database_connection().transact().await?;
        let id = BookId::new(dto.id);
        let current = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| rejected(KernelError::BookNotFound, format!("book {}", dto.id)))?;

        let was_borrowed = *current.status() == BookStatus::Borrowed;
        if was_borrowed != (status == BookStatus::Borrowed) {
            return Err(rejected(
                KernelError::InvalidStatus,
                format!("book {} is {}, requested {}", dto.id, current.status(), status),
            ));
        }

        let book = Book::new(
            id,
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            BookPages::new(dto.pages),
            BookPublishedYear::new(dto.year_published),
            status,
            BookCategory::new(dto.category),
        );
        self.book_modifier().update(&mut connection, &book).await?;
        connection.commit().await?;
        tracing::info!("book {} updated", dto.id);
        Ok(())
    }
}

impl<T> UpdateBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = BookId::new(dto.id);
        let book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| rejected(KernelError::BookNotFound, format!("book {}", dto.id)))?;
        if *book.status() == BookStatus::Borrowed {
            return Err(rejected(
                KernelError::BookBorrowed,
                format!("book {} cannot be deleted", dto.id),
            ));
        }

        self.book_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;
        tracing::info!("book {} deleted", dto.id);
        Ok(())
    }
}

impl<T> DeleteBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[cfg(test)]
pub(crate) mod test {
    use driver::database::SqliteDatabase;
    use kernel::prelude::entity::BookStatus;
    use kernel::KernelError;

    use crate::service::{
        BorrowBookService, CreateBookService, CreateMemberService, DeleteBookService,
        GetBookService, UpdateBookService,
    };
    use crate::transfer::{
        BorrowBookDto, CreateBookDto, CreateMemberDto, DeleteBookDto, GetBookByTitleDto,
        GetBookDto, SearchBookDto, UpdateBookDto,
    };

    pub fn create_book_dto(title: &str) -> CreateBookDto {
        CreateBookDto {
            title: title.to_string(),
            author: "J. K. Rowling".to_string(),
            pages: 320,
            year_published: 1997,
            status: 0,
            category: "Fantasy".to_string(),
        }
    }

    fn update_book_dto(id: i64, title: &str, status: i32) -> UpdateBookDto {
        UpdateBookDto {
            id,
            title: title.to_string(),
            author: "J. K. Rowling".to_string(),
            pages: 352,
            year_published: 1998,
            status,
            category: "Fantasy".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_find() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let id = db.create_book(create_book_dto("Harry Potter")).await?;

        let by_id = db.get_book(GetBookDto { id }).await?;
        assert_eq!(by_id.as_ref().map(|b| b.title.as_str()), Some("Harry Potter"));
        assert_eq!(by_id.as_ref().map(|b| b.status), Some(BookStatus::Available));

        let by_title = db
            .get_book_by_title(GetBookByTitleDto {
                title: "Harry Potter".to_string(),
            })
            .await?;
        assert_eq!(by_title, by_id);

        let missing = db.get_book(GetBookDto { id: id + 100 }).await?;
        assert!(missing.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn new_book_cannot_be_borrowed() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut dto = create_book_dto("Dune");
        dto.status = 1;
        let error = db.create_book(dto).await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::InvalidStatus);
        assert!(db.get_all_books().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_fields() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let id = db.create_book(create_book_dto("Harry Potter")).await?;

        db.update_book(update_book_dto(id, "Chamber of Secrets", 2))
            .await?;
        let book = db.get_book(GetBookDto { id }).await?;
        let book = book.expect("book should still exist");
        assert_eq!(book.title, "Chamber of Secrets");
        assert_eq!(book.pages, 352);
        assert_eq!(book.status, BookStatus::Other);

        let error = db
            .update_book(update_book_dto(id + 1, "Nothing", 0))
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::BookNotFound);

        let error = db
            .update_book(update_book_dto(id, "Chamber of Secrets", 1))
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::InvalidStatus);
        Ok(())
    }

    #[tokio::test]
    async fn delete_refuses_borrowed_book() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let member_id = db
            .create_member(CreateMemberDto {
                name: "Alice".to_string(),
            })
            .await?;
        let borrowed = db.create_book(create_book_dto("Harry Potter")).await?;
        let shelved = db.create_book(create_book_dto("Dune")).await?;
        db.borrow_book(BorrowBookDto::with_loan_policy(
            member_id,
            borrowed,
            time::macros::date!(2024 - 01 - 01),
        ))
        .await?;

        let error = db
            .delete_book(DeleteBookDto { id: borrowed })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::BookBorrowed);
        assert!(db.get_book(GetBookDto { id: borrowed }).await?.is_some());

        db.delete_book(DeleteBookDto { id: shelved }).await?;
        assert!(db.get_book(GetBookDto { id: shelved }).await?.is_none());

        let error = db
            .delete_book(DeleteBookDto { id: shelved })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::BookNotFound);
        Ok(())
    }

    #[tokio::test]
    async fn available_only_search_skips_borrowed() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let member_id = db
            .create_member(CreateMemberDto {
                name: "Alice".to_string(),
            })
            .await?;
        let potter = db.create_book(create_book_dto("Harry Potter")).await?;
        db.create_book(create_book_dto("Dune")).await?;
        db.borrow_book(BorrowBookDto::with_loan_policy(
            member_id,
            potter,
            time::macros::date!(2024 - 01 - 01),
        ))
        .await?;

        let available = db
            .search_books(SearchBookDto {
                keyword: "Harry".to_string(),
                available_only: true,
            })
            .await?;
        assert!(available.is_empty());

        let any = db
            .search_books(SearchBookDto {
                keyword: "Harry".to_string(),
                available_only: false,
            })
            .await?;
        assert_eq!(any.len(), 1);
        assert_eq!(any[0].status, BookStatus::Borrowed);
        assert_eq!(db.get_all_books().await?.len(), 2);
        Ok(())
    }
}
