use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BookQuery, BorrowingQuery, DependOnBookQuery, DependOnBorrowingQuery, DependOnMemberQuery,
    MemberQuery,
};
use kernel::interface::update::{
    BookModifier, BorrowingModifier, DependOnBookModifier, DependOnBorrowingModifier,
};
use kernel::prelude::entity::{
    BookId, BookStatus, BorrowDate, Borrowing, BorrowingId, DueDate, MemberId, ReturnDate,
};
use kernel::KernelError;

use crate::service::rejected;
use crate::transfer::{BorrowBookDto, ReturnBookDto};

#[async_trait::async_trait]
pub trait BorrowBookService:
    'static
    + Sync
    + Send
    + DependOnMemberQuery
    + DependOnBookQuery
    + DependOnBookModifier
    + DependOnBorrowingModifier
{
    /// Records the loan and marks the book borrowed, both in one transaction.
    async fn borrow_book(&self, dto: BorrowBookDto) -> error_stack::Result<i64, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let member_id = MemberId::new(dto.member_id);
        let book_id = BookId::new(dto.book_id);

        if self
            .member_query()
            .find_by_id(&mut connection, &member_id)
            .await?
            .is_none()
        {
            return Err(rejected(
                KernelError::MemberNotFound,
                format!("member {}", dto.member_id),
            ));
        }
        let book = self
            .book_query()
            .find_by_id(&mut connection, &book_id)
            .await?
            .ok_or_else(|| rejected(KernelError::BookNotFound, format!("book {}", dto.book_id)))?;
        if !book.is_available() {
            return Err(rejected(
                KernelError::BookUnavailable,
                format!("book {} is {}", dto.book_id, book.status()),
            ));
        }

        let borrowing = Borrowing::new(
            BorrowingId::default(),
            member_id,
            book_id,
            BorrowDate::new(dto.borrow_date),
            DueDate::new(dto.due_date),
            None,
        );
        let id: i64 = self
            .borrowing_modifier()
            .create(&mut connection, &borrowing)
            .await?
            .into();
        let marked = self
            .book_modifier()
            .update_status(
                &mut connection,
                &book_id,
                &BookStatus::Available,
                &BookStatus::Borrowed,
            )
            .await?;
        if !marked {
            connection.roll_back().await?;
            return Err(Report::new(KernelError::Concurrency)
                .attach_printable(format!("book {} changed while borrowing", dto.book_id)));
        }
        connection.commit().await?;
        tracing::info!(
            "member {} borrowed book {} until {}",
            dto.member_id,
            dto.book_id,
            dto.due_date
        );
        Ok(id)
    }
}

impl<T> BorrowBookService for T where
    T: DependOnMemberQuery + DependOnBookQuery + DependOnBookModifier + DependOnBorrowingModifier
{
}

#[async_trait::async_trait]
pub trait ReturnBookService:
    'static
    + Sync
    + Send
    + DependOnBorrowingQuery
    + DependOnBorrowingModifier
    + DependOnBookModifier
{
    /// Closes the most recent open loan of the book by the member and shelves the book again.
    async fn return_book(&self, dto: ReturnBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let member_id = MemberId::new(dto.member_id);
        let book_id = BookId::new(dto.book_id);

        let open = self
            .borrowing_query()
            .find_open(&mut connection, &member_id, &book_id)
            .await?
            .ok_or_else(|| {
                rejected(
                    KernelError::NoOpenBorrowing,
                    format!("member {} book {}", dto.member_id, dto.book_id),
                )
            })?;

        let closed = self
            .borrowing_modifier()
            .close(&mut connection, open.id(), &ReturnDate::new(dto.return_date))
            .await?;
        let shelved = closed
            && self
                .book_modifier()
                .update_status(
                    &mut connection,
                    &book_id,
                    &BookStatus::Borrowed,
                    &BookStatus::Available,
                )
                .await?;
        if !shelved {
            connection.roll_back().await?;
            return Err(Report::new(KernelError::Concurrency).attach_printable(format!(
                "borrowing {} changed while returning",
                i64::from(*open.id())
            )));
        }
        connection.commit().await?;
        tracing::info!(
            "member {} returned book {} on {}",
            dto.member_id,
            dto.book_id,
            dto.return_date
        );
        Ok(())
    }
}

impl<T> ReturnBookService for T where
    T: DependOnBorrowingQuery + DependOnBorrowingModifier + DependOnBookModifier
{
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use driver::database::SqliteDatabase;
    use kernel::prelude::entity::{BookStatus, LoanState, ReturnDate};
    use kernel::KernelError;

    use crate::service::book::test::create_book_dto;
    use crate::service::{
        BorrowBookService, CreateBookService, CreateMemberService, GetBookService,
        GetBorrowingReportService, ReturnBookService, UpdateBookService,
    };
    use crate::transfer::{
        BorrowBookDto, CreateMemberDto, GetBookDto, GetMemberBorrowingDto, ReturnBookDto,
        UpdateBookDto,
    };

    async fn setup(
        db: &SqliteDatabase,
        title: &str,
    ) -> error_stack::Result<(i64, i64), KernelError> {
        let member_id = db
            .create_member(CreateMemberDto {
                name: "Alice".to_string(),
            })
            .await?;
        let book_id = db.create_book(create_book_dto(title)).await?;
        Ok((member_id, book_id))
    }

    async fn status_of(
        db: &SqliteDatabase,
        id: i64,
    ) -> error_stack::Result<Option<BookStatus>, KernelError> {
        Ok(db.get_book(GetBookDto { id }).await?.map(|b| b.status))
    }

    #[tokio::test]
    async fn borrow_and_return_round_trip() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (member_id, book_id) = setup(&db, "Harry Potter").await?;

        let dto = BorrowBookDto::with_loan_policy(member_id, book_id, date!(2024 - 01 - 01));
        assert_eq!(dto.due_date, date!(2024 - 01 - 15));
        db.borrow_book(dto).await?;
        assert_eq!(status_of(&db, book_id).await?, Some(BookStatus::Borrowed));
        let borrowed = db
            .get_borrowed_by_member(GetMemberBorrowingDto { member_id })
            .await?;
        assert_eq!(borrowed.len(), 1);

        db.return_book(ReturnBookDto {
            member_id,
            book_id,
            return_date: date!(2024 - 01 - 10),
        })
        .await?;
        assert_eq!(status_of(&db, book_id).await?, Some(BookStatus::Available));
        let history = db
            .get_history_by_member(GetMemberBorrowingDto { member_id })
            .await?;
        assert_eq!(history.len(), 1);
        assert_eq!(
            history[0].state,
            LoanState::Returned(ReturnDate::new(date!(2024 - 01 - 10)))
        );

        let error = db
            .return_book(ReturnBookDto {
                member_id,
                book_id,
                return_date: date!(2024 - 01 - 11),
            })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NoOpenBorrowing);
        assert_eq!(error.current_context().to_string(), "No open borrowing found");
        Ok(())
    }

    #[tokio::test]
    async fn borrowed_book_cannot_be_borrowed_again() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (alice, book_id) = setup(&db, "Dune").await?;
        let bob = db
            .create_member(CreateMemberDto {
                name: "Bob".to_string(),
            })
            .await?;
        db.borrow_book(BorrowBookDto::with_loan_policy(
            alice,
            book_id,
            date!(2024 - 01 - 01),
        ))
        .await?;

        for member_id in [alice, bob] {
            let error = db
                .borrow_book(BorrowBookDto::with_loan_policy(
                    member_id,
                    book_id,
                    date!(2024 - 01 - 02),
                ))
                .await
                .unwrap_err();
            assert_eq!(error.current_context(), &KernelError::BookUnavailable);
        }
        let borrowed = db
            .get_borrowed_by_member(GetMemberBorrowingDto { member_id: bob })
            .await?;
        assert!(borrowed.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn other_status_is_not_borrowable() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (member_id, book_id) = setup(&db, "Dune").await?;
        db.update_book(UpdateBookDto {
            id: book_id,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            pages: 412,
            year_published: 1965,
            status: 2,
            category: "Science Fiction".to_string(),
        })
        .await?;

        let error = db
            .borrow_book(BorrowBookDto::with_loan_policy(
                member_id,
                book_id,
                date!(2024 - 01 - 01),
            ))
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::BookUnavailable);
        assert_eq!(status_of(&db, book_id).await?, Some(BookStatus::Other));
        Ok(())
    }

    #[tokio::test]
    async fn missing_member_or_book_is_reported() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (member_id, book_id) = setup(&db, "Dune").await?;

        let error = db
            .borrow_book(BorrowBookDto::with_loan_policy(
                member_id + 1,
                book_id,
                date!(2024 - 01 - 01),
            ))
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::MemberNotFound);

        let error = db
            .borrow_book(BorrowBookDto::with_loan_policy(
                member_id,
                book_id + 1,
                date!(2024 - 01 - 01),
            ))
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::BookNotFound);
        assert_eq!(status_of(&db, book_id).await?, Some(BookStatus::Available));
        Ok(())
    }

    #[tokio::test]
    async fn return_only_touches_the_open_row() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let (member_id, book_id) = setup(&db, "Dune").await?;
        db.borrow_book(BorrowBookDto::with_loan_policy(
            member_id,
            book_id,
            date!(2024 - 01 - 01),
        ))
        .await?;
        db.return_book(ReturnBookDto {
            member_id,
            book_id,
            return_date: date!(2024 - 01 - 03),
        })
        .await?;
        db.borrow_book(BorrowBookDto::with_loan_policy(
            member_id,
            book_id,
            date!(2024 - 02 - 01),
        ))
        .await?;
        db.return_book(ReturnBookDto {
            member_id,
            book_id,
            return_date: date!(2024 - 02 - 10),
        })
        .await?;

        let history = db
            .get_history_by_member(GetMemberBorrowingDto { member_id })
            .await?;
        let states = history.iter().map(|h| h.state).collect::<Vec<_>>();
        assert_eq!(
            states,
            vec![
                LoanState::Returned(ReturnDate::new(date!(2024 - 02 - 10))),
                LoanState::Returned(ReturnDate::new(date!(2024 - 01 - 03))),
            ]
        );
        Ok(())
    }
}
