use sqlx::SqliteConnection;
use time::Date;

use kernel::interface::query::BorrowingQuery;
use kernel::interface::update::BorrowingModifier;
use kernel::prelude::entity::{
    BookAuthor, BookId, BookTitle, BorrowDate, BorrowedBook, Borrowing, BorrowingHistory,
    BorrowingId, DueDate, MemberId, ReturnDate,
};
use kernel::KernelError;

use crate::database::SqliteTransaction;
use crate::error::ConvertError;

pub struct SqliteBorrowingRepository;

#[async_trait::async_trait]
impl BorrowingQuery for SqliteBorrowingRepository {
    type Transaction = SqliteTransaction;

    async fn find_open(
        &self,
        con: &mut SqliteTransaction,
        member_id: &MemberId,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError> {
        SqliteBorrowingInternal::find_open(con, member_id, book_id).await
    }

    async fn has_open_by_member(
        &self,
        con: &mut SqliteTransaction,
        member_id: &MemberId,
    ) -> error_stack::Result<bool, KernelError> {
        SqliteBorrowingInternal::has_open_by_member(con, member_id).await
    }

    async fn find_borrowed_by_member(
        &self,
        con: &mut SqliteTransaction,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<BorrowedBook>, KernelError> {
        SqliteBorrowingInternal::find_borrowed_by_member(con, member_id).await
    }

    async fn find_history_by_member(
        &self,
        con: &mut SqliteTransaction,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<BorrowingHistory>, KernelError> {
        SqliteBorrowingInternal::find_history_by_member(con, member_id).await
    }
}

#[async_trait::async_trait]
impl BorrowingModifier for SqliteBorrowingRepository {
    type Transaction = SqliteTransaction;

    async fn create(
        &self,
        con: &mut SqliteTransaction,
        borrowing: &Borrowing,
    ) -> error_stack::Result<BorrowingId, KernelError> {
        SqliteBorrowingInternal::create(con, borrowing).await
    }

    async fn close(
        &self,
        con: &mut SqliteTransaction,
        borrowing_id: &BorrowingId,
        return_date: &ReturnDate,
    ) -> error_stack::Result<bool, KernelError> {
        SqliteBorrowingInternal::close(con, borrowing_id, return_date).await
    }
}

#[derive(sqlx::FromRow)]
struct BorrowingRow {
    borrowing_id: i64,
    member_id: i64,
    book_id: i64,
    borrow_date: Date,
    due_date: Date,
    return_date: Option<Date>,
}

impl From<BorrowingRow> for Borrowing {
    fn from(value: BorrowingRow) -> Self {
        Borrowing::new(
            BorrowingId::new(value.borrowing_id),
            MemberId::new(value.member_id),
            BookId::new(value.book_id),
            BorrowDate::new(value.borrow_date),
            DueDate::new(value.due_date),
            value.return_date.map(ReturnDate::new),
        )
    }
}

#[derive(sqlx::FromRow)]
struct BorrowedBookRow {
    book_id: i64,
    title: String,
    author: String,
}

impl From<BorrowedBookRow> for BorrowedBook {
    fn from(value: BorrowedBookRow) -> Self {
        BorrowedBook::new(
            BookId::new(value.book_id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
        )
    }
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    title: String,
    author: String,
    borrow_date: Date,
    due_date: Date,
    return_date: Option<Date>,
}

impl From<HistoryRow> for BorrowingHistory {
    fn from(value: HistoryRow) -> Self {
        BorrowingHistory::new(
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            BorrowDate::new(value.borrow_date),
            DueDate::new(value.due_date),
            value.return_date.map(ReturnDate::new),
        )
    }
}

pub(in crate::database) struct SqliteBorrowingInternal;

impl SqliteBorrowingInternal {
    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn find_open(
        con: &mut SqliteConnection,
        member_id: &MemberId,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError> {
        let row = sqlx::query_as::<_, BorrowingRow>(
            r#"
            SELECT borrowing_id, member_id, book_id, borrow_date, due_date, return_date
            FROM borrowing
            WHERE member_id = ? AND book_id = ? AND return_date IS NULL
            ORDER BY borrow_date DESC, borrowing_id DESC
            LIMIT 1
            "#,
        )
        .bind(member_id.as_ref())
        .bind(book_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Borrowing::from))
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn has_open_by_member(
        con: &mut SqliteConnection,
        member_id: &MemberId,
    ) -> error_stack::Result<bool, KernelError> {
        let open = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM borrowing
            WHERE member_id = ? AND return_date IS NULL
            "#,
        )
        .bind(member_id.as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(open > 0)
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn find_borrowed_by_member(
        con: &mut SqliteConnection,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<BorrowedBook>, KernelError> {
        let rows = sqlx::query_as::<_, BorrowedBookRow>(
            r#"
            SELECT b.book_id, b.title, b.author
            FROM borrowing bo
            JOIN books b ON b.book_id = bo.book_id
            WHERE bo.member_id = ? AND bo.return_date IS NULL
            ORDER BY bo.borrow_date, bo.borrowing_id
            "#,
        )
        .bind(member_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(BorrowedBook::from).collect())
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn find_history_by_member(
        con: &mut SqliteConnection,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<BorrowingHistory>, KernelError> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT COALESCE(b.title, '(removed book)') AS title,
                   COALESCE(b.author, '') AS author,
                   bo.borrow_date, bo.due_date, bo.return_date
            FROM borrowing bo
            LEFT JOIN books b ON b.book_id = bo.book_id
            WHERE bo.member_id = ?
            ORDER BY bo.borrow_date DESC, bo.borrowing_id DESC
            "#,
        )
        .bind(member_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(BorrowingHistory::from).collect())
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn create(
        con: &mut SqliteConnection,
        borrowing: &Borrowing,
    ) -> error_stack::Result<BorrowingId, KernelError> {
        let result = sqlx::query(
            r#"
            INSERT INTO borrowing (member_id, book_id, borrow_date, due_date, return_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(borrowing.member_id().as_ref())
        .bind(borrowing.book_id().as_ref())
        .bind(borrowing.borrow_date().as_ref())
        .bind(borrowing.due_date().as_ref())
        .bind(borrowing.return_date().as_ref().map(|date| *date.as_ref()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(BorrowingId::new(result.last_insert_rowid()))
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn close(
        con: &mut SqliteConnection,
        borrowing_id: &BorrowingId,
        return_date: &ReturnDate,
    ) -> error_stack::Result<bool, KernelError> {
        let result = sqlx::query(
            r#"
            UPDATE borrowing
            SET return_date = ?
            WHERE borrowing_id = ? AND return_date IS NULL
            "#,
        )
        .bind(return_date.as_ref())
        .bind(borrowing_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BorrowingQuery;
    use kernel::interface::update::{BookModifier, BorrowingModifier, MemberModifier};
    use kernel::prelude::entity::{
        BorrowDate, Borrowing, BorrowingId, DueDate, LoanState, Member, MemberId, MemberName,
        ReturnDate,
    };
    use kernel::KernelError;

    use crate::database::sqlite::book::test::book;
    use crate::database::{
        SqliteBookRepository, SqliteBorrowingRepository, SqliteDatabase, SqliteMemberRepository,
    };
    use crate::error::ConvertError;

    #[tokio::test]
    async fn open_borrowing_lifecycle() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;
        let member_id = SqliteMemberRepository
            .create(
                &mut con,
                &Member::new(MemberId::default(), MemberName::new("Alice")),
            )
            .await?;
        let book_id = SqliteBookRepository
            .create(&mut con, &book("Harry Potter"))
            .await?;

        let borrow_date = BorrowDate::new(date!(2024 - 01 - 01));
        let borrowing = Borrowing::new(
            BorrowingId::default(),
            member_id,
            book_id,
            borrow_date,
            DueDate::from_borrow_date(&borrow_date),
            None,
        );
        let id = SqliteBorrowingRepository.create(&mut con, &borrowing).await?;

        let open = SqliteBorrowingRepository
            .find_open(&mut con, &member_id, &book_id)
            .await?;
        assert_eq!(open.as_ref().map(|b| *b.id()), Some(id));
        assert_eq!(
            open.map(|b| *b.due_date()),
            Some(DueDate::new(date!(2024 - 01 - 15)))
        );
        assert!(
            SqliteBorrowingRepository
                .has_open_by_member(&mut con, &member_id)
                .await?
        );
        let borrowed = SqliteBorrowingRepository
            .find_borrowed_by_member(&mut con, &member_id)
            .await?;
        assert_eq!(borrowed.len(), 1);
        assert_eq!(borrowed[0].book_id(), &book_id);

        let returned = ReturnDate::new(date!(2024 - 01 - 10));
        assert!(
            SqliteBorrowingRepository
                .close(&mut con, &id, &returned)
                .await?
        );
        assert!(
            !SqliteBorrowingRepository
                .close(&mut con, &id, &returned)
                .await?
        );
        assert!(
            !SqliteBorrowingRepository
                .has_open_by_member(&mut con, &member_id)
                .await?
        );

        let history = SqliteBorrowingRepository
            .find_history_by_member(&mut con, &member_id)
            .await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].state(), LoanState::Returned(returned));
        Ok(())
    }

    #[tokio::test]
    async fn history_survives_member_delete() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;
        let member_id = SqliteMemberRepository
            .create(
                &mut con,
                &Member::new(MemberId::default(), MemberName::new("Bob")),
            )
            .await?;
        let book_id = SqliteBookRepository.create(&mut con, &book("Dune")).await?;
        let borrow_date = BorrowDate::new(date!(2024 - 03 - 01));
        let borrowing = Borrowing::new(
            BorrowingId::default(),
            member_id,
            book_id,
            borrow_date,
            DueDate::from_borrow_date(&borrow_date),
            Some(ReturnDate::new(date!(2024 - 03 - 05))),
        );
        SqliteBorrowingRepository.create(&mut con, &borrowing).await?;

        SqliteMemberRepository.delete(&mut con, &member_id).await?;

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM borrowing")
            .fetch_one(&mut *con)
            .await
            .convert_error()?;
        assert_eq!(count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn history_keeps_loans_of_deleted_books() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;
        let member_id = SqliteMemberRepository
            .create(
                &mut con,
                &Member::new(MemberId::default(), MemberName::new("Alice")),
            )
            .await?;
        let book_id = SqliteBookRepository.create(&mut con, &book("Emma")).await?;
        let borrow_date = BorrowDate::new(date!(2024 - 01 - 01));
        let returned = ReturnDate::new(date!(2024 - 01 - 05));
        let borrowing = Borrowing::new(
            BorrowingId::default(),
            member_id,
            book_id,
            borrow_date,
            DueDate::from_borrow_date(&borrow_date),
            Some(returned),
        );
        SqliteBorrowingRepository.create(&mut con, &borrowing).await?;

        SqliteBookRepository.delete(&mut con, &book_id).await?;

        let history = SqliteBorrowingRepository
            .find_history_by_member(&mut con, &member_id)
            .await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].title().as_ref().as_str(), "(removed book)");
        assert_eq!(history[0].state(), LoanState::Returned(returned));
        Ok(())
    }
}
