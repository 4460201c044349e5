use sqlx::SqliteConnection;
use time::Date;

use kernel::interface::query::ReportQuery;
use kernel::prelude::entity::{
    ActiveBorrowing, BookId, BookTitle, BorrowDate, BorrowingId, BorrowingRecord, DueDate,
    LibraryStats, MemberId, MemberName, OverdueBorrowing, ReturnDate,
};
use kernel::KernelError;

use crate::database::SqliteTransaction;
use crate::error::ConvertError;

pub struct SqliteReportRepository;

#[async_trait::async_trait]
impl ReportQuery for SqliteReportRepository {
    type Transaction = SqliteTransaction;

    async fn find_overdue(
        &self,
        con: &mut SqliteTransaction,
        today: &Date,
    ) -> error_stack::Result<Vec<OverdueBorrowing>, KernelError> {
        SqliteReportInternal::find_overdue(con, today).await
    }

    async fn find_all_open(
        &self,
        con: &mut SqliteTransaction,
    ) -> error_stack::Result<Vec<ActiveBorrowing>, KernelError> {
        SqliteReportInternal::find_all_open(con).await
    }

    async fn find_all_records(
        &self,
        con: &mut SqliteTransaction,
    ) -> error_stack::Result<Vec<BorrowingRecord>, KernelError> {
        SqliteReportInternal::find_all_records(con).await
    }

    async fn stats(
        &self,
        con: &mut SqliteTransaction,
        today: &Date,
    ) -> error_stack::Result<LibraryStats, KernelError> {
        SqliteReportInternal::stats(con, today).await
    }
}

#[derive(sqlx::FromRow)]
struct OverdueRow {
    member_id: i64,
    name: String,
    book_id: i64,
    title: String,
    borrow_date: Date,
    due_date: Date,
    days_overdue: i64,
}

impl From<OverdueRow> for OverdueBorrowing {
    fn from(value: OverdueRow) -> Self {
        OverdueBorrowing::new(
            MemberId::new(value.member_id),
            MemberName::new(value.name),
            BookId::new(value.book_id),
            BookTitle::new(value.title),
            BorrowDate::new(value.borrow_date),
            DueDate::new(value.due_date),
            value.days_overdue,
        )
    }
}

#[derive(sqlx::FromRow)]
struct ActiveRow {
    name: String,
    title: String,
    borrow_date: Date,
    due_date: Date,
}

impl From<ActiveRow> for ActiveBorrowing {
    fn from(value: ActiveRow) -> Self {
        ActiveBorrowing::new(
            MemberName::new(value.name),
            BookTitle::new(value.title),
            BorrowDate::new(value.borrow_date),
            DueDate::new(value.due_date),
        )
    }
}

#[derive(sqlx::FromRow)]
struct RecordRow {
    borrowing_id: i64,
    name: String,
    title: String,
    borrow_date: Date,
    due_date: Date,
    return_date: Option<Date>,
}

impl From<RecordRow> for BorrowingRecord {
    fn from(value: RecordRow) -> Self {
        BorrowingRecord::new(
            BorrowingId::new(value.borrowing_id),
            MemberName::new(value.name),
            BookTitle::new(value.title),
            BorrowDate::new(value.borrow_date),
            DueDate::new(value.due_date),
            value.return_date.map(ReturnDate::new),
        )
    }
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    total_books: i64,
    total_members: i64,
    currently_borrowed: i64,
    overdue: i64,
}

impl From<StatsRow> for LibraryStats {
    fn from(value: StatsRow) -> Self {
        LibraryStats::new(
            value.total_books,
            value.total_members,
            value.currently_borrowed,
            value.overdue,
        )
    }
}

pub(in crate::database) struct SqliteReportInternal;

impl SqliteReportInternal {
    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn find_overdue(
        con: &mut SqliteConnection,
        today: &Date,
    ) -> error_stack::Result<Vec<OverdueBorrowing>, KernelError> {
        let rows = sqlx::query_as::<_, OverdueRow>(
            r#"
            SELECT m.member_id, m.name, b.book_id, b.title, bo.borrow_date, bo.due_date,
                   CAST(julianday(?) - julianday(bo.due_date) AS INTEGER) AS days_overdue
            FROM borrowing bo
            JOIN members m ON m.member_id = bo.member_id
            JOIN books b ON b.book_id = bo.book_id
            WHERE bo.return_date IS NULL AND bo.due_date < ?
            ORDER BY days_overdue DESC, bo.borrowing_id ASC
            "#,
        )
        .bind(today)
        .bind(today)
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(OverdueBorrowing::from).collect())
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn find_all_open(
        con: &mut SqliteConnection,
    ) -> error_stack::Result<Vec<ActiveBorrowing>, KernelError> {
        let rows = sqlx::query_as::<_, ActiveRow>(
            r#"
            SELECT m.name, b.title, bo.borrow_date, bo.due_date
            FROM borrowing bo
            JOIN members m ON m.member_id = bo.member_id
            JOIN books b ON b.book_id = bo.book_id
            WHERE bo.return_date IS NULL
            ORDER BY bo.due_date ASC, bo.borrowing_id ASC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(ActiveBorrowing::from).collect())
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn find_all_records(
        con: &mut SqliteConnection,
    ) -> error_stack::Result<Vec<BorrowingRecord>, KernelError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT bo.borrowing_id,
                   COALESCE(m.name, '(removed member)') AS name,
                   COALESCE(b.title, '(removed book)') AS title,
                   bo.borrow_date, bo.due_date, bo.return_date
            FROM borrowing bo
            LEFT JOIN members m ON m.member_id = bo.member_id
            LEFT JOIN books b ON b.book_id = bo.book_id
            ORDER BY bo.borrow_date DESC, bo.borrowing_id DESC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(BorrowingRecord::from).collect())
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn stats(
        con: &mut SqliteConnection,
        today: &Date,
    ) -> error_stack::Result<LibraryStats, KernelError> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM books) AS total_books,
                (SELECT COUNT(*) FROM members) AS total_members,
                (SELECT COUNT(*) FROM borrowing WHERE return_date IS NULL) AS currently_borrowed,
                (SELECT COUNT(*) FROM borrowing
                 WHERE return_date IS NULL AND due_date < ?) AS overdue
            "#,
        )
        .bind(today)
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(LibraryStats::from(row))
    }
}
