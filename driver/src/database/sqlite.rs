mod book;
mod borrowing;
mod member;
mod report;

pub use self::{book::*, borrowing::*, member::*, report::*};

use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use error_stack::ResultExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, SqliteConnection};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnBookQuery, DependOnBorrowingQuery, DependOnMemberQuery, DependOnReportQuery,
};
use kernel::interface::update::{
    DependOnBookModifier, DependOnBorrowingModifier, DependOnMemberModifier,
};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

static DATABASE_URL: &str = "DATABASE_URL";
static DEFAULT_DATABASE_URL: &str = "sqlite://library.db?mode=rwc";
static IN_MEMORY_URL: &str = "sqlite::memory:";

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS books (
        book_id        INTEGER PRIMARY KEY AUTOINCREMENT,
        title          TEXT    NOT NULL,
        author         TEXT    NOT NULL,
        pages          INTEGER NOT NULL,
        year_published INTEGER NOT NULL,
        status         INTEGER NOT NULL DEFAULT 0,
        category       TEXT    NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS members (
        member_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name      TEXT    NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS borrowing (
        borrowing_id INTEGER PRIMARY KEY AUTOINCREMENT,
        member_id    INTEGER REFERENCES members (member_id) ON DELETE SET NULL,
        book_id      INTEGER REFERENCES books (book_id) ON DELETE SET NULL,
        borrow_date  TEXT    NOT NULL,
        due_date     TEXT    NOT NULL,
        return_date  TEXT
    )
    "#,
];

/// Single-connection SQLite store. Every service call runs inside one
/// transaction taken from this pool.
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: Pool<Sqlite>,
}

impl SqliteDatabase {
    /// Opens the store named by `DATABASE_URL`, or `library.db` in the working directory.
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(DATABASE_URL)?.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        Self::connect(&url).await
    }

    pub async fn in_memory() -> error_stack::Result<Self, KernelError> {
        Self::connect(IN_MEMORY_URL).await
    }

    async fn connect(url: &str) -> error_stack::Result<Self, KernelError> {
        let options = SqliteConnectOptions::from_str(url)
            .convert_error()
            .attach_printable_lazy(|| format!("Invalid database url: {}", url))?
            .foreign_keys(true);
        // An in-memory database lives only as long as its connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .convert_error()
            .attach_printable_lazy(|| format!("Failed to open {}", url))?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await.convert_error()?;
        }
        tracing::debug!("store ready at {}", url);
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for SqliteDatabase {
    type Transaction = SqliteTransaction;
    async fn transact(&self) -> error_stack::Result<SqliteTransaction, KernelError> {
        let con = self.pool.begin().await.convert_error()?;
        Ok(SqliteTransaction(con))
    }
}

pub struct SqliteTransaction(sqlx::Transaction<'static, Sqlite>);

#[async_trait::async_trait]
impl Transaction for SqliteTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for SqliteTransaction {
    type Target = SqliteConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SqliteTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl DependOnBookQuery for SqliteDatabase {
    type BookQuery = SqliteBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &SqliteBookRepository
    }
}

impl DependOnBookModifier for SqliteDatabase {
    type BookModifier = SqliteBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &SqliteBookRepository
    }
}

impl DependOnMemberQuery for SqliteDatabase {
    type MemberQuery = SqliteMemberRepository;
    fn member_query(&self) -> &Self::MemberQuery {
        &SqliteMemberRepository
    }
}

impl DependOnMemberModifier for SqliteDatabase {
    type MemberModifier = SqliteMemberRepository;
    fn member_modifier(&self) -> &Self::MemberModifier {
        &SqliteMemberRepository
    }
}

impl DependOnBorrowingQuery for SqliteDatabase {
    type BorrowingQuery = SqliteBorrowingRepository;
    fn borrowing_query(&self) -> &Self::BorrowingQuery {
        &SqliteBorrowingRepository
    }
}

impl DependOnBorrowingModifier for SqliteDatabase {
    type BorrowingModifier = SqliteBorrowingRepository;
    fn borrowing_modifier(&self) -> &Self::BorrowingModifier {
        &SqliteBorrowingRepository
    }
}

impl DependOnReportQuery for SqliteDatabase {
    type ReportQuery = SqliteReportRepository;
    fn report_query(&self) -> &Self::ReportQuery {
        &SqliteReportRepository
    }
}
