use time::Date;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{ActiveBorrowing, BorrowingRecord, LibraryStats, OverdueBorrowing};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReportQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_overdue(
        &self,
        con: &mut Self::Transaction,
        today: &Date,
    ) -> error_stack::Result<Vec<OverdueBorrowing>, KernelError>;
    async fn find_all_open(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<ActiveBorrowing>, KernelError>;
    async fn find_all_records(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<BorrowingRecord>, KernelError>;
    async fn stats(
        &self,
        con: &mut Self::Transaction,
        today: &Date,
    ) -> error_stack::Result<LibraryStats, KernelError>;
}

pub trait DependOnReportQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type ReportQuery: ReportQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn report_query(&self) -> &Self::ReportQuery;
}
