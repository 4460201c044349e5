use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookId, BorrowedBook, Borrowing, BorrowingHistory, MemberId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BorrowingQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Most recent borrowing of `book_id` by `member_id` that has not been returned.
    async fn find_open(
        &self,
        con: &mut Self::Transaction,
        member_id: &MemberId,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Borrowing>, KernelError>;
    async fn has_open_by_member(
        &self,
        con: &mut Self::Transaction,
        member_id: &MemberId,
    ) -> error_stack::Result<bool, KernelError>;
    async fn find_borrowed_by_member(
        &self,
        con: &mut Self::Transaction,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<BorrowedBook>, KernelError>;
    async fn find_history_by_member(
        &self,
        con: &mut Self::Transaction,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<BorrowingHistory>, KernelError>;
}

pub trait DependOnBorrowingQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BorrowingQuery: BorrowingQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn borrowing_query(&self) -> &Self::BorrowingQuery;
}
