use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Borrowing, BorrowingId, ReturnDate};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BorrowingModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        borrowing: &Borrowing,
    ) -> error_stack::Result<BorrowingId, KernelError>;
    /// Sets the return date of an open borrowing. Returns `false` when the row
    /// was already closed.
    async fn close(
        &self,
        con: &mut Self::Transaction,
        borrowing_id: &BorrowingId,
        return_date: &ReturnDate,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnBorrowingModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BorrowingModifier: BorrowingModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn borrowing_modifier(&self) -> &Self::BorrowingModifier;
}
