use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{
    BorrowingQuery, DependOnBorrowingQuery, DependOnReportQuery, ReportQuery,
};
use kernel::prelude::entity::MemberId;
use kernel::KernelError;

use crate::transfer::{
    ActiveBorrowingDto, BorrowedBookDto, BorrowingHistoryDto, BorrowingRecordDto,
    GetMemberBorrowingDto, GetOverdueDto, GetStatsDto, OverdueDto, StatsDto,
};

#[async_trait::async_trait]
pub trait GetBorrowingReportService:
    'static + Sync + Send + DependOnBorrowingQuery + DependOnReportQuery
{
    /// Open loans already past due on `today`, the longest overdue first.
    async fn get_overdue(
        &self,
        dto: GetOverdueDto,
    ) -> error_stack::Result<Vec<OverdueDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let overdue = self
            .report_query()
            .find_overdue(&mut connection, &dto.today)
            .await?;
        tracing::debug!("{} overdue borrowings on {}", overdue.len(), dto.today);
        Ok(overdue.into_iter().map(OverdueDto::from).collect())
    }

    async fn get_borrowed_by_member(
        &self,
        dto: GetMemberBorrowingDto,
    ) -> error_stack::Result<Vec<BorrowedBookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let member_id = MemberId::new(dto.member_id);
        let books = self
            .borrowing_query()
            .find_borrowed_by_member(&mut connection, &member_id)
            .await?;
        Ok(books.into_iter().map(BorrowedBookDto::from).collect())
    }

    /// Every loan of the member, newest first.
    async fn get_history_by_member(
        &self,
        dto: GetMemberBorrowingDto,
    ) -> error_stack::Result<Vec<BorrowingHistoryDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let member_id = MemberId::new(dto.member_id);
        let history = self
            .borrowing_query()
            .find_history_by_member(&mut connection, &member_id)
            .await?;
        Ok(history.into_iter().map(BorrowingHistoryDto::from).collect())
    }

    async fn get_all_borrowed(&self) -> error_stack::Result<Vec<ActiveBorrowingDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let open = self.report_query().find_all_open(&mut connection).await?;
        Ok(open.into_iter().map(ActiveBorrowingDto::from).collect())
    }

    async fn get_borrowing_log(
        &self,
    ) -> error_stack::Result<Vec<BorrowingRecordDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let records = self
            .report_query()
            .find_all_records(&mut connection)
            .await?;
        Ok(records.into_iter().map(BorrowingRecordDto::from).collect())
    }

    async fn get_stats(&self, dto: GetStatsDto) -> error_stack::Result<StatsDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let stats = self.report_query().stats(&mut connection, &dto.today).await?;
        Ok(StatsDto::from(stats))
    }
}

impl<T> GetBorrowingReportService for T where T: DependOnBorrowingQuery + DependOnReportQuery {}

#[cfg(test)]
mod test {
    use time::macros::date;

    use driver::database::SqliteDatabase;
    use kernel::prelude::entity::{DueDate, LoanState};
    use kernel::KernelError;

    use crate::service::book::test::create_book_dto;
    use crate::service::{
        BorrowBookService, CreateBookService, CreateMemberService, GetBorrowingReportService,
        ReturnBookService,
    };
    use crate::transfer::{
        BorrowBookDto, CreateMemberDto, GetMemberBorrowingDto, GetOverdueDto, GetStatsDto,
        ReturnBookDto, StatsDto,
    };

    #[tokio::test]
    async fn reports_follow_the_loans() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let alice = db
            .create_member(CreateMemberDto {
                name: "Alice".to_string(),
            })
            .await?;
        let bob = db
            .create_member(CreateMemberDto {
                name: "Bob".to_string(),
            })
            .await?;
        let dune = db.create_book(create_book_dto("Dune")).await?;
        let emma = db.create_book(create_book_dto("Emma")).await?;
        let hamlet = db.create_book(create_book_dto("Hamlet")).await?;

        // due 2024-01-15, 2024-01-10 and 2024-01-20
        db.borrow_book(BorrowBookDto::with_loan_policy(
            alice,
            dune,
            date!(2024 - 01 - 01),
        ))
        .await?;
        db.borrow_book(BorrowBookDto::with_loan_policy(
            bob,
            emma,
            date!(2023 - 12 - 27),
        ))
        .await?;
        db.borrow_book(BorrowBookDto::with_loan_policy(
            bob,
            hamlet,
            date!(2024 - 01 - 06),
        ))
        .await?;
        db.return_book(ReturnBookDto {
            member_id: bob,
            book_id: hamlet,
            return_date: date!(2024 - 01 - 08),
        })
        .await?;

        let today = date!(2024 - 01 - 16);
        let overdue = db.get_overdue(GetOverdueDto { today }).await?;
        let found = overdue
            .iter()
            .map(|o| (o.member_name.as_str(), o.days_overdue))
            .collect::<Vec<_>>();
        assert_eq!(found, vec![("Bob", 6), ("Alice", 1)]);

        let nothing_late = db
            .get_overdue(GetOverdueDto {
                today: date!(2024 - 01 - 10),
            })
            .await?;
        assert!(nothing_late.is_empty());

        let open = db.get_all_borrowed().await?;
        let titles = open.iter().map(|a| a.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["Emma", "Dune"]);

        let history = db
            .get_history_by_member(GetMemberBorrowingDto { member_id: bob })
            .await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].title, "Hamlet");
        assert!(matches!(history[0].state, LoanState::Returned(_)));
        assert_eq!(
            history[1].state,
            LoanState::Outstanding(DueDate::new(date!(2024 - 01 - 10)))
        );

        let log = db.get_borrowing_log().await?;
        assert_eq!(log.len(), 3);

        let stats = db.get_stats(GetStatsDto { today }).await?;
        assert_eq!(
            stats,
            StatsDto {
                total_books: 3,
                total_members: 2,
                currently_borrowed: 2,
                overdue: 2,
            }
        );
        Ok(())
    }
}
