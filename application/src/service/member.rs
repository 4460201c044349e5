use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BorrowingQuery, DependOnBorrowingQuery, DependOnMemberQuery, MemberQuery,
};
use kernel::interface::update::{DependOnMemberModifier, MemberModifier};
use kernel::prelude::entity::{Member, MemberId, MemberName, SearchKeyword};
use kernel::KernelError;

use crate::service::rejected;
use crate::transfer::{
    CreateMemberDto, DeleteMemberDto, GetMemberDto, MemberDto, SearchMemberDto, UpdateMemberDto,
};

#[async_trait::async_trait]
pub trait GetMemberService: 'static + Sync + Send + DependOnMemberQuery {
    async fn get_member(
        &self,
        dto: GetMemberDto,
    ) -> error_stack::Result<Option<MemberDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = MemberId::new(dto.id);
        let member = self.member_query().find_by_id(&mut connection, &id).await?;
        Ok(member.map(MemberDto::from))
    }

    async fn search_members(
        &self,
        dto: SearchMemberDto,
    ) -> error_stack::Result<Vec<MemberDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let keyword = SearchKeyword::new(dto.keyword);
        let members = self
            .member_query()
            .search_by_name(&mut connection, &keyword)
            .await?;
        Ok(members.into_iter().map(MemberDto::from).collect())
    }

    async fn get_all_members(&self) -> error_stack::Result<Vec<MemberDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let members = self.member_query().find_all(&mut connection).await?;
        Ok(members.into_iter().map(MemberDto::from).collect())
    }
}

impl<T> GetMemberService for T where T: DependOnMemberQuery {}

#[async_trait::async_trait]
pub trait CreateMemberService: 'static + Sync + Send + DependOnMemberModifier {
    async fn create_member(&self, dto: CreateMemberDto) -> error_stack::Result<i64, KernelError> {
        let member = Member::new(MemberId::default(), MemberName::new(dto.name));
        let mut connection = self.database_connection().transact().await?;
        let id: i64 = self
            .member_modifier()
            .create(&mut connection, &member)
            .await?
            .into();
        connection.commit().await?;
        tracing::info!("member {} registered", id);
        Ok(id)
    }
}

impl<T> CreateMemberService for T where T: DependOnMemberModifier {}

#[async_trait::async_trait]
pub trait UpdateMemberService:
    'static + Sync + Send + DependOnMemberQuery + DependOnMemberModifier
{
    async fn update_member(&self, dto: UpdateMemberDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = MemberId::new(dto.id);
        if self
            .member_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(rejected(
                KernelError::MemberNotFound,
                format!("member {}", dto.id),
            ));
        }

        let member = Member::new(id, MemberName::new(dto.name));
        self.member_modifier()
            .update(&mut connection, &member)
            .await?;
        connection.commit().await?;
        tracing::info!("member {} renamed", dto.id);
        Ok(())
    }
}

impl<T> UpdateMemberService for T where T: DependOnMemberQuery + DependOnMemberModifier {}

#[async_trait::async_trait]
pub trait DeleteMemberService:
    'static + Sync + Send + DependOnMemberQuery + DependOnMemberModifier + DependOnBorrowingQuery
{
    /// Members holding a book stay registered until everything is returned.
    async fn delete_member(&self, dto: DeleteMemberDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = MemberId::new(dto.id);
        if self
            .member_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(rejected(
                KernelError::MemberNotFound,
                format!("member {}", dto.id),
            ));
        }
        if self
            .borrowing_query()
            .has_open_by_member(&mut connection, &id)
            .await?
        {
            return Err(rejected(
                KernelError::MemberHasOpenBorrowing,
                format!("member {} cannot be deleted", dto.id),
            ));
        }

        self.member_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;
        tracing::info!("member {} deleted", dto.id);
        Ok(())
    }
}

impl<T> DeleteMemberService for T where
    T: DependOnMemberQuery + DependOnMemberModifier + DependOnBorrowingQuery
{
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use driver::database::SqliteDatabase;
    use kernel::KernelError;

    use crate::service::book::test::create_book_dto;
    use crate::service::{
        BorrowBookService, CreateBookService, CreateMemberService, DeleteMemberService,
        GetMemberService, ReturnBookService, UpdateMemberService,
    };
    use crate::transfer::{
        BorrowBookDto, CreateMemberDto, DeleteMemberDto, GetMemberDto, ReturnBookDto,
        SearchMemberDto, UpdateMemberDto,
    };

    fn create_member_dto(name: &str) -> CreateMemberDto {
        CreateMemberDto {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn register_rename_and_search() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let alice = db.create_member(create_member_dto("Alice")).await?;
        db.create_member(create_member_dto("Bob")).await?;

        db.update_member(UpdateMemberDto {
            id: alice,
            name: "Alicia".to_string(),
        })
        .await?;
        let found = db.get_member(GetMemberDto { id: alice }).await?;
        assert_eq!(found.map(|m| m.name), Some("Alicia".to_string()));

        let found = db
            .search_members(SearchMemberDto {
                keyword: "lic".to_string(),
            })
            .await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, alice);
        assert_eq!(db.get_all_members().await?.len(), 2);

        let error = db
            .update_member(UpdateMemberDto {
                id: alice + 10,
                name: "Nobody".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::MemberNotFound);
        Ok(())
    }

    #[tokio::test]
    async fn delete_waits_for_returns() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let alice = db.create_member(create_member_dto("Alice")).await?;
        let bob = db.create_member(create_member_dto("Bob")).await?;
        let book = db.create_book(create_book_dto("Harry Potter")).await?;
        db.borrow_book(BorrowBookDto::with_loan_policy(
            alice,
            book,
            date!(2024 - 01 - 01),
        ))
        .await?;

        let error = db
            .delete_member(DeleteMemberDto { id: alice })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::MemberHasOpenBorrowing);
        assert!(db.get_member(GetMemberDto { id: alice }).await?.is_some());

        db.return_book(ReturnBookDto {
            member_id: alice,
            book_id: book,
            return_date: date!(2024 - 01 - 05),
        })
        .await?;
        db.delete_member(DeleteMemberDto { id: alice }).await?;
        assert!(db.get_member(GetMemberDto { id: alice }).await?.is_none());
        assert!(db.get_member(GetMemberDto { id: bob }).await?.is_some());

        let error = db
            .delete_member(DeleteMemberDto { id: alice })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::MemberNotFound);
        Ok(())
    }
}
