use sqlx::SqliteConnection;

use kernel::interface::query::MemberQuery;
use kernel::interface::update::MemberModifier;
use kernel::prelude::entity::{Member, MemberId, MemberName, SearchKeyword};
use kernel::KernelError;

use crate::database::SqliteTransaction;
use crate::error::ConvertError;

pub struct SqliteMemberRepository;

#[async_trait::async_trait]
impl MemberQuery for SqliteMemberRepository {
    type Transaction = SqliteTransaction;

    async fn find_by_id(
        &self,
        con: &mut SqliteTransaction,
        id: &MemberId,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        SqliteMemberInternal::find_by_id(con, id).await
    }

    async fn search_by_name(
        &self,
        con: &mut SqliteTransaction,
        keyword: &SearchKeyword,
    ) -> error_stack::Result<Vec<Member>, KernelError> {
        SqliteMemberInternal::search_by_name(con, keyword).await
    }

    async fn find_all(
        &self,
        con: &mut SqliteTransaction,
    ) -> error_stack::Result<Vec<Member>, KernelError> {
        SqliteMemberInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl MemberModifier for SqliteMemberRepository {
    type Transaction = SqliteTransaction;

    async fn create(
        &self,
        con: &mut SqliteTransaction,
        member: &Member,
    ) -> error_stack::Result<MemberId, KernelError> {
        SqliteMemberInternal::create(con, member).await
    }

    async fn update(
        &self,
        con: &mut SqliteTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        SqliteMemberInternal::update(con, member).await
    }

    async fn delete(
        &self,
        con: &mut SqliteTransaction,
        member_id: &MemberId,
    ) -> error_stack::Result<(), KernelError> {
        SqliteMemberInternal::delete(con, member_id).await
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    member_id: i64,
    name: String,
}

impl From<MemberRow> for Member {
    fn from(value: MemberRow) -> Self {
        Member::new(MemberId::new(value.member_id), MemberName::new(value.name))
    }
}

pub(in crate::database) struct SqliteMemberInternal;

impl SqliteMemberInternal {
    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn find_by_id(
        con: &mut SqliteConnection,
        id: &MemberId,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT member_id, name
            FROM members
            WHERE member_id = ?
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Member::from))
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn search_by_name(
        con: &mut SqliteConnection,
        keyword: &SearchKeyword,
    ) -> error_stack::Result<Vec<Member>, KernelError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT member_id, name
            FROM members
            WHERE name LIKE ?
            ORDER BY member_id
            "#,
        )
        .bind(keyword.pattern())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn find_all(con: &mut SqliteConnection) -> error_stack::Result<Vec<Member>, KernelError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT member_id, name
            FROM members
            ORDER BY member_id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn create(
        con: &mut SqliteConnection,
        member: &Member,
    ) -> error_stack::Result<MemberId, KernelError> {
        let result = sqlx::query(
            r#"
            INSERT INTO members (name)
            VALUES (?)
            "#,
        )
        .bind(member.name().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(MemberId::new(result.last_insert_rowid()))
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn update(
        con: &mut SqliteConnection,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            r#"
            UPDATE members
            SET name = ?
            WHERE member_id = ?
            "#,
        )
        .bind(member.name().as_ref())
        .bind(member.id().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(con), ret)]
    async fn delete(
        con: &mut SqliteConnection,
        member_id: &MemberId,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            r#"
            DELETE FROM members
            WHERE member_id = ?
            "#,
        )
        .bind(member_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::MemberQuery;
    use kernel::interface::update::MemberModifier;
    use kernel::prelude::entity::{Member, MemberId, MemberName, SearchKeyword};
    use kernel::KernelError;

    use crate::database::{SqliteDatabase, SqliteMemberRepository};

    #[tokio::test]
    async fn create_update_delete() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;

        let member = Member::new(MemberId::default(), MemberName::new("Alice"));
        let id = SqliteMemberRepository.create(&mut con, &member).await?;
        let member = member.reconstruct(|m| m.id = id);
        let found = SqliteMemberRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(member.clone()));

        let member = member.reconstruct(|m| m.name = MemberName::new("Alicia"));
        SqliteMemberRepository.update(&mut con, &member).await?;
        let found = SqliteMemberRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(member));

        SqliteMemberRepository.delete(&mut con, &id).await?;
        let found = SqliteMemberRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn search_matches_substring() -> error_stack::Result<(), KernelError> {
        let db = SqliteDatabase::in_memory().await?;
        let mut con = db.transact().await?;
        for name in ["Alice", "Malik", "Bob"] {
            let member = Member::new(MemberId::default(), MemberName::new(name));
            SqliteMemberRepository.create(&mut con, &member).await?;
        }

        let found = SqliteMemberRepository
            .search_by_name(&mut con, &SearchKeyword::new("li"))
            .await?;
        let names = found
            .iter()
            .map(|m| m.name().as_ref().as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Alice", "Malik"]);

        let all = SqliteMemberRepository.find_all(&mut con).await?;
        assert_eq!(all.len(), 3);
        Ok(())
    }
}
