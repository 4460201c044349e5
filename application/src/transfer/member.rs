use kernel::prelude::entity::{DestructMember, Member};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDto {
    pub id: i64,
    pub name: String,
}

impl From<Member> for MemberDto {
    fn from(value: Member) -> Self {
        let DestructMember { id, name } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

pub struct GetMemberDto {
    pub id: i64,
}

pub struct SearchMemberDto {
    pub keyword: String,
}

pub struct CreateMemberDto {
    pub name: String,
}

pub struct UpdateMemberDto {
    pub id: i64,
    pub name: String,
}

pub struct DeleteMemberDto {
    pub id: i64,
}
