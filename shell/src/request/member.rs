use application::transfer::{
    CreateMemberDto, DeleteMemberDto, GetMemberDto, SearchMemberDto, UpdateMemberDto,
};

use crate::controller::Intake;

#[derive(Debug)]
pub struct CreateMemberRequest {
    name: String,
}

impl CreateMemberRequest {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

#[derive(Debug)]
pub struct UpdateMemberRequest {
    id: i64,
    name: String,
}

impl UpdateMemberRequest {
    pub fn new(id: i64, name: String) -> Self {
        Self { id, name }
    }
}

#[derive(Debug)]
pub struct DeleteMemberRequest {
    id: i64,
}

impl DeleteMemberRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct GetMemberRequest {
    id: i64,
}

impl GetMemberRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct SearchMemberRequest {
    keyword: String,
}

impl SearchMemberRequest {
    pub fn new(keyword: String) -> Self {
        Self { keyword }
    }
}

pub struct MemberTransformer;

impl Intake<CreateMemberRequest> for MemberTransformer {
    type To = CreateMemberDto;
    fn emit(&self, input: CreateMemberRequest) -> Self::To {
        CreateMemberDto { name: input.name }
    }
}

impl Intake<UpdateMemberRequest> for MemberTransformer {
    type To = UpdateMemberDto;
    fn emit(&self, input: UpdateMemberRequest) -> Self::To {
        UpdateMemberDto {
            id: input.id,
            name: input.name,
        }
    }
}

impl Intake<DeleteMemberRequest> for MemberTransformer {
    type To = DeleteMemberDto;
    fn emit(&self, input: DeleteMemberRequest) -> Self::To {
        DeleteMemberDto { id: input.id }
    }
}

impl Intake<GetMemberRequest> for MemberTransformer {
    type To = GetMemberDto;
    fn emit(&self, input: GetMemberRequest) -> Self::To {
        GetMemberDto { id: input.id }
    }
}

impl Intake<SearchMemberRequest> for MemberTransformer {
    type To = SearchMemberDto;
    fn emit(&self, input: SearchMemberRequest) -> Self::To {
        SearchMemberDto {
            keyword: input.keyword,
        }
    }
}
