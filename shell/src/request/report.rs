use time::Date;

use application::transfer::{GetMemberBorrowingDto, GetOverdueDto, GetStatsDto};

use crate::controller::Intake;

#[derive(Debug)]
pub struct OverdueRequest {
    today: Date,
}

impl OverdueRequest {
    pub fn new(today: Date) -> Self {
        Self { today }
    }
}

#[derive(Debug)]
pub struct StatsRequest {
    today: Date,
}

impl StatsRequest {
    pub fn new(today: Date) -> Self {
        Self { today }
    }
}

#[derive(Debug)]
pub struct MemberBorrowingRequest {
    member_id: i64,
}

impl MemberBorrowingRequest {
    pub fn new(member_id: i64) -> Self {
        Self { member_id }
    }
}

pub struct ReportTransformer;

impl Intake<OverdueRequest> for ReportTransformer {
    type To = GetOverdueDto;
    fn emit(&self, input: OverdueRequest) -> Self::To {
        GetOverdueDto { today: input.today }
    }
}

impl Intake<StatsRequest> for ReportTransformer {
    type To = GetStatsDto;
    fn emit(&self, input: StatsRequest) -> Self::To {
        GetStatsDto { today: input.today }
    }
}

impl Intake<MemberBorrowingRequest> for ReportTransformer {
    type To = GetMemberBorrowingDto;
    fn emit(&self, input: MemberBorrowingRequest) -> Self::To {
        GetMemberBorrowingDto {
            member_id: input.member_id,
        }
    }
}
