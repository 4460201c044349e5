mod id;
mod name;

pub use self::{id::*, name::*};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Member {
    id: MemberId,
    name: MemberName,
}

impl Member {
    pub fn new(id: MemberId, name: MemberName) -> Self {
        Self { id, name }
    }
}
