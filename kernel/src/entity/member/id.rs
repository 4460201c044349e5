use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default, Fromln, AsRefln)]
pub struct MemberId(i64);

impl MemberId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }
}
