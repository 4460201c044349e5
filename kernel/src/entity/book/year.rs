use vodca::{AsRefln, Fromln};

pub const EARLIEST_PUBLISHED_YEAR: i32 = 1500;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct BookPublishedYear(i32);

impl BookPublishedYear {
    pub fn new(year: impl Into<i32>) -> Self {
        Self(year.into())
    }
}
