mod book;
mod borrowing;
mod member;

pub use self::{book::*, borrowing::*, member::*};
