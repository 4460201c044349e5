mod book;
mod borrowing;
mod member;
mod report;

pub use self::{book::*, borrowing::*, member::*, report::*};
