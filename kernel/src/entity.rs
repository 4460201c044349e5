mod book;
mod borrowing;
mod common;
mod member;
mod report;

pub use self::{book::*, borrowing::*, common::*, member::*, report::*};
