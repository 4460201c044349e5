mod book;
mod borrowing;
mod member;
mod report;

pub use self::{book::*, borrowing::*, member::*, report::*};

use crate::controller::Exhaust;

/// Lines ready to be printed to the console.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen(Vec<String>);

impl Screen {
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.0.push(line.into());
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }
}

impl From<String> for Screen {
    fn from(line: String) -> Self {
        Self(vec![line])
    }
}

impl From<&str> for Screen {
    fn from(line: &str) -> Self {
        Self(vec![line.to_string()])
    }
}

impl FromIterator<String> for Screen {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Confirms a write that returns nothing.
pub struct Acknowledge(pub &'static str);

impl Exhaust<()> for Acknowledge {
    type To = Screen;
    fn emit(&self, _: ()) -> Self::To {
        Screen::from(self.0)
    }
}
