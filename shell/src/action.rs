//! One method on [`Session`] per menu option.

mod book;
mod borrowing;
mod member;
mod report;

use std::io::{BufRead, Write};

use crate::error::ShellError;
use crate::session::Session;
use crate::validate;

impl<R: BufRead, W: Write> Session<R, W> {
    pub(crate) fn ask_id(&mut self, prompt: &str) -> error_stack::Result<i64, ShellError> {
        self.console
            .ask(prompt, |input| validate::integer_between(input, Some(1), None))
    }
}
