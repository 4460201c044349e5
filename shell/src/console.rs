use std::fmt::Display;
use std::io::{BufRead, Write};

use error_stack::{Report, ResultExt};

use crate::error::ShellError;
use crate::response::Screen;
use crate::validate::ValidationError;

/// Line-oriented prompt over any reader and writer, so the loop can be driven by a script.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn write_line(&mut self, line: impl Display) -> error_stack::Result<(), ShellError> {
        writeln!(self.output, "{}", line).change_context(ShellError::Io)
    }

    pub fn show(&mut self, screen: Screen) -> error_stack::Result<(), ShellError> {
        for line in screen.lines() {
            self.write_line(line)?;
        }
        Ok(())
    }

    /// Prints `prompt` and reads one line without its line terminator.
    pub fn read_line(&mut self, prompt: &str) -> error_stack::Result<String, ShellError> {
        write!(self.output, "{}", prompt).change_context(ShellError::Io)?;
        self.output.flush().change_context(ShellError::Io)?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .change_context(ShellError::Io)?;
        if read == 0 {
            return Err(Report::new(ShellError::InputClosed));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Re-prompts until `validator` accepts the input.
    pub fn ask<T>(
        &mut self,
        prompt: &str,
        validator: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> error_stack::Result<T, ShellError> {
        loop {
            let input = self.read_line(prompt)?;
            match validator(&input) {
                Ok(value) => return Ok(value),
                Err(e) => self.write_line(format!("Error: {}", e))?,
            }
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use crate::console::Console;
    use crate::error::ShellError;
    use crate::validate;

    #[test]
    fn ask_repeats_until_valid() -> error_stack::Result<(), ShellError> {
        let mut console = Console::new(Cursor::new("x\n\n  Dune \n"), Vec::new());
        let title = console.ask("Title: ", validate::text)?;
        assert_eq!(title, "Dune");

        let output = String::from_utf8_lossy(&console.into_output()).to_string();
        assert_eq!(
            output,
            "Title: Error: Enter at least 2 characters.\n\
             Title: Error: This field cannot be empty.\n\
             Title: "
        );
        Ok(())
    }

    #[test]
    fn end_of_input_closes_the_prompt() {
        let mut console = Console::new(Cursor::new("12\r\n"), Vec::new());
        assert_eq!(console.read_line("> ").ok(), Some("12".to_string()));
        let error = console.read_line("> ").unwrap_err();
        assert_eq!(error.current_context(), &ShellError::InputClosed);
    }
}
