use std::io::{BufRead, Write};

use time::{Date, OffsetDateTime};

use kernel::KernelError;

use crate::console::Console;
use crate::error::ShellError;
use crate::handler::AppModule;
use crate::menu::{MenuChoice, MENU};

pub struct Session<R, W> {
    pub(crate) app: AppModule,
    pub(crate) console: Console<R, W>,
    today: fn() -> Date,
}

fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(app: AppModule, console: Console<R, W>) -> Self {
        Self {
            app,
            console,
            today: today_utc,
        }
    }

    #[cfg(test)]
    pub fn with_clock(app: AppModule, console: Console<R, W>, today: fn() -> Date) -> Self {
        Self {
            app,
            console,
            today,
        }
    }

    pub(crate) fn today(&self) -> Date {
        (self.today)()
    }

    /// Runs the menu until the user exits or input ends.
    /// Business-rule rejections are printed and the loop goes on; store failures end it.
    pub async fn run(&mut self) -> error_stack::Result<(), ShellError> {
        loop {
            self.console.write_line(MENU)?;
            let input = match self.console.read_line("Choose an option: ") {
                Ok(input) => input,
                Err(report) if *report.current_context() == ShellError::InputClosed => break,
                Err(report) => return Err(report),
            };
            let Ok(choice) = input.parse::<MenuChoice>() else {
                self.console
                    .write_line("Option not available, choose again.")?;
                continue;
            };
            if choice == MenuChoice::Exit {
                self.console.write_line("Goodbye!")?;
                break;
            }

            match self.dispatch(choice).await {
                Ok(()) => {}
                Err(report) if *report.current_context() == ShellError::InputClosed => break,
                Err(report) => {
                    let rejection = report
                        .downcast_ref::<KernelError>()
                        .copied()
                        .filter(KernelError::is_domain);
                    match rejection {
                        Some(error) => self.console.write_line(format!("Error: {}", error))?,
                        None => {
                            tracing::error!("{:?}", report);
                            return Err(report);
                        }
                    }
                }
            }
        }
        tracing::info!("session closed");
        Ok(())
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> error_stack::Result<(), ShellError> {
        tracing::debug!("menu choice {:?}", choice);
        match choice {
            MenuChoice::Exit => Ok(()),
            MenuChoice::AddBook => self.add_book().await,
            MenuChoice::UpdateBook => self.update_book().await,
            MenuChoice::DeleteBook => self.delete_book().await,
            MenuChoice::SearchBooks => self.search_books().await,
            MenuChoice::ListBooks => self.list_books().await,
            MenuChoice::AddMember => self.add_member().await,
            MenuChoice::UpdateMember => self.update_member().await,
            MenuChoice::DeleteMember => self.delete_member().await,
            MenuChoice::SearchMembers => self.search_members().await,
            MenuChoice::ListMembers => self.list_members().await,
            MenuChoice::BorrowBook => self.borrow_book().await,
            MenuChoice::ReturnBook => self.return_book().await,
            MenuChoice::OverdueReport => self.overdue_report().await,
            MenuChoice::MemberHistory => self.member_history().await,
            MenuChoice::BorrowedReport => self.borrowed_report().await,
            MenuChoice::Stats => self.stats().await,
            MenuChoice::BorrowingLog => self.borrowing_log().await,
        }
    }

    #[cfg(test)]
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}
