use std::io::{BufRead, Write};

use error_stack::ResultExt;

use application::service::{GetBorrowingReportService, GetMemberService};
use application::transfer::GetMemberDto;

use crate::controller::Controller;
use crate::error::ShellError;
use crate::request::{MemberBorrowingRequest, OverdueRequest, ReportTransformer, StatsRequest};
use crate::response::ReportPresenter;
use crate::session::Session;

impl<R: BufRead, W: Write> Session<R, W> {
    pub(crate) async fn overdue_report(&mut self) -> error_stack::Result<(), ShellError> {
        let today = self.today();
        let db = self.app.database();
        let screen = Controller::new(ReportTransformer, ReportPresenter)
            .intake(OverdueRequest::new(today))
            .handle(|dto| db.get_overdue(dto))
            .await
            .change_context(ShellError::Service)?;
        self.console.show(screen)
    }

    pub(crate) async fn member_history(&mut self) -> error_stack::Result<(), ShellError> {
        let member_id = self.ask_id("Member id: ")?;
        let db = self.app.database();
        let member = db
            .get_member(GetMemberDto { id: member_id })
            .await
            .change_context(ShellError::Service)?;
        let Some(member) = member else {
            return self.console.write_line("Member not found.");
        };
        self.console
            .write_line(format!("Borrowing history of {}:", member.name))?;

        let screen = Controller::new(ReportTransformer, ReportPresenter)
            .intake(MemberBorrowingRequest::new(member_id))
            .handle(|dto| db.get_history_by_member(dto))
            .await
            .change_context(ShellError::Service)?;
        self.console.show(screen)
    }

    pub(crate) async fn borrowed_report(&mut self) -> error_stack::Result<(), ShellError> {
        let db = self.app.database();
        let screen = Controller::new((), ReportPresenter)
            .bypass(|| db.get_all_borrowed())
            .await
            .change_context(ShellError::Service)?;
        self.console.show(screen)
    }

    pub(crate) async fn stats(&mut self) -> error_stack::Result<(), ShellError> {
        let today = self.today();
        let db = self.app.database();
        let screen = Controller::new(ReportTransformer, ReportPresenter)
            .intake(StatsRequest::new(today))
            .handle(|dto| db.get_stats(dto))
            .await
            .change_context(ShellError::Service)?;
        self.console.show(screen)
    }

    pub(crate) async fn borrowing_log(&mut self) -> error_stack::Result<(), ShellError> {
        let db = self.app.database();
        let screen = Controller::new((), ReportPresenter)
            .bypass(|| db.get_borrowing_log())
            .await
            .change_context(ShellError::Service)?;
        self.console.show(screen)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use error_stack::ResultExt;
    use time::macros::date;
    use time::Date;

    use kernel::KernelError;

    use crate::console::Console;
    use crate::handler::AppModule;
    use crate::session::Session;

    fn borrow_day() -> Date {
        date!(2024 - 01 - 01)
    }

    fn three_weeks_later() -> Date {
        date!(2024 - 01 - 22)
    }

    #[tokio::test]
    async fn late_loans_show_up_in_reports() -> error_stack::Result<(), KernelError> {
        let app = AppModule::in_memory().await?;
        let setup = concat!(
            "6\nAlice\n",
            "1\nDune\nFrank Herbert\n412\n1965\n0\nScience Fiction\n",
            "11\n1\nDune\n1\n",
            "0\n",
        );
        let console = Console::new(Cursor::new(setup), Vec::new());
        Session::with_clock(app.clone(), console, borrow_day)
            .run()
            .await
            .change_context(KernelError::Internal)?;

        let reports = concat!("13\n", "14\n1\n", "14\n4\n", "16\n", "17\n", "0\n");
        let console = Console::new(Cursor::new(reports), Vec::new());
        let mut session = Session::with_clock(app, console, three_weeks_later);
        session.run().await.change_context(KernelError::Internal)?;
        let output = String::from_utf8_lossy(&session.into_console().into_output()).to_string();

        assert!(output.contains(
            "- Member [1] Alice | Book [1] Dune | Borrowed 2024-01-01 | Due 2024-01-15 | Late 7 days"
        ));
        assert!(output.contains("Borrowing history of Alice:"));
        assert!(output.contains("- Dune by Frank Herbert | Borrowed 2024-01-01 | outstanding, due 2024-01-15"));
        assert!(output.contains("Member not found."));
        assert!(output.contains("Overdue: 1\n"));
        assert!(output.contains("[1] Alice | Dune | Borrowed 2024-01-01 | outstanding, due 2024-01-15"));
        Ok(())
    }
}
