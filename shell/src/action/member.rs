use std::io::{BufRead, Write};

use error_stack::ResultExt;

use application::service::{
    CreateMemberService, DeleteMemberService, GetMemberService, UpdateMemberService,
};
use application::transfer::GetMemberDto;

use crate::controller::Controller;
use crate::error::ShellError;
use crate::menu::MemberSearch;
use crate::request::{
    CreateMemberRequest, DeleteMemberRequest, GetMemberRequest, MemberTransformer,
    SearchMemberRequest, UpdateMemberRequest,
};
use crate::response::{Acknowledge, MemberPresenter};
use crate::session::Session;
use crate::validate;

impl<R: BufRead, W: Write> Session<R, W> {
    pub(crate) async fn add_member(&mut self) -> error_stack::Result<(), ShellError> {
        let name = self.console.ask("Name: ", validate::name)?;
        let db = self.app.database();
        let screen = Controller::new(MemberTransformer, MemberPresenter)
            .intake(CreateMemberRequest::new(name))
            .handle(|dto| db.create_member(dto))
            .await
            .change_context(ShellError::Service)?;
        self.console.show(screen)
    }

    pub(crate) async fn update_member(&mut self) -> error_stack::Result<(), ShellError> {
        let id = self.ask_id("Member id: ")?;
        let current = self
            .app
            .database()
            .get_member(GetMemberDto { id })
            .await
            .change_context(ShellError::Service)?;
        let Some(current) = current else {
            return self.console.write_line("Member not found.");
        };
        self.console
            .write_line(format!("Current: [{}] {}", current.id, current.name))?;

        let name = self.console.ask("New name: ", validate::name)?;
        let db = self.app.database();
        let screen = Controller::new(MemberTransformer, Acknowledge("Member updated."))
            .intake(UpdateMemberRequest::new(id, name))
            .handle(|dto| db.update_member(dto))
            .await
            .change_context(ShellError::Service)?;
        self.console.show(screen)
    }

    pub(crate) async fn delete_member(&mut self) -> error_stack::Result<(), ShellError> {
        let id = self.ask_id("Member id: ")?;
        let db = self.app.database();
        let screen = Controller::new(MemberTransformer, Acknowledge("Member deleted."))
            .intake(DeleteMemberRequest::new(id))
            .handle(|dto| db.delete_member(dto))
            .await
            .change_context(ShellError::Service)?;
        self.console.show(screen)
    }

    pub(crate) async fn search_members(&mut self) -> error_stack::Result<(), ShellError> {
        self.console.write_line("a. By id\nb. By name")?;
        let choice = self.console.read_line("Choose: ")?;
        let screen = match choice.parse::<MemberSearch>() {
            Ok(MemberSearch::ById) => {
                let id = self.ask_id("Member id: ")?;
                let db = self.app.database();
                Controller::new(MemberTransformer, MemberPresenter)
                    .intake(GetMemberRequest::new(id))
                    .handle(|dto| db.get_member(dto))
                    .await
            }
            Ok(MemberSearch::ByName) => {
                let keyword = self.console.ask("Name: ", validate::text)?;
                let db = self.app.database();
                Controller::new(MemberTransformer, MemberPresenter)
                    .intake(SearchMemberRequest::new(keyword))
                    .handle(|dto| db.search_members(dto))
                    .await
            }
            Err(()) => return self.console.write_line("Invalid choice."),
        }
        .change_context(ShellError::Service)?;
        self.console.show(screen)
    }

    pub(crate) async fn list_members(&mut self) -> error_stack::Result<(), ShellError> {
        let db = self.app.database();
        let screen = Controller::new((), MemberPresenter)
            .bypass(|| db.get_all_members())
            .await
            .change_context(ShellError::Service)?;
        self.console.show(screen)
    }
}
