use application::transfer::MemberDto;

use crate::controller::Exhaust;
use crate::response::Screen;

pub struct MemberPresenter;

impl Exhaust<i64> for MemberPresenter {
    type To = Screen;
    fn emit(&self, input: i64) -> Self::To {
        Screen::from(format!("Member added with id {}.", input))
    }
}

impl Exhaust<Option<MemberDto>> for MemberPresenter {
    type To = Screen;
    fn emit(&self, input: Option<MemberDto>) -> Self::To {
        match input {
            Some(member) => Screen::from(format!("[{}] {}", member.id, member.name)),
            None => Screen::from("Member not found."),
        }
    }
}

impl Exhaust<Vec<MemberDto>> for MemberPresenter {
    type To = Screen;
    fn emit(&self, input: Vec<MemberDto>) -> Self::To {
        if input.is_empty() {
            return Screen::from("No members found.");
        }
        input
            .into_iter()
            .map(|member| format!("[{}] {}", member.id, member.name))
            .collect()
    }
}
