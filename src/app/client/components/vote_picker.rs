use tui_realm_stdlib::Radio;
use tuirealm::{
    command::{Cmd, CmdResult, Direction},
    event::{Key, KeyEvent, KeyModifiers},
    props::{Alignment, BorderType, Borders, Color},
    Component, Event, MockComponent,
};

use crate::app::server::grpc::storage::models::Vote;

use super::{Msg, UserEvent};

#[derive(MockComponent)]
pub struct VotePicker {
    component: Radio,
}

impl Default for VotePicker {
    fn default() -> Self {
        let choices = Vote::ALL
            .iter()
            .map(|vote| vote.as_str())
            .collect::<Vec<_>>();

        let component = Radio::default()
            .choices(&choices)
            .borders(
                Borders::default()
                    .modifiers(BorderType::Rounded)
                    .color(Color::Green),
            )
            .title("Your card - [ r ] to reset the room", Alignment::Left);

        Self { component }
    }
}

impl VotePicker {
    fn selected_vote(&self) -> Option<Vote> {
        Vote::ALL.get(self.component.states.choice).copied()
    }
}

impl Component<Msg, UserEvent> for VotePicker {
    fn on(&mut self, event: Event<UserEvent>) -> Option<Msg> {
        let cmd = match event {
            Event::Keyboard(KeyEvent {
                code: Key::Left,
                modifiers: KeyModifiers::NONE,
            }) => Cmd::Move(Direction::Left),

            Event::Keyboard(KeyEvent {
                code: Key::Right,
                modifiers: KeyModifiers::NONE,
            }) => Cmd::Move(Direction::Right),

            Event::Keyboard(KeyEvent {
                code: Key::Enter, ..
            }) => Cmd::Submit,

            Event::Keyboard(KeyEvent {
                code: Key::Char('r'),
                modifiers: KeyModifiers::NONE,
            }) => return Some(Msg::ResetVotes),

            Event::Keyboard(KeyEvent { code: Key::Tab, .. }) => return Some(Msg::FocusNext),

            Event::Keyboard(KeyEvent { code: Key::Esc, .. }) => return Some(Msg::AppClose),

            _ => Cmd::None,
        };

        match self.perform(cmd) {
            CmdResult::Changed(_) => Some(Msg::ReDraw),
            CmdResult::Submit(_) => self
                .selected_vote()
                .map(|vote| Msg::CastVote(vote.to_string())),
            _ => None,
        }
    }
}
