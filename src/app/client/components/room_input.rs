use tui_realm_stdlib::Input;
use tuirealm::{
    command::{Cmd, CmdResult},
    event::{Key, KeyEvent, KeyModifiers},
    props::{Alignment, BorderType, Borders, Color, InputType},
    Component, Event, MockComponent, State, StateValue,
};

use super::{Msg, UserEvent};

/// Name of the room to join, an empty name creates a random room
#[derive(MockComponent)]
pub struct RoomInput {
    component: Input,
}

impl Default for RoomInput {
    fn default() -> Self {
        let component = Input::default()
            .title(
                "Room - [ Enter ] to join, empty for a new room",
                Alignment::Left,
            )
            .borders(
                Borders::default()
                    .modifiers(BorderType::Rounded)
                    .color(Color::Green),
            )
            .input_type(InputType::Text);

        Self { component }
    }
}

impl Component<Msg, UserEvent> for RoomInput {
    fn on(&mut self, event: Event<UserEvent>) -> Option<Msg> {
        let cmd = match event {
            Event::Keyboard(KeyEvent {
                code: Key::Enter, ..
            }) => Cmd::Submit,

            Event::Keyboard(KeyEvent { code: Key::Esc, .. }) => return Some(Msg::AppClose),

            Event::Keyboard(KeyEvent { code: Key::Tab, .. }) => return Some(Msg::FocusNext),

            Event::Keyboard(KeyEvent {
                code: Key::Left,
                modifiers: KeyModifiers::NONE,
            }) => Cmd::Move(tuirealm::command::Direction::Left),

            Event::Keyboard(KeyEvent {
                code: Key::Right,
                modifiers: KeyModifiers::NONE,
            }) => Cmd::Move(tuirealm::command::Direction::Right),

            Event::Keyboard(KeyEvent {
                code: Key::Backspace,
                ..
            }) => Cmd::Delete,

            Event::Keyboard(KeyEvent {
                code: Key::Delete, ..
            }) => Cmd::Cancel,

            Event::Keyboard(KeyEvent {
                code: Key::Char(character),
                ..
            }) => Cmd::Type(character),

            _ => Cmd::None,
        };

        match self.perform(cmd) {
            CmdResult::Submit(State::One(StateValue::String(room_name))) => {
                Some(Msg::JoinRoom(room_name.trim().to_string()))
            }
            CmdResult::Changed(_) => Some(Msg::ReDraw),
            _ => None,
        }
    }
}
