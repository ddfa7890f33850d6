use tui_realm_stdlib::Paragraph;
use tuirealm::{
    props::{Alignment, BorderType, Borders, Color, TextSpan},
    Component, Event, MockComponent,
};

use super::{Msg, UserEvent};

/// Latest information or error reported by the network client
#[derive(MockComponent)]
pub struct BottomBar {
    component: Paragraph,
}

fn get_bottom_bar(message: TextSpan) -> Paragraph {
    Paragraph::default()
        .text(&[message])
        .borders(Borders::default().modifiers(BorderType::Rounded))
        .alignment(Alignment::Left)
}

impl Default for BottomBar {
    fn default() -> Self {
        Self {
            component: get_bottom_bar(TextSpan::from("Connecting to the server")),
        }
    }
}

impl Component<Msg, UserEvent> for BottomBar {
    fn on(&mut self, event: Event<UserEvent>) -> Option<Msg> {
        let message = match event {
            Event::User(UserEvent::InfoMessage(message)) => TextSpan::from(message),
            Event::User(UserEvent::NetworkError(error)) => TextSpan::from(error).fg(Color::Red),
            Event::User(UserEvent::RoomJoined { room_name, .. }) => {
                TextSpan::from(format!("Joined room {room_name}"))
            }
            _ => return None,
        };

        self.component = get_bottom_bar(message);
        Some(Msg::ReDraw)
    }
}
