use tui_realm_stdlib::List;
use tuirealm::{
    props::{Alignment, BorderType, Borders, TextSpan},
    Component, Event, MockComponent,
};

use crate::app::client::network::types::RoomListing;

use super::{Msg, UserEvent};

#[derive(MockComponent)]
pub struct RoomList {
    component: List,
}

fn get_room_list(rooms: &[RoomListing]) -> List {
    let rows = if rooms.is_empty() {
        vec![vec![TextSpan::from("No open rooms")]]
    } else {
        rooms
            .iter()
            .map(|room| {
                vec![
                    TextSpan::new(&room.room_name),
                    TextSpan::new(format!(" {}/{} voted", room.voted_count, room.user_count)),
                ]
            })
            .collect::<Vec<_>>()
    };

    List::default()
        .title("Rooms", Alignment::Left)
        .rows(rows)
        .borders(Borders::default().modifiers(BorderType::Rounded))
        .rewind(true)
        .scroll(true)
}

impl Default for RoomList {
    fn default() -> Self {
        Self {
            component: get_room_list(&[]),
        }
    }
}

impl Component<Msg, UserEvent> for RoomList {
    fn on(&mut self, event: Event<UserEvent>) -> Option<Msg> {
        match event {
            Event::User(UserEvent::RoomsListed(rooms)) => {
                self.component = get_room_list(&rooms);
                Some(Msg::ReDraw)
            }
            _ => None,
        }
    }
}
