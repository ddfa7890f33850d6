use tui_realm_stdlib::Table;
use tuirealm::{
    props::{Alignment, BorderType, Borders, Color, TextSpan},
    Component, Event, MockComponent,
};

use crate::app::client::{
    network::types::{RoomView, VoteDisplay},
    types::AppStateUpdate,
};

use super::{Msg, UserEvent};

/// Votes of everyone in the room, hidden until the whole room has voted
#[derive(MockComponent)]
pub struct VoteTable {
    component: Table,
}

fn get_table_title(room: Option<&RoomView>) -> String {
    match room {
        None => "Votes - join a room to start voting".to_string(),
        Some(room) if room.all_voted => format!("Room {} - votes revealed", room.room_name),
        Some(room) => format!("Room {} - waiting for votes", room.room_name),
    }
}

fn get_vote_table(room: Option<&RoomView>) -> Table {
    let rows = room
        .map(|room| {
            room.votes
                .iter()
                .map(|row| {
                    let vote = match &row.vote {
                        VoteDisplay::Unset => TextSpan::from("..."),
                        VoteDisplay::Hidden => TextSpan::from(row.vote.label()).fg(Color::Yellow),
                        VoteDisplay::Revealed(_) => TextSpan::from(row.vote.label()).fg(Color::Green),
                    };
                    vec![TextSpan::new(&row.user_name), vote]
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    Table::default()
        .title(get_table_title(room), Alignment::Left)
        .borders(Borders::default().modifiers(BorderType::Rounded))
        .headers(&["User", "Vote"])
        .widths(&[60, 40])
        .table(rows)
}

impl Default for VoteTable {
    fn default() -> Self {
        Self {
            component: get_vote_table(None),
        }
    }
}

impl Component<Msg, UserEvent> for VoteTable {
    fn on(&mut self, event: Event<UserEvent>) -> Option<Msg> {
        match event {
            Event::User(UserEvent::RoomJoined {
                room_name,
                user_name,
            }) => {
                let room = RoomView {
                    room_name: room_name.clone(),
                    ..RoomView::default()
                };
                self.component = get_vote_table(Some(&room));
                Some(Msg::StateUpdate(AppStateUpdate::RoomJoined {
                    room_name,
                    user_name,
                }))
            }
            Event::User(UserEvent::RoomUpdated(room)) => {
                self.component = get_vote_table(Some(&room));
                Some(Msg::ReDraw)
            }
            _ => None,
        }
    }
}
