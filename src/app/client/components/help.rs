use tui_realm_stdlib::Table;
use tuirealm::{props::TextSpan, Component, Event, MockComponent};

use super::{Msg, UserEvent};

#[derive(MockComponent)]
pub struct Help {
    component: Table,
}

impl Default for Help {
    fn default() -> Self {
        let component = Table::default()
            .title("Navigation", tuirealm::props::Alignment::Center)
            .widths(&[40, 60])
            .table(vec![
                vec![TextSpan::from("Tab"), TextSpan::from("Switch focus")],
                vec![TextSpan::from("Arrow keys"), TextSpan::from("Pick a card")],
                vec![TextSpan::from("Enter"), TextSpan::from("Join / Vote")],
                vec![TextSpan::from("r"), TextSpan::from("Reset votes")],
                vec![TextSpan::from("Esc"), TextSpan::from("Quit")],
            ]);

        Self { component }
    }
}

impl Component<Msg, UserEvent> for Help {
    fn on(&mut self, _event: Event<UserEvent>) -> Option<Msg> {
        None
    }
}
