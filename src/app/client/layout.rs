/// Divide the screen real estate into various chunks, each with one specific purpose
// ┌───────────────────────────────────────────────────────────────────────────┐
// │ ┌───────────────────────────────────────────────────────────────────────┐ │
// │ │                              Room input                               │ │
// │ └───────────────────────────────────────────────────────────────────────┘ │
// │ ┌──────────────────────┐ ┌──────────────────────────────────────────────┐ │
// │ │                      │ │                                              │ │
// │ │      Room list       │ │                                              │ │
// │ │                      │ │                 Vote table                   │ │
// │ └──────────────────────┘ │                                              │ │
// │ ┌──────────────────────┐ └──────────────────────────────────────────────┘ │
// │ │                      │ ┌──────────────────────────────────────────────┐ │
// │ │      Navigation      │ │                 Vote picker                  │ │
// │ └──────────────────────┘ └──────────────────────────────────────────────┘ │
// │ ┌───────────────────────────────────────────────────────────────────────┐ │
// │ │                              Bottom bar                               │ │
// │ └───────────────────────────────────────────────────────────────────────┘ │
// └───────────────────────────────────────────────────────────────────────────┘
use tuirealm::tui::layout::{Constraint, Direction, Layout, Rect};

pub struct CustomLayout {
    pub room_input: Rect,
    pub room_list: Rect,
    pub navigation: Rect,
    pub vote_table: Rect,
    pub vote_picker: Rect,
    pub bottom_bar: Rect,
}

impl CustomLayout {
    pub fn new(main_screen_area: Rect) -> Self {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(3), // Room input
                    Constraint::Min(10),   // Action area
                    Constraint::Length(3), // Bottom bar
                ]
                .as_ref(),
            )
            .split(main_screen_area);

        let middle_parts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
            .split(main_chunks[1]);

        let side_panel = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(middle_parts[0]);

        let action_area = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(middle_parts[1]);

        Self {
            room_input: main_chunks[0],
            room_list: side_panel[0],
            navigation: side_panel[1],
            vote_table: action_area[0],
            vote_picker: action_area[1],
            bottom_bar: main_chunks[2],
        }
    }
}
