pub mod bottom_bar;
pub mod help;
pub mod room_input;
pub mod room_list;
pub mod vote_picker;
pub mod vote_table;

/// All the components must implement methods on these two types, so re export them
pub use super::network::types::UserEvent;
pub use super::types::Msg;
