pub mod room;
pub mod user;
pub mod vote;

pub trait StorageInterface: room::RoomInterface + user::UserInterface + vote::VoteInterface {}
