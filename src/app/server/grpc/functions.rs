pub mod heartbeat;
pub mod room_service;
pub mod vote_service;
