#[derive(Debug, PartialEq, Eq, Clone, PartialOrd)]
pub enum UserEvent {
    InfoMessage(String),
    NetworkError(String),
    RoomJoined {
        room_name: String,
        user_name: String,
    },
    RoomUpdated(RoomView),
    RoomsListed(Vec<RoomListing>),
}

/// How a vote of the room is displayed to this client
#[derive(Debug, PartialEq, Eq, Clone, PartialOrd)]
pub enum VoteDisplay {
    Unset,
    Hidden,
    Revealed(String),
}

#[derive(Debug, PartialEq, Eq, Clone, PartialOrd)]
pub struct VoteRow {
    pub user_name: String,
    pub vote: VoteDisplay,
}

#[derive(Debug, PartialEq, Eq, Clone, PartialOrd, Default)]
pub struct RoomView {
    pub room_name: String,
    pub all_voted: bool,
    pub votes: Vec<VoteRow>,
}

#[derive(Debug, PartialEq, Eq, Clone, PartialOrd)]
pub struct RoomListing {
    pub room_name: String,
    pub user_count: u32,
    pub voted_count: u32,
}

pub enum Request {
    /// Join the room, a random room is created when no name is given
    JoinRoom { room_name: Option<String> },
    CastVote(String),
    ResetVotes,
    Quit,
}
