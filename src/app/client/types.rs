/// Where the identity of this client is kept between runs
pub const LOCAL_STORAGE_FILE: &str = "~/.local/state/pokerroom.toml";

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
    /// How often the room is polled, this is also the heartbeat of the user
    pub poll_interval_millis: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:6969".to_string(),
            poll_interval_millis: 1000,
        }
    }
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct LocalStorage {
    pub user_name: Option<String>,
    pub session_id: Option<String>,
}

impl LocalStorage {
    pub fn new(user_name: String, session_id: String) -> Self {
        Self {
            user_name: Some(user_name),
            session_id: Some(session_id),
        }
    }
}

#[derive(clap::Parser, Debug, Clone, Default)]
#[command(version, about = "Planning poker in the terminal", long_about = None)]
pub struct ClientArgs {
    /// Name shown to the other users of the room
    /// If not passed, then use the name stored in ~/.local/state/pokerroom.toml, or a random one
    #[arg(short, long)]
    pub user: Option<String>,
    /// Room to join right away
    #[arg(short, long)]
    pub room: Option<String>,
    /// Forget the stored session and start a new one
    #[arg(short, long, default_value_t = false)]
    pub new_session: bool,
    /// Path to the client configuration
    #[arg(short, long, default_value = "config/client.toml")]
    pub config: String,
}

// Let's define the component ids for our application
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum Id {
    RoomInput,
    RoomList,
    VoteTable,
    VotePicker,
    Help,
    BottomBar,
}

// Messages handled by the model. NOTE: it must derive `PartialEq`
#[derive(Debug, PartialEq)]
pub enum Msg {
    AppClose,
    FocusNext,
    JoinRoom(String),
    CastVote(String),
    ResetVotes,
    StateUpdate(AppStateUpdate),
    ReDraw,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AppStateUpdate {
    RoomJoined {
        room_name: String,
        user_name: String,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AppState {
    pub user_name: Option<String>,
    pub room_name: Option<String>,
}

impl AppState {
    pub fn apply_update(self, update: AppStateUpdate) -> Self {
        match update {
            AppStateUpdate::RoomJoined {
                room_name,
                user_name,
            } => Self {
                user_name: Some(user_name),
                room_name: Some(room_name),
            },
        }
    }

    pub fn is_in_room(&self) -> bool {
        self.room_name.is_some()
    }
}
