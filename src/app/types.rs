#[derive(serde::Deserialize, Debug, Default)]
pub struct ServerConfig {
    pub server: Option<Server>,
    pub rooms: Option<RoomsConfig>,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6969,
        }
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RoomsConfig {
    pub user_timeout_secs: u64,
    pub room_lifetime_secs: u64,
    /// Refuse new votes once everybody in the room has voted, until the votes are reset
    pub lock_votes_when_complete: bool,
    /// Period of the background sweep, `0` leaves the sweeping to the snapshot requests
    pub sweep_interval_secs: u64,
}

impl Default for RoomsConfig {
    fn default() -> Self {
        Self {
            user_timeout_secs: 3,
            room_lifetime_secs: 24 * 60 * 60,
            lock_votes_when_complete: false,
            sweep_interval_secs: 60,
        }
    }
}
