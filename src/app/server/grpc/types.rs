use std::time::Duration;

use super::storage::models::VotingPolicy;
use crate::app::types::RoomsConfig;

/// How long a user may go without a heartbeat before being dropped from a room
pub const USER_TIMEOUT: Duration = Duration::from_secs(3);
/// Rooms are garbage collected a day after they were created
pub const ROOM_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomSettings {
    pub user_timeout: Duration,
    pub room_lifetime: Duration,
    pub voting_policy: VotingPolicy,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            user_timeout: USER_TIMEOUT,
            room_lifetime: ROOM_LIFETIME,
            voting_policy: VotingPolicy::default(),
        }
    }
}

impl From<&RoomsConfig> for RoomSettings {
    fn from(config: &RoomsConfig) -> Self {
        Self {
            user_timeout: Duration::from_secs(config.user_timeout_secs),
            room_lifetime: Duration::from_secs(config.room_lifetime_secs),
            voting_policy: VotingPolicy::from_lock_flag(config.lock_votes_when_complete),
        }
    }
}
