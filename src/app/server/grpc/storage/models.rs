use std::{
    collections::BTreeMap,
    fmt,
    str::FromStr,
    time::{Duration, SystemTime},
};

use crate::app::server::errors::StoreError;

type ModelResult<T> = Result<T, StoreError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Vote {
    One,
    Two,
    Three,
    Five,
    Eight,
    Thirteen,
    Unsure,
}

impl Vote {
    /// Every valid vote, in the order they are offered to the users
    pub const ALL: [Vote; 7] = [
        Vote::One,
        Vote::Two,
        Vote::Three,
        Vote::Five,
        Vote::Eight,
        Vote::Thirteen,
        Vote::Unsure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Vote::One => "1",
            Vote::Two => "2",
            Vote::Three => "3",
            Vote::Five => "5",
            Vote::Eight => "8",
            Vote::Thirteen => "13",
            Vote::Unsure => "?",
        }
    }
}

impl FromStr for Vote {
    type Err = StoreError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Vote::ALL
            .into_iter()
            .find(|vote| vote.as_str() == token)
            .ok_or_else(|| StoreError::InvalidVote {
                vote: token.to_string(),
            })
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one user is allowed to see of another user's vote
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteView {
    Unset,
    Hidden,
    Revealed(Vote),
}

/// Whether votes can still change once everybody in the room has voted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VotingPolicy {
    #[default]
    AllowRevote,
    LockWhenComplete,
}

impl VotingPolicy {
    pub fn from_lock_flag(lock_votes_when_complete: bool) -> Self {
        if lock_votes_when_complete {
            Self::LockWhenComplete
        } else {
            Self::AllowRevote
        }
    }
}

/// A user is per-room
#[derive(Clone, Debug)]
pub struct User {
    vote: Option<Vote>,
    last_heartbeat: SystemTime,
    session_id: String,
}

impl User {
    pub fn new(session_id: String, now: SystemTime) -> Self {
        Self {
            vote: None,
            last_heartbeat: now,
            session_id,
        }
    }

    pub fn vote(&self) -> Option<Vote> {
        self.vote
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Cast or change the vote, the previous vote is kept when the token is invalid
    pub fn cast_vote(&mut self, token: &str) -> ModelResult<Vote> {
        let vote = token.parse::<Vote>()?;
        self.vote = Some(vote);
        Ok(vote)
    }

    pub fn heartbeat(&mut self, now: SystemTime) {
        self.last_heartbeat = now;
    }

    pub fn is_expired(&self, now: SystemTime, timeout: Duration) -> bool {
        now > self.last_heartbeat + timeout
    }

    pub fn has_voted(&self) -> bool {
        self.vote.is_some()
    }

    pub fn reset_vote(&mut self) {
        self.vote = None;
    }
}

/// Identifies a user inside a room, the session id is what proves ownership of the name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub room_name: String,
    pub user_name: String,
    pub session_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub expired_users: usize,
    pub expired_rooms: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomSummary {
    pub room_name: String,
    pub user_count: usize,
    pub voted_count: usize,
    pub all_voted: bool,
}

/// Votes of a room as seen by one of its users
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VotesSnapshot {
    pub votes: BTreeMap<String, VoteView>,
    pub all_voted: bool,
    pub last_update: SystemTime,
}

#[derive(Clone, Debug)]
pub struct Room {
    name: String,
    users: BTreeMap<String, User>,
    expiration: SystemTime,
    last_update: SystemTime,
}

impl Room {
    /// A room must have a user to be created
    pub fn new(
        name: String,
        user_name: String,
        session_id: String,
        now: SystemTime,
        lifetime: Duration,
    ) -> Self {
        let mut users = BTreeMap::new();
        users.insert(user_name, User::new(session_id, now));

        Self {
            name,
            users,
            expiration: now + lifetime,
            last_update: now,
        }
    }

    pub fn last_update(&self) -> SystemTime {
        self.last_update
    }

    pub fn user(&self, user_name: &str) -> Option<&User> {
        self.users.get(user_name)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn add_user(
        &mut self,
        user_name: &str,
        session_id: String,
        now: SystemTime,
    ) -> ModelResult<()> {
        if self.users.contains_key(user_name) {
            return Err(StoreError::DuplicateUser {
                user_name: user_name.to_string(),
                room_name: self.name.clone(),
            });
        }

        self.users.insert(user_name.to_string(), User::new(session_id, now));
        self.touch(now);
        Ok(())
    }

    /// Add the user, or refresh it when the same session is coming back
    ///
    /// A different session asking for a taken name is rejected
    pub fn admit_user(
        &mut self,
        user_name: &str,
        session_id: &str,
        now: SystemTime,
    ) -> ModelResult<()> {
        match self.users.get(user_name) {
            None => self.add_user(user_name, session_id.to_string(), now),
            Some(user) if user.session_id() == session_id => self.heartbeat(user_name, now),
            Some(_) => Err(StoreError::DuplicateUser {
                user_name: user_name.to_string(),
                room_name: self.name.clone(),
            }),
        }
    }

    pub fn heartbeat(&mut self, user_name: &str, now: SystemTime) -> ModelResult<()> {
        self.user_mut(user_name)?.heartbeat(now);
        Ok(())
    }

    pub fn cast_vote(
        &mut self,
        user_name: &str,
        token: &str,
        policy: VotingPolicy,
        now: SystemTime,
    ) -> ModelResult<Vote> {
        if !self.users.contains_key(user_name) {
            return Err(StoreError::UnknownUser {
                user_name: user_name.to_string(),
                room_name: self.name.clone(),
            });
        }

        if policy == VotingPolicy::LockWhenComplete && self.all_voted() {
            return Err(StoreError::VotingEnded {
                room_name: self.name.clone(),
            });
        }

        let vote = self.user_mut(user_name)?.cast_vote(token)?;
        self.touch(now);
        Ok(vote)
    }

    /// Votes stay hidden from everybody but their owner until all users have voted
    pub fn votes_view(&self, requesting_user: &str) -> BTreeMap<String, VoteView> {
        let all_voted = self.all_voted();

        self.users
            .iter()
            .map(|(name, user)| {
                let view = match user.vote() {
                    Some(vote) if all_voted || name == requesting_user => VoteView::Revealed(vote),
                    Some(_) => VoteView::Hidden,
                    None => VoteView::Unset,
                };
                (name.clone(), view)
            })
            .collect()
    }

    pub fn snapshot(&self, requesting_user: &str) -> VotesSnapshot {
        VotesSnapshot {
            votes: self.votes_view(requesting_user),
            all_voted: self.all_voted(),
            last_update: self.last_update,
        }
    }

    pub fn all_voted(&self) -> bool {
        self.users.values().all(User::has_voted)
    }

    /// Drop every user that has stopped sending heartbeats, returning their names
    pub fn remove_expired_users(&mut self, now: SystemTime, timeout: Duration) -> Vec<String> {
        let expired = self
            .users
            .iter()
            .filter(|(_, user)| user.is_expired(now, timeout))
            .map(|(name, _)| name.clone())
            .collect::<Vec<_>>();

        for user_name in &expired {
            self.users.remove(user_name);
            tracing::info!(room_name = %self.name, %user_name, "Removing expired user");
        }

        if !expired.is_empty() {
            self.touch(now);
        }

        expired
    }

    pub fn reset_votes(&mut self, now: SystemTime) {
        self.users.values_mut().for_each(User::reset_vote);
        self.touch(now);
    }

    pub fn is_expired(&self, now: SystemTime) -> bool {
        now > self.expiration
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            room_name: self.name.clone(),
            user_count: self.users.len(),
            voted_count: self.users.values().filter(|user| user.has_voted()).count(),
            all_voted: self.all_voted(),
        }
    }

    /// `last_update` strictly increases with every change, even within one millisecond
    fn touch(&mut self, now: SystemTime) {
        self.last_update = now.max(self.last_update + Duration::from_millis(1));
    }

    fn user_mut(&mut self, user_name: &str) -> ModelResult<&mut User> {
        let room_name = &self.name;
        self.users
            .get_mut(user_name)
            .ok_or_else(|| StoreError::UnknownUser {
                user_name: user_name.to_string(),
                room_name: room_name.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(3);
    const LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

    fn start() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_000)
    }

    fn standup() -> Room {
        let mut room = Room::new(
            "standup".to_string(),
            "alice".to_string(),
            "alice-session".to_string(),
            start(),
            LIFETIME,
        );
        room.add_user("bob", "bob-session".to_string(), start())
            .unwrap();
        room
    }

    fn view(entries: &[(&str, VoteView)]) -> BTreeMap<String, VoteView> {
        entries
            .iter()
            .map(|(name, view)| (name.to_string(), *view))
            .collect()
    }

    #[test]
    fn vote_tokens_parse_and_display() {
        for vote in Vote::ALL {
            assert_eq!(vote.as_str().parse::<Vote>().unwrap(), vote);
        }
        assert_eq!(Vote::Thirteen.to_string(), "13");
        assert_eq!(Vote::Unsure.to_string(), "?");
    }

    #[test]
    fn invalid_tokens_keep_the_previous_vote() {
        let mut user = User::new("session".to_string(), start());
        user.cast_vote("8").unwrap();

        for token in ["4", "0", "", "21", "13 ", "??", "one", "-1"] {
            let error = user.cast_vote(token).unwrap_err();
            assert_eq!(
                error,
                StoreError::InvalidVote {
                    vote: token.to_string()
                }
            );
            assert_eq!(user.vote(), Some(Vote::Eight));
        }
    }

    #[test]
    fn user_expires_strictly_after_the_timeout() {
        let mut user = User::new("session".to_string(), start());
        assert!(!user.is_expired(start() + TIMEOUT, TIMEOUT));
        assert!(user.is_expired(start() + TIMEOUT + Duration::from_millis(1), TIMEOUT));

        user.heartbeat(start() + TIMEOUT);
        assert!(!user.is_expired(start() + TIMEOUT * 2, TIMEOUT));
    }

    #[test]
    fn user_vote_can_be_reset() {
        let mut user = User::new("session".to_string(), start());
        assert!(!user.has_voted());
        user.cast_vote("?").unwrap();
        assert!(user.has_voted());
        user.reset_vote();
        assert!(!user.has_voted());
        assert_eq!(user.vote(), None);
    }

    #[test]
    fn standup_scenario_reveals_only_when_everyone_voted() {
        let mut room = standup();
        let policy = VotingPolicy::AllowRevote;

        assert_eq!(
            room.votes_view("alice"),
            view(&[("alice", VoteView::Unset), ("bob", VoteView::Unset)])
        );

        room.cast_vote("bob", "5", policy, start()).unwrap();
        assert_eq!(
            room.votes_view("alice"),
            view(&[("alice", VoteView::Unset), ("bob", VoteView::Hidden)])
        );
        assert_eq!(
            room.votes_view("bob"),
            view(&[
                ("alice", VoteView::Unset),
                ("bob", VoteView::Revealed(Vote::Five))
            ])
        );

        room.cast_vote("alice", "8", policy, start()).unwrap();
        assert!(room.all_voted());
        assert_eq!(
            room.votes_view("alice"),
            view(&[
                ("alice", VoteView::Revealed(Vote::Eight)),
                ("bob", VoteView::Revealed(Vote::Five))
            ])
        );
    }

    #[test]
    fn other_votes_stay_hidden_until_all_voted() {
        let mut room = standup();
        room.add_user("carol", "carol-session".to_string(), start())
            .unwrap();
        room.cast_vote("bob", "13", VotingPolicy::AllowRevote, start())
            .unwrap();
        room.cast_vote("carol", "?", VotingPolicy::AllowRevote, start())
            .unwrap();

        for requester in ["alice", "bob", "carol", "mallory"] {
            for (name, entry) in room.votes_view(requester) {
                if name != requester {
                    assert!(
                        !matches!(entry, VoteView::Revealed(_)),
                        "{requester} could see the vote of {name}"
                    );
                }
            }
        }
    }

    #[test]
    fn invalid_vote_leaves_the_room_unchanged() {
        let mut room = standup();
        room.cast_vote("bob", "5", VotingPolicy::AllowRevote, start())
            .unwrap();
        let before = room.snapshot("bob");

        let later = start() + Duration::from_secs(1);
        let error = room
            .cast_vote("bob", "4", VotingPolicy::AllowRevote, later)
            .unwrap_err();

        assert!(matches!(error, StoreError::InvalidVote { .. }));
        assert_eq!(room.snapshot("bob"), before);
    }

    #[test]
    fn unknown_user_cannot_vote() {
        let mut room = standup();
        let error = room
            .cast_vote("mallory", "5", VotingPolicy::AllowRevote, start())
            .unwrap_err();
        assert_eq!(
            error,
            StoreError::UnknownUser {
                user_name: "mallory".to_string(),
                room_name: "standup".to_string()
            }
        );
    }

    #[test]
    fn duplicate_user_keeps_the_first_user() {
        let mut room = standup();
        room.cast_vote("bob", "3", VotingPolicy::AllowRevote, start())
            .unwrap();

        let error = room
            .add_user("bob", "other-session".to_string(), start())
            .unwrap_err();

        assert!(matches!(error, StoreError::DuplicateUser { .. }));
        let bob = room.user("bob").unwrap();
        assert_eq!(bob.vote(), Some(Vote::Three));
        assert_eq!(bob.session_id(), "bob-session");
        assert_eq!(room.user_count(), 2);
    }

    #[test]
    fn admit_user_checks_the_session() {
        let mut room = standup();
        let later = start() + Duration::from_secs(2);

        room.admit_user("bob", "bob-session", later).unwrap();
        assert!(!room
            .user("bob")
            .unwrap()
            .is_expired(later + TIMEOUT, TIMEOUT));

        let error = room.admit_user("bob", "stolen", later).unwrap_err();
        assert!(matches!(error, StoreError::DuplicateUser { .. }));

        room.admit_user("carol", "carol-session", later).unwrap();
        assert_eq!(room.user_count(), 3);
        assert_eq!(room.last_update(), later);
    }

    #[test]
    fn reset_clears_votes_but_keeps_users() {
        let mut room = standup();
        room.cast_vote("alice", "1", VotingPolicy::AllowRevote, start())
            .unwrap();
        room.cast_vote("bob", "2", VotingPolicy::AllowRevote, start())
            .unwrap();
        assert!(room.all_voted());

        room.reset_votes(start() + Duration::from_secs(1));

        assert!(!room.all_voted());
        assert_eq!(room.user_count(), 2);
        assert!(room.votes_view("alice").values().all(|entry| *entry == VoteView::Unset));
        assert_eq!(room.last_update(), start() + Duration::from_secs(1));
    }

    #[test]
    fn revote_depends_on_the_policy() {
        let mut room = standup();
        room.cast_vote("alice", "1", VotingPolicy::AllowRevote, start())
            .unwrap();
        room.cast_vote("bob", "2", VotingPolicy::AllowRevote, start())
            .unwrap();

        let vote = room
            .cast_vote("bob", "3", VotingPolicy::AllowRevote, start())
            .unwrap();
        assert_eq!(vote, Vote::Three);

        let error = room
            .cast_vote("bob", "5", VotingPolicy::LockWhenComplete, start())
            .unwrap_err();
        assert_eq!(
            error,
            StoreError::VotingEnded {
                room_name: "standup".to_string()
            }
        );
        assert_eq!(room.user("bob").unwrap().vote(), Some(Vote::Three));
    }

    #[test]
    fn locked_policy_still_allows_changes_before_completion() {
        let mut room = standup();
        room.cast_vote("bob", "2", VotingPolicy::LockWhenComplete, start())
            .unwrap();
        room.cast_vote("bob", "8", VotingPolicy::LockWhenComplete, start())
            .unwrap();
        assert_eq!(room.user("bob").unwrap().vote(), Some(Vote::Eight));
    }

    #[test]
    fn expired_users_are_removed_exactly() {
        let mut room = standup();
        room.add_user("carol", "carol-session".to_string(), start())
            .unwrap();

        let later = start() + Duration::from_secs(5);
        room.heartbeat("carol", later).unwrap();

        let removed = room.remove_expired_users(later, TIMEOUT);
        assert_eq!(removed, vec!["alice".to_string(), "bob".to_string()]);
        assert_eq!(room.user_count(), 1);
        assert_eq!(room.last_update(), later);

        assert!(room.remove_expired_users(later, TIMEOUT).is_empty());
        assert_eq!(room.user_count(), 1);
    }

    #[test]
    fn last_update_always_moves_forward() {
        let mut room = standup();
        let created = room.last_update();

        room.cast_vote("alice", "1", VotingPolicy::AllowRevote, start())
            .unwrap();
        room.cast_vote("bob", "1", VotingPolicy::AllowRevote, start())
            .unwrap();

        assert!(room.last_update() > created);
        assert_eq!(room.last_update(), start() + Duration::from_millis(3));
    }

    #[test]
    fn room_expires_after_its_lifetime() {
        let room = standup();
        assert!(!room.is_expired(start() + LIFETIME));
        assert!(room.is_expired(start() + LIFETIME + Duration::from_secs(1)));
    }

    #[test]
    fn empty_room_is_kept_and_shows_nothing() {
        let mut room = standup();
        room.remove_expired_users(start() + Duration::from_secs(10), TIMEOUT);

        assert_eq!(room.user_count(), 0);
        assert!(room.votes_view("alice").is_empty());
        assert!(!room.is_expired(start() + Duration::from_secs(10)));
    }

    #[test]
    fn summary_counts_votes() {
        let mut room = standup();
        room.cast_vote("bob", "5", VotingPolicy::AllowRevote, start())
            .unwrap();
        assert_eq!(
            room.summary(),
            RoomSummary {
                room_name: "standup".to_string(),
                user_count: 2,
                voted_count: 1,
                all_voted: false,
            }
        );
    }
}
