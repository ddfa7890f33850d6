use std::sync::{Arc, Mutex};

use crate::app::server::{
    errors::StoreError,
    grpc::storage::{lock_room, models, SharedRoom, StorageResult, Store},
};

pub trait RoomInterface {
    /// Return the room, creating it with `user_name` as its first user when absent
    ///
    /// An expired room that was not swept yet is replaced by a new one
    fn find_or_create_room(
        &self,
        room_name: &str,
        user_name: &str,
        session_id: &str,
    ) -> (SharedRoom, bool);
    fn find_room(&self, room_name: &str) -> StorageResult<SharedRoom>;
    fn list_rooms(&self) -> Vec<models::RoomSummary>;
    fn reset_votes(&self, room_name: &str) -> StorageResult<()>;
    /// Garbage collect rooms that have persisted for a long time
    fn remove_expired_rooms(&self) -> Vec<String>;
    fn sweep(&self) -> models::SweepReport;
}

impl RoomInterface for Store {
    fn find_or_create_room(
        &self,
        room_name: &str,
        user_name: &str,
        session_id: &str,
    ) -> (SharedRoom, bool) {
        let now = self.clock.now();
        let mut rooms = self.lock_registry();

        if let Some(room) = rooms.get(room_name) {
            if !lock_room(room).is_expired(now) {
                return (Arc::clone(room), false);
            }
            tracing::info!(room_name, "Replacing expired room");
        }

        let room = models::Room::new(
            room_name.to_string(),
            user_name.to_string(),
            session_id.to_string(),
            now,
            self.settings.room_lifetime,
        );
        let room = Arc::new(Mutex::new(room));
        rooms.insert(room_name.to_string(), Arc::clone(&room));
        tracing::info!(room_name, user_name, "Created a new room");

        (room, true)
    }

    fn find_room(&self, room_name: &str) -> StorageResult<SharedRoom> {
        self.lock_registry()
            .get(room_name)
            .cloned()
            .ok_or_else(|| StoreError::UnknownRoom {
                room_name: room_name.to_string(),
            })
    }

    fn list_rooms(&self) -> Vec<models::RoomSummary> {
        let now = self.clock.now();
        let rooms = self.lock_registry();

        let mut summaries = rooms
            .values()
            .filter_map(|room| {
                let room = lock_room(room);
                (!room.is_expired(now)).then(|| room.summary())
            })
            .collect::<Vec<_>>();

        summaries.sort_by(|left, right| left.room_name.cmp(&right.room_name));
        summaries
    }

    fn reset_votes(&self, room_name: &str) -> StorageResult<()> {
        let room = self.find_room(room_name)?;
        let now = self.clock.now();
        lock_room(&room).reset_votes(now);
        tracing::info!(room_name, "Votes have been reset");
        Ok(())
    }

    fn remove_expired_rooms(&self) -> Vec<String> {
        let now = self.clock.now();
        let mut rooms = self.lock_registry();

        let expired = rooms
            .iter()
            .filter(|(_, room)| lock_room(room).is_expired(now))
            .map(|(room_name, _)| room_name.clone())
            .collect::<Vec<_>>();

        for room_name in &expired {
            rooms.remove(room_name);
            tracing::info!(%room_name, "Removing expired room");
        }

        expired
    }

    fn sweep(&self) -> models::SweepReport {
        let now = self.clock.now();
        let rooms = self.lock_registry().values().cloned().collect::<Vec<_>>();

        let expired_users = rooms
            .iter()
            .map(|room| {
                lock_room(room)
                    .remove_expired_users(now, self.settings.user_timeout)
                    .len()
            })
            .sum();

        models::SweepReport {
            expired_users,
            expired_rooms: self.remove_expired_rooms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::app::server::grpc::{
        storage::{
            clock::ManualClock,
            interface::{user::UserInterface, vote::VoteInterface},
        },
        types::{RoomSettings, ROOM_LIFETIME, USER_TIMEOUT},
    };

    fn store() -> (Store, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        (Store::new(RoomSettings::default(), clock.clone()), clock)
    }

    #[test]
    fn find_or_create_only_creates_once() {
        let (store, _) = store();

        let (first, created) = store.find_or_create_room("standup", "alice", "a");
        assert!(created);
        let (second, created) = store.find_or_create_room("standup", "bob", "b");
        assert!(!created);

        assert!(Arc::ptr_eq(&first, &second));
        let room = lock_room(&second);
        assert_eq!(room.user_count(), 1);
        assert!(room.user("alice").is_some());
    }

    #[test]
    fn find_or_create_replaces_an_expired_room() {
        let (store, clock) = store();
        let (old, _) = store.find_or_create_room("standup", "alice", "a");

        clock.advance(ROOM_LIFETIME + Duration::from_secs(1));
        let (new, created) = store.find_or_create_room("standup", "bob", "b");

        assert!(created);
        assert!(!Arc::ptr_eq(&old, &new));
        assert!(lock_room(&new).user("alice").is_none());
        assert!(lock_room(&new).user("bob").is_some());
    }

    #[test]
    fn find_room_reports_unknown_rooms() {
        let (store, _) = store();
        let error = store.find_room("retro").unwrap_err();
        assert_eq!(
            error,
            StoreError::UnknownRoom {
                room_name: "retro".to_string()
            }
        );
        assert!(store.reset_votes("retro").unwrap_err().is_unknown_room());
    }

    #[test]
    fn reset_votes_keeps_users() {
        let (store, _) = store();
        store.join_room("standup", "alice", Some("a")).unwrap();
        store.join_room("standup", "bob", Some("b")).unwrap();
        store.cast_vote("standup", "alice", "3").unwrap();
        store.cast_vote("standup", "bob", "5").unwrap();

        store.reset_votes("standup").unwrap();

        let snapshot = store.votes_snapshot("standup", "alice").unwrap();
        assert!(!snapshot.all_voted);
        assert_eq!(snapshot.votes.len(), 2);
        assert!(snapshot
            .votes
            .values()
            .all(|view| *view == models::VoteView::Unset));
    }

    #[test]
    fn expired_rooms_are_removed() {
        let (store, clock) = store();
        store.join_room("old", "alice", Some("a")).unwrap();
        clock.advance(Duration::from_secs(60 * 60));
        store.join_room("new", "bob", Some("b")).unwrap();

        clock.advance(ROOM_LIFETIME - Duration::from_secs(30 * 60));
        assert_eq!(store.remove_expired_rooms(), vec!["old".to_string()]);
        assert!(store.find_room("old").is_err());
        assert!(store.find_room("new").is_ok());
        assert!(store.remove_expired_rooms().is_empty());
    }

    #[test]
    fn sweep_expires_users_then_rooms() {
        let (store, clock) = store();
        store.join_room("standup", "alice", Some("a")).unwrap();
        store.join_room("standup", "bob", Some("b")).unwrap();
        store.join_room("retro", "carol", Some("c")).unwrap();

        clock.advance(USER_TIMEOUT + Duration::from_secs(1));
        store.heartbeat("standup", "bob").unwrap();

        let report = store.sweep();
        assert_eq!(report.expired_users, 2);
        assert!(report.expired_rooms.is_empty());

        // Empty rooms are kept until they expire on their own
        let retro = store.find_room("retro").unwrap();
        assert_eq!(lock_room(&retro).user_count(), 0);

        clock.advance(ROOM_LIFETIME);
        let report = store.sweep();
        assert_eq!(report.expired_rooms.len(), 2);
        assert!(store.list_rooms().is_empty());
    }

    #[test]
    fn list_rooms_is_sorted_by_name() {
        let (store, _) = store();
        store.join_room("retro", "alice", Some("a")).unwrap();
        store.join_room("backlog", "bob", Some("b")).unwrap();
        store.join_room("backlog", "carol", Some("c")).unwrap();
        store.cast_vote("backlog", "bob", "?").unwrap();

        let rooms = store.list_rooms();
        assert_eq!(
            rooms,
            vec![
                models::RoomSummary {
                    room_name: "backlog".to_string(),
                    user_count: 2,
                    voted_count: 1,
                    all_voted: false,
                },
                models::RoomSummary {
                    room_name: "retro".to_string(),
                    user_count: 1,
                    voted_count: 0,
                    all_voted: false,
                },
            ]
        );
    }
}
