use crate::app::{
    server::{
        errors::StoreError,
        grpc::storage::{interface::room::RoomInterface, lock_room, models, StorageResult, Store},
    },
    utils,
};

pub trait UserInterface {
    /// Join a room, creating it when it does not exist yet
    ///
    /// A fresh session id is handed out when the caller does not bring one
    fn join_room(
        &self,
        room_name: &str,
        user_name: &str,
        session_id: Option<&str>,
    ) -> StorageResult<models::Session>;
    /// Same as joining, except that the room has to exist already
    fn enter_room(&self, room_name: &str, user_name: &str, session_id: &str) -> StorageResult<()>;
    fn heartbeat(&self, room_name: &str, user_name: &str) -> StorageResult<()>;
    /// The session currently owning `user_name` in the room, if the user is present
    fn find_session(&self, room_name: &str, user_name: &str) -> StorageResult<Option<String>>;
}

impl UserInterface for Store {
    fn join_room(
        &self,
        room_name: &str,
        user_name: &str,
        session_id: Option<&str>,
    ) -> StorageResult<models::Session> {
        let session_id = session_id
            .filter(|session_id| !session_id.is_empty())
            .map(ToString::to_string)
            .unwrap_or_else(|| utils::generate_time_ordered_id("session"));

        let (room, created) = self.find_or_create_room(room_name, user_name, &session_id);

        if !created {
            let now = self.clock.now();
            lock_room(&room).admit_user(user_name, &session_id, now)?;
            tracing::info!(room_name, user_name, "User joined the room");
        }

        Ok(models::Session {
            room_name: room_name.to_string(),
            user_name: user_name.to_string(),
            session_id,
        })
    }

    fn enter_room(&self, room_name: &str, user_name: &str, session_id: &str) -> StorageResult<()> {
        let now = self.clock.now();
        let rooms = self.lock_registry();
        let room = rooms.get(room_name).ok_or_else(|| StoreError::UnknownRoom {
            room_name: room_name.to_string(),
        })?;

        lock_room(room).admit_user(user_name, session_id, now)?;
        Ok(())
    }

    fn heartbeat(&self, room_name: &str, user_name: &str) -> StorageResult<()> {
        let room = self.find_room(room_name)?;
        let now = self.clock.now();
        lock_room(&room).heartbeat(user_name, now)?;
        Ok(())
    }

    fn find_session(&self, room_name: &str, user_name: &str) -> StorageResult<Option<String>> {
        let room = self.find_room(room_name)?;
        let room = lock_room(&room);
        Ok(room
            .user(user_name)
            .map(|user| user.session_id().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::app::server::grpc::{
        storage::clock::ManualClock,
        types::{RoomSettings, ROOM_LIFETIME, USER_TIMEOUT},
    };

    fn store() -> (Store, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        (Store::new(RoomSettings::default(), clock.clone()), clock)
    }

    #[test]
    fn join_hands_out_a_session_when_missing() {
        let (store, _) = store();

        let alice = store.join_room("standup", "alice", None).unwrap();
        let bob = store.join_room("standup", "bob", Some("")).unwrap();

        assert!(alice.session_id.starts_with("session_"));
        assert!(bob.session_id.starts_with("session_"));
        assert_ne!(alice.session_id, bob.session_id);
        assert_eq!(
            store.find_session("standup", "alice").unwrap(),
            Some(alice.session_id)
        );
    }

    #[test]
    fn rejoin_with_the_same_session_is_a_heartbeat() {
        let (store, clock) = store();
        store.join_room("standup", "alice", Some("a")).unwrap();

        clock.advance(USER_TIMEOUT);
        store.join_room("standup", "alice", Some("a")).unwrap();
        clock.advance(USER_TIMEOUT);

        assert_eq!(store.sweep().expired_users, 0);
        assert_eq!(
            store.find_session("standup", "alice").unwrap(),
            Some("a".to_string())
        );
    }

    #[test]
    fn taken_name_is_rejected_for_another_session() {
        let (store, _) = store();
        store.join_room("standup", "alice", Some("a")).unwrap();

        let error = store.join_room("standup", "alice", Some("b")).unwrap_err();
        assert_eq!(
            error,
            StoreError::DuplicateUser {
                user_name: "alice".to_string(),
                room_name: "standup".to_string()
            }
        );
        assert_eq!(
            store.find_session("standup", "alice").unwrap(),
            Some("a".to_string())
        );
    }

    #[test]
    fn enter_room_needs_an_existing_room() {
        let (store, _) = store();
        assert!(store
            .enter_room("standup", "alice", "a")
            .unwrap_err()
            .is_unknown_room());
        assert!(store.list_rooms().is_empty());
    }

    #[test]
    fn enter_room_readmits_an_expired_user() {
        let (store, clock) = store();
        store.join_room("standup", "alice", Some("a")).unwrap();
        store.join_room("standup", "bob", Some("b")).unwrap();

        clock.advance(USER_TIMEOUT + Duration::from_secs(1));
        store.heartbeat("standup", "bob").unwrap();
        assert_eq!(store.sweep().expired_users, 1);
        assert_eq!(store.find_session("standup", "alice").unwrap(), None);

        store.enter_room("standup", "alice", "a").unwrap();
        assert_eq!(
            store.find_session("standup", "alice").unwrap(),
            Some("a".to_string())
        );
    }

    #[test]
    fn joining_an_expired_room_starts_over() {
        let (store, clock) = store();
        store.join_room("standup", "alice", Some("a")).unwrap();

        clock.advance(ROOM_LIFETIME + Duration::from_secs(1));
        store.join_room("standup", "alice", Some("b")).unwrap();

        assert_eq!(
            store.find_session("standup", "alice").unwrap(),
            Some("b".to_string())
        );
        assert_eq!(store.list_rooms().len(), 1);
    }

    #[test]
    fn heartbeat_needs_a_known_user() {
        let (store, _) = store();
        store.join_room("standup", "alice", Some("a")).unwrap();

        let error = store.heartbeat("standup", "bob").unwrap_err();
        assert!(matches!(error, StoreError::UnknownUser { .. }));
        assert!(store.heartbeat("retro", "alice").unwrap_err().is_unknown_room());
    }
}
