use crate::app::server::{
    errors::StoreError,
    grpc::storage::{
        interface::{room::RoomInterface, user::UserInterface},
        lock_room, models, StorageResult, Store,
    },
};

pub trait VoteInterface {
    fn cast_vote(&self, room_name: &str, user_name: &str, token: &str)
        -> StorageResult<models::Vote>;
    /// Expire idle users of the room and old rooms, then build the view of `user_name`
    fn votes_snapshot(
        &self,
        room_name: &str,
        user_name: &str,
    ) -> StorageResult<models::VotesSnapshot>;
    /// Snapshot on behalf of a polling user
    ///
    /// Idle users are expired before the caller is admitted again, so a caller
    /// that timed out comes back without its old vote
    fn poll_votes(&self, session: &models::Session) -> StorageResult<models::VotesSnapshot>;
}

impl VoteInterface for Store {
    fn cast_vote(
        &self,
        room_name: &str,
        user_name: &str,
        token: &str,
    ) -> StorageResult<models::Vote> {
        let room = self.find_room(room_name)?;
        let now = self.clock.now();
        let vote =
            lock_room(&room).cast_vote(user_name, token, self.settings.voting_policy, now)?;
        tracing::info!(room_name, user_name, "Vote has been cast");
        Ok(vote)
    }

    fn votes_snapshot(
        &self,
        room_name: &str,
        user_name: &str,
    ) -> StorageResult<models::VotesSnapshot> {
        let room = self.find_room(room_name)?;
        let now = self.clock.now();

        lock_room(&room).remove_expired_users(now, self.settings.user_timeout);
        self.remove_expired_rooms();

        let room = lock_room(&room);
        if room.is_expired(now) {
            return Err(StoreError::UnknownRoom {
                room_name: room_name.to_string(),
            });
        }

        Ok(room.snapshot(user_name))
    }

    fn poll_votes(&self, session: &models::Session) -> StorageResult<models::VotesSnapshot> {
        let room = self.find_room(&session.room_name)?;
        let now = self.clock.now();
        lock_room(&room).remove_expired_users(now, self.settings.user_timeout);

        self.enter_room(&session.room_name, &session.user_name, &session.session_id)?;
        self.votes_snapshot(&session.room_name, &session.user_name)
    }
}
