use std::fmt::Debug;

pub use pokerroom_grpc::{
    poker_client, poker_server, CastVoteRequest, Empty, HeartbeatRequest, JoinRoomRequest,
    JoinRoomResponse, ListRoomsResponse, ResetVotesRequest, RoomSnapshotRequest,
    RoomSnapshotResponse, RoomSummary, Session, ValidVotesResponse, VoteEntry, VoteState,
    FILE_DESCRIPTOR_SET,
};

use super::{functions, storage::models, utils};

use crate::app::server::{
    errors::{self, ResultExtApp},
    grpc::storage::{interface::user::UserInterface, Store},
};

mod pokerroom_grpc {
    // The string specified here must match the proto package name
    tonic::include_proto!("pokerroom");

    pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("pokerroom");
}

impl From<models::Session> for Session {
    fn from(session: models::Session) -> Self {
        Self {
            room_name: session.room_name,
            user_name: session.user_name,
            session_id: session.session_id,
        }
    }
}

impl From<(String, models::VoteView)> for VoteEntry {
    fn from((user_name, view): (String, models::VoteView)) -> Self {
        let (state, value) = match view {
            models::VoteView::Unset => (VoteState::Unset, None),
            models::VoteView::Hidden => (VoteState::Hidden, None),
            models::VoteView::Revealed(vote) => (VoteState::Revealed, Some(vote.to_string())),
        };

        Self {
            user_name,
            state: state as i32,
            value,
        }
    }
}

impl From<models::RoomSummary> for RoomSummary {
    fn from(summary: models::RoomSummary) -> Self {
        Self {
            room_name: summary.room_name,
            user_count: summary.user_count as u32,
            voted_count: summary.voted_count as u32,
            all_voted: summary.all_voted,
        }
    }
}

pub struct PokerGrpc {
    pub store: Store,
}

impl PokerGrpc {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

trait GetAuthData {
    fn get_session(&self) -> Option<&Session>;
}

macro_rules! impl_get_auth_data {
    ($($request:ty),+) => {
        $(impl GetAuthData for $request {
            fn get_session(&self) -> Option<&Session> {
                self.session.as_ref()
            }
        })+
    };
}

impl_get_auth_data!(
    HeartbeatRequest,
    CastVoteRequest,
    ResetVotesRequest,
    RoomSnapshotRequest
);

/// Check that the caller owns the user name it claims in the room
///
/// A user that is no longer in the room passes, it is re-admitted by the calls that need it
fn authenticate(
    state: &PokerGrpc,
    session: Option<&Session>,
) -> Result<models::Session, errors::ApiError> {
    let session = session.to_bad_request("The request does not carry a session")?;

    let room_name = utils::validate_name(&session.room_name, "room name")?;
    let user_name = utils::validate_name(&session.user_name, "user name")?;
    let session_id = utils::validate_name(&session.session_id, "session id")?;

    match state.store.find_session(&room_name, &user_name)? {
        Some(owner) if owner != session_id => Err(errors::ApiError::SessionMismatch {
            user_name,
            room_name,
        }),
        _ => Ok(models::Session {
            room_name,
            user_name,
            session_id,
        }),
    }
}

/// A generic wrapper for the server functions acting on behalf of a user
/// Authenticates the session before running the function
async fn server_wrap<'a, Req, Res, Fut>(
    state: &'a PokerGrpc,
    request: tonic::Request<Req>,
    func: fn(&'a PokerGrpc, models::Session, Req) -> Fut,
) -> Result<tonic::Response<Res>, tonic::Status>
where
    Req: GetAuthData + Debug,
    Fut: std::future::Future<Output = Result<tonic::Response<Res>, errors::ApiError>>,
{
    let request = request.into_inner();
    tracing::debug!(?request);

    let session = authenticate(state, request.get_session())?;
    let result = func(state, session, request).await;

    if let Err(error) = &result {
        tracing::error!(?error);
    }

    Ok(result?)
}

#[tonic::async_trait]
impl poker_server::Poker for PokerGrpc {
    async fn join_room(
        &self,
        request: tonic::Request<JoinRoomRequest>,
    ) -> Result<tonic::Response<JoinRoomResponse>, tonic::Status> {
        Ok(functions::room_service::join_room(self, request).await?)
    }

    async fn heartbeat(
        &self,
        request: tonic::Request<HeartbeatRequest>,
    ) -> Result<tonic::Response<Empty>, tonic::Status> {
        server_wrap(self, request, |state, session, _request| async move {
            functions::heartbeat::heartbeat(state, session).await
        })
        .await
    }

    async fn cast_vote(
        &self,
        request: tonic::Request<CastVoteRequest>,
    ) -> Result<tonic::Response<Empty>, tonic::Status> {
        server_wrap(self, request, |state, session, request| async move {
            functions::vote_service::cast_vote(state, session, request).await
        })
        .await
    }

    async fn reset_votes(
        &self,
        request: tonic::Request<ResetVotesRequest>,
    ) -> Result<tonic::Response<Empty>, tonic::Status> {
        server_wrap(self, request, |state, session, _request| async move {
            functions::room_service::reset_votes(state, session).await
        })
        .await
    }

    async fn room_snapshot(
        &self,
        request: tonic::Request<RoomSnapshotRequest>,
    ) -> Result<tonic::Response<RoomSnapshotResponse>, tonic::Status> {
        server_wrap(self, request, |state, session, request| async move {
            functions::vote_service::room_snapshot(state, session, request).await
        })
        .await
    }

    async fn list_rooms(
        &self,
        _request: tonic::Request<Empty>,
    ) -> Result<tonic::Response<ListRoomsResponse>, tonic::Status> {
        Ok(functions::room_service::list_rooms(self).await?)
    }

    async fn valid_votes(
        &self,
        _request: tonic::Request<Empty>,
    ) -> Result<tonic::Response<ValidVotesResponse>, tonic::Status> {
        Ok(functions::vote_service::valid_votes().await?)
    }
}
