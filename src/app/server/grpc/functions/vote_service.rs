use crate::app::server::{
    errors,
    grpc::{
        server::{
            CastVoteRequest, Empty, PokerGrpc, RoomSnapshotRequest, RoomSnapshotResponse,
            ValidVotesResponse,
        },
        storage::{
            clock,
            interface::vote::VoteInterface,
            models,
        },
    },
};

/// Cast or change a vote, the body carries the vote token as a string (e.g. "5" or "?")
pub async fn cast_vote(
    state: &PokerGrpc,
    session: models::Session,
    request: CastVoteRequest,
) -> Result<tonic::Response<Empty>, errors::ApiError> {
    state
        .store
        .cast_vote(&session.room_name, &session.user_name, &request.vote)?;

    Ok(tonic::Response::new(Empty {}))
}

/// Main data call and heartbeat, gives the votes of the room as seen by the caller
///
/// Answers with `not_modified` when nothing changed since the caller's `last_update`
pub async fn room_snapshot(
    state: &PokerGrpc,
    session: models::Session,
    request: RoomSnapshotRequest,
) -> Result<tonic::Response<RoomSnapshotResponse>, errors::ApiError> {
    // A user that expired while still polling comes back in, without its vote
    let snapshot = state.store.poll_votes(&session)?;

    let last_update = clock::unix_millis(snapshot.last_update);
    if request.last_update >= last_update {
        return Ok(tonic::Response::new(RoomSnapshotResponse {
            not_modified: true,
            last_update,
            all_voted: snapshot.all_voted,
            entries: Vec::new(),
        }));
    }

    let entries = snapshot
        .votes
        .into_iter()
        .map(From::from)
        .collect::<Vec<_>>();

    Ok(tonic::Response::new(RoomSnapshotResponse {
        not_modified: false,
        last_update,
        all_voted: snapshot.all_voted,
        entries,
    }))
}

pub async fn valid_votes() -> Result<tonic::Response<ValidVotesResponse>, errors::ApiError> {
    let votes = models::Vote::ALL
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    Ok(tonic::Response::new(ValidVotesResponse { votes }))
}
