use crate::app::server::{
    errors,
    grpc::{
        server::{Empty, JoinRoomRequest, JoinRoomResponse, ListRoomsResponse, PokerGrpc},
        storage::{
            interface::{room::RoomInterface, user::UserInterface},
            models,
        },
        utils,
    },
};

/// Join a room, creating it with the current user if it does not exist
///
/// This is the only call that can be made without a session, it hands one out
pub async fn join_room(
    state: &PokerGrpc,
    request: tonic::Request<JoinRoomRequest>,
) -> Result<tonic::Response<JoinRoomResponse>, errors::ApiError> {
    let request = request.into_inner();
    tracing::info!(room_name = %request.room_name, user_name = %request.user_name, "Join room request");

    let room_name = utils::validate_name(&request.room_name, "room name")?;
    let user_name = utils::validate_name(&request.user_name, "user name")?;

    let session = state
        .store
        .join_room(&room_name, &user_name, request.session_id.as_deref())?;

    Ok(tonic::Response::new(JoinRoomResponse {
        session: Some(session.into()),
    }))
}

/// Reset the votes of a room without removing users
pub async fn reset_votes(
    state: &PokerGrpc,
    session: models::Session,
) -> Result<tonic::Response<Empty>, errors::ApiError> {
    state.store.reset_votes(&session.room_name)?;
    tracing::info!(room_name = %session.room_name, user_name = %session.user_name, "Reset votes");

    Ok(tonic::Response::new(Empty {}))
}

pub async fn list_rooms(
    state: &PokerGrpc,
) -> Result<tonic::Response<ListRoomsResponse>, errors::ApiError> {
    let rooms = state
        .store
        .list_rooms()
        .into_iter()
        .map(From::from)
        .collect::<Vec<_>>();

    Ok(tonic::Response::new(ListRoomsResponse { rooms }))
}
