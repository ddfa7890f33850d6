use crate::app::server::{
    errors,
    grpc::{
        server::{Empty, PokerGrpc},
        storage::{interface::user::UserInterface, models},
    },
};

pub async fn heartbeat(
    state: &PokerGrpc,
    session: models::Session,
) -> Result<tonic::Response<Empty>, errors::ApiError> {
    state
        .store
        .heartbeat(&session.room_name, &session.user_name)?;

    Ok(tonic::Response::new(Empty {}))
}
