use thiserror::Error;

/// Failures raised by the in-memory room store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{vote} is not a valid value for a vote")]
    InvalidVote { vote: String },
    #[error("User {user_name} already exists in the room {room_name}")]
    DuplicateUser {
        user_name: String,
        room_name: String,
    },
    #[error("{user_name} is not present in the room {room_name}")]
    UnknownUser {
        user_name: String,
        room_name: String,
    },
    #[error("No room {room_name}")]
    UnknownRoom { room_name: String },
    #[error("Voting has ended in the room {room_name}")]
    VotingEnded { room_name: String },
}

impl StoreError {
    pub fn is_unknown_room(&self) -> bool {
        matches!(self, StoreError::UnknownRoom { .. })
    }
}

/// Errors returned to the grpc callers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },
    #[error("There is already a user {user_name} in the room {room_name}")]
    SessionMismatch {
        user_name: String,
        room_name: String,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ApiError> for tonic::Status {
    fn from(value: ApiError) -> Self {
        log::error!("api_error={value:?}");
        let message = value.to_string();
        match value {
            ApiError::BadRequest { .. } => Self::new(tonic::Code::InvalidArgument, message),
            ApiError::SessionMismatch { .. } => Self::new(tonic::Code::AlreadyExists, message),
            ApiError::Store(store_error) => match store_error {
                StoreError::InvalidVote { .. } => Self::new(tonic::Code::InvalidArgument, message),
                StoreError::DuplicateUser { .. } => {
                    Self::new(tonic::Code::AlreadyExists, message)
                }
                StoreError::UnknownUser { .. } | StoreError::UnknownRoom { .. } => {
                    Self::new(tonic::Code::NotFound, message)
                }
                StoreError::VotingEnded { .. } => {
                    Self::new(tonic::Code::FailedPrecondition, message)
                }
            },
        }
    }
}

pub trait ResultExtApp<T> {
    fn to_bad_request(self, message: &str) -> Result<T, ApiError>;
}

impl<T> ResultExtApp<T> for Option<T> {
    fn to_bad_request(self, message: &str) -> Result<T, ApiError> {
        self.ok_or_else(|| ApiError::BadRequest {
            message: message.to_string(),
        })
    }
}
