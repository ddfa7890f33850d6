use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

pub mod types;

use rand::Rng;
use tokio::sync::mpsc;
use tonic::transport::Channel;
use tuirealm::listener::Poll;

use crate::app::{
    server::grpc::server::{
        poker_client::PokerClient, CastVoteRequest, Empty, JoinRoomRequest, ResetVotesRequest,
        RoomSnapshotRequest, Session,
    },
    utils,
};

use super::network::types::{RoomView, UserEvent};
use super::types::{ClientArgs, ClientConfig, LocalStorage, LOCAL_STORAGE_FILE};

const NETWORK_MESSAGE_QUEUE_CAPACITY: usize = 10;

#[derive(Clone)]
pub struct NetworkClient {
    messages: Arc<Mutex<VecDeque<UserEvent>>>,
}

pub trait DisplayNetworkError {
    type Item;
    fn error_handler(self, network_client: &NetworkClient) -> Option<Self::Item>;
}

impl<U> DisplayNetworkError for Result<tonic::Response<U>, tonic::Status> {
    type Item = U;
    fn error_handler(self, network_client: &NetworkClient) -> Option<Self::Item> {
        match self {
            Ok(res) => Some(res.into_inner()),
            Err(tonic_status) => {
                let stringified_error = tonic_status.message();
                network_client
                    .push_user_event(UserEvent::NetworkError(stringified_error.to_string()));
                None
            }
        }
    }
}

impl Default for NetworkClient {
    fn default() -> Self {
        Self {
            messages: Arc::new(Mutex::new(VecDeque::with_capacity(
                NETWORK_MESSAGE_QUEUE_CAPACITY,
            ))),
        }
    }
}

/// Who this client is, resolved from the arguments and local storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_name: String,
    pub session_id: String,
}

impl Identity {
    pub fn resolve(args: &ClientArgs, local_storage: Option<LocalStorage>) -> Self {
        let local_storage = local_storage.unwrap_or_default();

        let user_name = args
            .user
            .clone()
            .or(local_storage.user_name)
            .filter(|user_name| !user_name.trim().is_empty())
            .unwrap_or_else(utils::generate_name);

        let session_id = local_storage
            .session_id
            .filter(|_| !args.new_session)
            .unwrap_or_else(|| utils::generate_time_ordered_id("session"));

        Self {
            user_name,
            session_id,
        }
    }
}

fn random_room_name() -> String {
    let mut rng = rand::thread_rng();
    rng.gen_range(100000..1000000).to_string()
}

/// The room the client is currently polling
struct ActiveRoom {
    session: Session,
    last_update: u64,
}

impl NetworkClient {
    #[tokio::main]
    pub async fn start_network_client(
        &mut self,
        mut message_receiver: mpsc::UnboundedReceiver<types::Request>,
        config: ClientConfig,
        args: ClientArgs,
    ) {
        let mut client = match PokerClient::connect(config.server_url.clone()).await {
            Ok(grpc_client) => {
                let message = format!(
                    "Successfully connected to server at address {}",
                    config.server_url
                );
                self.push_user_event(UserEvent::InfoMessage(message));
                grpc_client
            }

            Err(network_error) => {
                let error = format!("Connection to server failed {network_error:?}");
                self.push_user_event(UserEvent::NetworkError(error));
                return;
            }
        };

        // Read the client details from local storage for a returning user
        let local_storage = utils::read_local_storage::<LocalStorage>(LOCAL_STORAGE_FILE).await;
        let identity = Identity::resolve(&args, local_storage);

        // Persist the identity so that a restarted client keeps its name in the rooms
        let local_storage_data =
            LocalStorage::new(identity.user_name.clone(), identity.session_id.clone());
        if let Err(error) = utils::write_local_storage(LOCAL_STORAGE_FILE, &local_storage_data).await
        {
            log::warn!("Could not write local storage: {error}");
        }

        self.push_user_event(UserEvent::InfoMessage(format!(
            "Playing as {}",
            identity.user_name
        )));

        let mut active_room = match args.room {
            Some(room_name) => self.join_room(&mut client, &identity, Some(room_name)).await,
            None => None,
        };

        let mut poll_interval =
            tokio::time::interval(Duration::from_millis(config.poll_interval_millis));
        poll_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                message = message_receiver.recv() => match message {
                    Some(types::Request::JoinRoom { room_name }) => {
                        if let Some(room) = self.join_room(&mut client, &identity, room_name).await {
                            active_room = Some(room);
                        }
                    }
                    Some(types::Request::CastVote(vote)) => {
                        if let Some(room) = active_room.as_mut() {
                            let request = CastVoteRequest {
                                session: Some(room.session.clone()),
                                vote,
                            };
                            if client.cast_vote(request).await.error_handler(self).is_some() {
                                self.poll_room(&mut client, room).await;
                            }
                        } else {
                            self.push_user_event(UserEvent::InfoMessage(
                                "Join a room before voting".to_string(),
                            ));
                        }
                    }
                    Some(types::Request::ResetVotes) => {
                        if let Some(room) = active_room.as_mut() {
                            let request = ResetVotesRequest {
                                session: Some(room.session.clone()),
                            };
                            if client.reset_votes(request).await.error_handler(self).is_some() {
                                self.poll_room(&mut client, room).await;
                            }
                        }
                    }
                    Some(types::Request::Quit) | None => return,
                },
                _ = poll_interval.tick() => match active_room.as_mut() {
                    Some(room) => self.poll_room(&mut client, room).await,
                    None => self.list_rooms(&mut client).await,
                },
            }
        }
    }

    async fn join_room(
        &self,
        client: &mut PokerClient<Channel>,
        identity: &Identity,
        room_name: Option<String>,
    ) -> Option<ActiveRoom> {
        let room_name = room_name
            .filter(|room_name| !room_name.trim().is_empty())
            .unwrap_or_else(random_room_name);

        let request = JoinRoomRequest {
            room_name,
            user_name: identity.user_name.clone(),
            session_id: Some(identity.session_id.clone()),
        };

        let session = client
            .join_room(request)
            .await
            .error_handler(self)
            .and_then(|response| response.session)?;

        self.push_user_event(UserEvent::RoomJoined {
            room_name: session.room_name.clone(),
            user_name: session.user_name.clone(),
        });

        let mut room = ActiveRoom {
            session,
            last_update: 0,
        };
        self.poll_room(client, &mut room).await;
        Some(room)
    }

    /// Fetch the votes of the room, this also keeps the user alive in the room
    async fn poll_room(&self, client: &mut PokerClient<Channel>, room: &mut ActiveRoom) {
        let request = RoomSnapshotRequest {
            session: Some(room.session.clone()),
            last_update: room.last_update,
        };

        if let Some(snapshot) = client.room_snapshot(request).await.error_handler(self) {
            if snapshot.not_modified {
                return;
            }

            room.last_update = snapshot.last_update;
            let room_view = RoomView::from_snapshot(room.session.room_name.clone(), snapshot);
            self.push_user_event(UserEvent::RoomUpdated(room_view));
        }
    }

    async fn list_rooms(&self, client: &mut PokerClient<Channel>) {
        if let Some(response) = client.list_rooms(Empty {}).await.error_handler(self) {
            let rooms = response.rooms.into_iter().map(From::from).collect();
            self.push_user_event(UserEvent::RoomsListed(rooms));
        }
    }

    fn push_user_event(&self, event: UserEvent) {
        tracing::debug!(push_user_event=?event);
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(event)
    }
}

impl Poll<UserEvent> for NetworkClient {
    fn poll(&mut self) -> tuirealm::listener::ListenerResult<Option<tuirealm::Event<UserEvent>>> {
        Ok(self
            .messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .map(tuirealm::Event::User))
    }
}
