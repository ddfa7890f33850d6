use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::app::server::{errors::StoreError, grpc::types::RoomSettings};

pub mod clock;
pub mod interface;
pub mod models;

use clock::Clock;

/// A room is locked on its own, so work in one room never waits on another
pub type SharedRoom = Arc<Mutex<models::Room>>;

/// Every live room, keyed by the room name
type RoomRegistry = Arc<Mutex<HashMap<String, SharedRoom>>>;

/// In-memory store holding all the rooms of this instance of the application
///
/// Lock order is always the registry first, then a room.
#[derive(Clone)]
pub struct Store {
    rooms: RoomRegistry,
    clock: Arc<dyn Clock>,
    settings: RoomSettings,
}

impl Store {
    pub fn new(settings: RoomSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Arc::new(Mutex::new(HashMap::new())),
            clock,
            settings,
        }
    }

    fn lock_registry(&self) -> MutexGuard<'_, HashMap<String, SharedRoom>> {
        self.rooms
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub(crate) fn lock_room(room: &SharedRoom) -> MutexGuard<'_, models::Room> {
    room.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl interface::StorageInterface for Store {}

type StorageResult<T> = Result<T, StoreError>;
