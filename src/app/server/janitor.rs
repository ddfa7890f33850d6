use std::time::Duration;

use super::grpc::storage::{interface::room::RoomInterface, Store};

/// Periodically expire idle users and old rooms, independently of the incoming requests
pub fn spawn_janitor(store: Store, period: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let report = store.sweep();
            if report.expired_users > 0 || !report.expired_rooms.is_empty() {
                tracing::info!(
                    expired_users = report.expired_users,
                    expired_rooms = ?report.expired_rooms,
                    "Background sweep"
                );
            }
        }
    })
}
