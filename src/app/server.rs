pub mod errors;
pub mod grpc;
pub mod janitor;

use std::{sync::Arc, time::Duration};

use grpc::{
    server::{poker_server, PokerGrpc, FILE_DESCRIPTOR_SET},
    storage::{
        clock::{Clock, SystemClock},
        Store,
    },
    types::RoomSettings,
};

use crate::app::types;

pub type ServerResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Run the grpc server on an already bound listener until it fails
pub async fn start_server(
    config: types::ServerConfig,
    tcp_listener: tokio::net::TcpListener,
) -> ServerResult<()> {
    start_server_with_clock(config, tcp_listener, Arc::new(SystemClock)).await
}

pub async fn start_server_with_clock(
    config: types::ServerConfig,
    tcp_listener: tokio::net::TcpListener,
    clock: Arc<dyn Clock>,
) -> ServerResult<()> {
    let rooms_config = config.rooms.unwrap_or_default();
    let settings = RoomSettings::from(&rooms_config);
    tracing::info!(?settings, "Room settings");

    let store = Store::new(settings, clock);

    let janitor = (rooms_config.sweep_interval_secs > 0).then(|| {
        janitor::spawn_janitor(
            store.clone(),
            Duration::from_secs(rooms_config.sweep_interval_secs),
        )
    });

    let service = PokerGrpc::new(store);

    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build()?;

    let addr = tcp_listener.local_addr()?;
    tracing::info!("Server successfully running on {:?}", addr);

    let result = tonic::transport::Server::builder()
        .add_service(reflection_service)
        .add_service(poker_server::PokerServer::new(service))
        .serve_with_incoming(tokio_stream::wrappers::TcpListenerStream::new(tcp_listener))
        .await;

    if let Some(janitor) = janitor {
        janitor.abort();
    }

    Ok(result?)
}
