use clap::Parser;
use pokerroom::app::{server::start_server, types, utils};

#[derive(clap::Parser, Debug)]
#[command(version, about = "Planning poker server", long_about = None)]
struct ServerArgs {
    /// Path to the server configuration
    #[arg(short, long, default_value = "config/server.toml")]
    config: String,
    /// Hostname of the server, overrides the configuration
    #[arg(long)]
    host: Option<String>,
    /// Port on which to listen, overrides the configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let formatter = tracing_subscriber::fmt::format()
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::fmt().event_format(formatter).init();

    let args = ServerArgs::parse();
    let mut config =
        utils::read_config::<types::ServerConfig>(&args.config, Some("POKERROOM_SERVER"))?;

    let mut server_config = config.server.take().unwrap_or_default();
    if let Some(host) = args.host {
        server_config.host = host;
    }
    if let Some(port) = args.port {
        server_config.port = port;
    }

    let server_address = format!("{}:{}", server_config.host, server_config.port);
    tracing::info!("Attempting to run server on {:?}", server_address);

    let tcp_listener = tokio::net::TcpListener::bind(&server_address).await?;

    start_server(config, tcp_listener).await
}
