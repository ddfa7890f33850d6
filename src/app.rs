pub mod client;
pub mod server;
pub mod types;
pub mod utils;
