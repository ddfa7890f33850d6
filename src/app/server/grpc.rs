pub mod functions;
pub mod server;
pub mod storage;
pub mod types;
pub mod utils;
