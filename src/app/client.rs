pub mod components;
pub mod layout;
pub mod model;
pub mod network;
pub mod transformers;
pub mod types;
