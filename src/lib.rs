pub mod api;
pub mod blockchain;
pub mod config;
pub mod consensus;
pub mod network;
pub mod node;
pub mod transaction;
