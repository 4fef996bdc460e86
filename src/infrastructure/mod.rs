pub mod auth;
pub mod config;
pub mod db;
pub mod firebase;
pub mod mock;
pub mod password;
pub mod state;
pub mod store;
