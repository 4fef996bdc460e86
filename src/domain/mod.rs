pub mod admins;
pub mod auth;
pub mod documents;
pub mod drivers;
pub mod identity;
pub mod password;
pub mod stations;
