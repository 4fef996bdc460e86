pub mod directory;
pub mod drivers;
pub mod health;
pub mod stations;
