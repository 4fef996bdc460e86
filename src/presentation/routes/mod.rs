pub mod directory;
pub mod drivers;
pub mod stations;
