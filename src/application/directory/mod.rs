pub mod get_admin;
pub mod get_station;
pub mod list_station_drivers;
pub mod list_sub_stations;
