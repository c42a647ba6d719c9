pub mod booking;
pub mod distance;
pub mod flights;
pub mod health;
pub mod route_map;
pub mod verify;
