pub mod factory;
pub mod flights;
pub mod maps;
pub mod scheduling;
