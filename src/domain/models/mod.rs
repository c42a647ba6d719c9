pub mod booking;
pub mod flight;
pub mod provider;
pub mod trip;
pub mod verification;
