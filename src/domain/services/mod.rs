pub mod availability;
pub mod booking_builder;
pub mod booking_flow;
pub mod field_resolution;
pub mod flights;
pub mod metadata;
pub mod normalize;
pub mod pricing;
pub mod reference;
pub mod validation;
pub mod verification;
