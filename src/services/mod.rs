pub mod geo;
pub mod location_service;
