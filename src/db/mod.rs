pub mod location_store;
pub mod mongo;
