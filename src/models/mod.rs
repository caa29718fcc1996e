pub mod location;
pub mod location_form;
pub mod location_response;
