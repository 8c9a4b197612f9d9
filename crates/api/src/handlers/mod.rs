pub mod admin;
pub mod announcements;
pub mod auth;
pub mod dashboard;
pub mod emergency;
pub mod finance;
pub mod gate;
pub mod guests;
pub mod marketplace;
pub mod parking;
pub mod reservations;
pub mod service_logs;
pub mod service_requests;
pub mod site_events;
pub mod staff_locations;
