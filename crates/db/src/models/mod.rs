//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) where the table supports patches

pub mod announcement;
pub mod dashboard;
pub mod emergency_alert;
pub mod guest;
pub mod marketplace_item;
pub mod parking_spot;
pub mod profile;
pub mod reservation;
pub mod service_log;
pub mod service_request;
pub mod session;
pub mod site_event;
pub mod staff_location;
pub mod transaction;
