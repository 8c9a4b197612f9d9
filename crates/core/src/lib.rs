//! Domain rules for the residential site platform.
//!
//! Everything in this crate is pure: no I/O, no database access. The
//! database and API layers call into these modules to validate input and
//! to decide which state transitions are allowed.

pub mod emergency;
pub mod error;
pub mod finance;
pub mod guest_pass;
pub mod marketplace;
pub mod parking;
pub mod reservation;
pub mod roles;
pub mod service;
pub mod staff_location;
pub mod status;
pub mod types;
pub mod validation;
