//! Resident and gate console client for the site management API.
//!
//! Wraps the REST API, keeps an on-disk cache for the parking board,
//! follows realtime row changes over WebSocket and drives the emergency
//! overlay.

pub mod api;
pub mod cache;
pub mod config;
pub mod emergency;
pub mod error;
pub mod models;
pub mod parking_board;
pub mod realtime;

pub use error::ClientError;
