//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod announcement_repo;
pub mod dashboard_repo;
pub mod emergency_alert_repo;
pub mod guest_repo;
pub mod marketplace_item_repo;
pub mod parking_spot_repo;
pub mod profile_repo;
pub mod reservation_repo;
pub mod service_log_repo;
pub mod service_request_repo;
pub mod session_repo;
pub mod site_event_repo;
pub mod staff_location_repo;
pub mod transaction_repo;

pub use announcement_repo::AnnouncementRepo;
pub use dashboard_repo::DashboardRepo;
pub use emergency_alert_repo::EmergencyAlertRepo;
pub use guest_repo::GuestRepo;
pub use marketplace_item_repo::MarketplaceItemRepo;
pub use parking_spot_repo::ParkingSpotRepo;
pub use profile_repo::ProfileRepo;
pub use reservation_repo::ReservationRepo;
pub use service_log_repo::ServiceLogRepo;
pub use service_request_repo::ServiceRequestRepo;
pub use session_repo::SessionRepo;
pub use site_event_repo::SiteEventRepo;
pub use staff_location_repo::StaffLocationRepo;
pub use transaction_repo::TransactionRepo;
