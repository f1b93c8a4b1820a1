//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or an open transaction) as the first argument. The one
//! exception is [`InventoryRepo`], which owns its pool so it can stand behind
//! the `PartCatalog` trait object.

pub mod bill_repo;
pub mod dashboard_repo;
pub mod inventory_repo;
pub mod job_card_repo;
pub mod notification_repo;
pub mod user_repo;

pub use bill_repo::BillRepo;
pub use dashboard_repo::DashboardRepo;
pub use inventory_repo::InventoryRepo;
pub use job_card_repo::JobCardRepo;
pub use notification_repo::NotificationRepo;
pub use user_repo::UserRepo;
