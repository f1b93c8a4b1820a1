pub mod auth;
pub mod bill;
pub mod dashboard;
pub mod inventory;
pub mod job_card;
pub mod notification;
