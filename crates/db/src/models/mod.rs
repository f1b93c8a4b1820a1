//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching a table, plus
//! the `Deserialize` input DTOs used to create or change it. Enumerated
//! columns are stored as TEXT and kept as `String` on the row; accessors
//! parse them into the domain enums from `workshop_core`.

pub mod bill;
pub mod dashboard;
pub mod inventory;
pub mod job_card;
pub mod notification;
pub mod user;
