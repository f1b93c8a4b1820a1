//! Domain logic for the workshop service.
//!
//! Everything in this crate is free of I/O: identifiers, errors, roles, the
//! job card status machine, billing arithmetic, and the part catalog contract
//! that the database layer implements.

pub mod billing;
pub mod error;
pub mod inventory;
pub mod job_card;
pub mod job_status;
pub mod notifications;
pub mod roles;
pub mod search;
pub mod types;
