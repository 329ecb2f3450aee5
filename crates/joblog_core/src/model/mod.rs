//! Domain model for the job-application and finance tracker.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep derived display values (salary text, bucket, open-task counts)
//!   next to the data they are computed from.
//!
//! # Invariants
//! - Every domain object is identified by a stable uuid alias.
//! - Records hold whatever values callers put in them; validation lives in
//!   the service layer, not here.

pub mod job;
pub mod txn;
pub mod user;
