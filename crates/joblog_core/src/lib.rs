//! Core domain logic for JobLog.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod insights;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{Config, ConfigError, ConfigResult, Theme};
pub use insights::finance::{
    shift_week, week_window, weekly_summary, DayGroup, WeekWindow, WeeklySummary,
};
pub use insights::jobs::{group_by_salary_bucket, group_by_status, sort_jobs, JobSortKey};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::job::{
    Job, JobDocument, JobId, JobLink, JobNote, JobStatus, JobTask, LinkKind, SalaryBucket,
};
pub use model::txn::{AccountType, Recurrence, Txn, TxnId};
pub use model::user::{User, UserId};
pub use repo::job_repo::{JobListQuery, JobRepository, SqliteJobRepository};
pub use repo::txn_repo::{SqliteTxnRepository, TxnListQuery, TxnRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::finance_service::FinanceService;
pub use service::job_service::JobService;
pub use service::user_service::UserService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
