//! Job list sorting and grouping.
//!
//! # Responsibility
//! - Provide the comparator set used by job list screens.
//! - Group jobs by pipeline status and by salary band.
//!
//! # Invariants
//! - Sorting is stable: ties keep their input order, and re-sorting an
//!   already sorted slice is a no-op.
//! - Grouping never invents or drops jobs; every input job lands in at
//!   most one group.

use crate::model::job::{Job, JobStatus, SalaryBucket};
use serde::Serialize;
use std::cmp::Ordering;

/// Sort order selector for job lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSortKey {
    /// Pipeline order, `Docket` first.
    Status,
    /// Highest salary first; jobs without a salary sort last.
    SalaryDescending,
    /// Lowest salary first; jobs without a salary still sort last.
    SalaryAscending,
    /// Most open tasks first.
    OpenTasksDescending,
    /// Newest first.
    DateCreatedDescending,
}

impl JobSortKey {
    /// Comparator for this sort key.
    ///
    /// Every key compares only its own dimension and reports `Equal` for
    /// ties, so the stable sort below preserves input order between equal
    /// jobs.
    pub fn compare(self, a: &Job, b: &Job) -> Ordering {
        match self {
            JobSortKey::Status => a.status.cmp(&b.status),
            JobSortKey::SalaryDescending => {
                // Unknown salary maps below every real value so it always
                // trails in descending order.
                let ka = a.salary_k.map_or(i64::MIN, i64::from);
                let kb = b.salary_k.map_or(i64::MIN, i64::from);
                kb.cmp(&ka)
            }
            JobSortKey::SalaryAscending => {
                // Unknown salary maps above every real value so it also
                // trails in ascending order.
                let ka = a.salary_k.map_or(i64::MAX, i64::from);
                let kb = b.salary_k.map_or(i64::MAX, i64::from);
                ka.cmp(&kb)
            }
            JobSortKey::OpenTasksDescending => b.open_tasks_count().cmp(&a.open_tasks_count()),
            JobSortKey::DateCreatedDescending => b.created_at.cmp(&a.created_at),
        }
    }
}

/// Returns a sorted copy of `jobs`; the input slice stays untouched.
pub fn sort_jobs(jobs: &[Job], key: JobSortKey) -> Vec<Job> {
    let mut sorted = jobs.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

/// Jobs sharing one pipeline status, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusGroup {
    pub status: JobStatus,
    pub jobs: Vec<Job>,
}

/// Groups jobs by status in pipeline order, omitting empty stages.
///
/// Concatenating the groups yields every input job exactly once.
pub fn group_by_status(jobs: &[Job]) -> Vec<StatusGroup> {
    JobStatus::ALL
        .iter()
        .filter_map(|&status| {
            let members: Vec<Job> = jobs
                .iter()
                .filter(|job| job.status == status)
                .cloned()
                .collect();
            if members.is_empty() {
                None
            } else {
                Some(StatusGroup {
                    status,
                    jobs: members,
                })
            }
        })
        .collect()
}

/// Jobs sharing one salary band, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketGroup {
    pub bucket: SalaryBucket,
    pub jobs: Vec<Job>,
}

/// Groups jobs by salary band in ascending band order, omitting empty
/// bands. Jobs without a salary belong to no band and are excluded.
pub fn group_by_salary_bucket(jobs: &[Job]) -> Vec<BucketGroup> {
    SalaryBucket::ALL
        .iter()
        .filter_map(|&bucket| {
            let members: Vec<Job> = jobs
                .iter()
                .filter(|job| job.salary_bucket() == Some(bucket))
                .cloned()
                .collect();
            if members.is_empty() {
                None
            } else {
                Some(BucketGroup {
                    bucket,
                    jobs: members,
                })
            }
        })
        .collect()
}
