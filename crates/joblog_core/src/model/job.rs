//! Job application domain model.
//!
//! # Responsibility
//! - Define the job record and its owned note/task/link/document children.
//! - Provide the derived display properties (salary text, salary bucket,
//!   open-task count) recomputed on demand.
//!
//! # Invariants
//! - `id` is stable and never reused for another job.
//! - Children belong to exactly one job for their whole lifetime.
//! - `salary_bucket()` is defined if and only if `salary_k` is present.
//!
//! # See also
//! - DESIGN.md (salary representation and aggregate-root decisions)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Stable identifier for a job application.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type JobId = Uuid;
/// Stable identifier for a note attached to a job.
pub type NoteId = Uuid;
/// Stable identifier for a task attached to a job.
pub type TaskId = Uuid;
/// Stable identifier for a link attached to a job.
pub type LinkId = Uuid;
/// Stable identifier for a document reference attached to a job.
pub type DocumentId = Uuid;

/// Pipeline stage of a job application.
///
/// Declaration order is the pipeline order and is what status sorting and
/// grouping rely on, so new stages must be inserted where they belong in
/// the pipeline, not appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// On the radar, nothing done yet.
    Docket,
    /// Researching the company/role.
    Research,
    /// Application submitted.
    Applied,
    /// Someone on the other side replied.
    Contacted,
    /// Interview loop in progress.
    Interviewing,
    /// Offer received.
    Offer,
    /// Rejected by the company.
    Rejected,
    /// Withdrawn by the applicant.
    Withdrawn,
}

impl JobStatus {
    /// All statuses in pipeline order.
    pub const ALL: [JobStatus; 8] = [
        JobStatus::Docket,
        JobStatus::Research,
        JobStatus::Applied,
        JobStatus::Contacted,
        JobStatus::Interviewing,
        JobStatus::Offer,
        JobStatus::Rejected,
        JobStatus::Withdrawn,
    ];

    /// Human-readable stage name for list headers and pickers.
    pub fn display_name(self) -> &'static str {
        match self {
            JobStatus::Docket => "Docket",
            JobStatus::Research => "Research",
            JobStatus::Applied => "Applied",
            JobStatus::Contacted => "Contacted",
            JobStatus::Interviewing => "Interviewing",
            JobStatus::Offer => "Offer",
            JobStatus::Rejected => "Rejected",
            JobStatus::Withdrawn => "Withdrawn",
        }
    }
}

/// Salary band used for grouping jobs by compensation.
///
/// Band order follows ascending salary so the enum's `Ord` matches the
/// display order of grouped sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryBucket {
    Under50,
    From50To75,
    From75To100,
    From100To150,
    Above150,
}

impl SalaryBucket {
    /// All buckets in ascending salary order.
    pub const ALL: [SalaryBucket; 5] = [
        SalaryBucket::Under50,
        SalaryBucket::From50To75,
        SalaryBucket::From75To100,
        SalaryBucket::From100To150,
        SalaryBucket::Above150,
    ];

    /// Classifies an annual salary given in thousands of dollars.
    ///
    /// Boundaries are half-open: 49 is `Under50`, 50 is `From50To75`,
    /// 149 is `From100To150`, 150 is `Above150`.
    pub fn for_thousands(salary_k: u32) -> SalaryBucket {
        match salary_k {
            0..=49 => SalaryBucket::Under50,
            50..=74 => SalaryBucket::From50To75,
            75..=99 => SalaryBucket::From75To100,
            100..=149 => SalaryBucket::From100To150,
            _ => SalaryBucket::Above150,
        }
    }

    /// Section header text for bucket-grouped lists.
    pub fn label(self) -> &'static str {
        match self {
            SalaryBucket::Under50 => "Under 50k",
            SalaryBucket::From50To75 => "50k–75k",
            SalaryBucket::From75To100 => "75k–100k",
            SalaryBucket::From100To150 => "100k–150k",
            SalaryBucket::Above150 => "150k+",
        }
    }
}

/// Free-form dated note attached to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobNote {
    pub id: NoteId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl JobNote {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// Actionable to-do attached to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTask {
    pub id: TaskId,
    pub title: String,
    /// Calendar day only; tasks carry no time-of-day.
    pub due_date: Option<NaiveDate>,
    pub is_completed: bool,
}

impl JobTask {
    /// New task starts open.
    pub fn new(title: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            due_date,
            is_completed: false,
        }
    }
}

/// Rough origin of a link target, derived from its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Linkedin,
    Github,
    Other,
}

/// External resource (posting, profile, company page) attached to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobLink {
    pub id: LinkId,
    pub title: String,
    /// Well-formedness is guaranteed by the type; the service layer is the
    /// parse site for raw user input.
    pub url: Url,
}

impl JobLink {
    pub fn new(title: impl Into<String>, url: Url) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            url,
        }
    }

    /// Classifies the link target so callers can pick an icon for it.
    pub fn kind(&self) -> LinkKind {
        let host = self.url.host_str().unwrap_or_default();
        if host == "linkedin.com" || host.ends_with(".linkedin.com") {
            LinkKind::Linkedin
        } else if host == "github.com" || host.ends_with(".github.com") {
            LinkKind::Github
        } else {
            LinkKind::Other
        }
    }
}

/// Reference to a file kept alongside a job (resume, cover letter, offer).
///
/// The core never reads file contents; `file_path` is an opaque location
/// owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDocument {
    pub id: DocumentId,
    pub name: String,
    pub file_path: String,
    pub added_at: DateTime<Utc>,
    /// Whether the caller may rewrite the file in place.
    pub is_mutable: bool,
}

impl JobDocument {
    pub fn new(name: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            file_path: file_path.into(),
            added_at: Utc::now(),
            is_mutable: false,
        }
    }
}

/// One tracked job application and everything attached to it.
///
/// The record is passive: any string or number the caller supplies is
/// accepted as-is, and the derived accessors below never cache results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Stable global ID used for linking and auditing.
    pub id: JobId,
    pub title: String,
    pub company: String,
    /// Contact person on the company side, when known.
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: JobStatus,
    pub location: Option<String>,
    /// Annual salary in thousands of dollars. `None` means "not known",
    /// which is distinct from zero.
    pub salary_k: Option<u32>,
    /// Newest first once loaded from storage.
    pub notes: Vec<JobNote>,
    /// Insertion order.
    pub tasks: Vec<JobTask>,
    /// Insertion order.
    pub links: Vec<JobLink>,
    /// Oldest first once loaded from storage.
    pub documents: Vec<JobDocument>,
}

impl Job {
    /// Creates a new job with a generated stable ID.
    ///
    /// New applications start in `Applied` with empty child collections.
    pub fn new(title: impl Into<String>, company: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, company)
    }

    /// Creates a new job with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: JobId, title: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            company: company.into(),
            contact: None,
            created_at: Utc::now(),
            status: JobStatus::Applied,
            location: None,
            salary_k: None,
            notes: Vec::new(),
            tasks: Vec::new(),
            links: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Annual salary in whole dollars, when known.
    pub fn salary_in_dollars(&self) -> Option<u64> {
        self.salary_k.map(|k| u64::from(k) * 1000)
    }

    /// Compact salary text: `"$120k"`, or an em-dash placeholder when the
    /// salary is unknown.
    pub fn salary_display(&self) -> String {
        match self.salary_k {
            Some(k) => format!("${k}k"),
            None => "—".to_string(),
        }
    }

    /// Number of tasks still open. Counted on every call, never cached.
    pub fn open_tasks_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_completed).count()
    }

    /// Salary band for grouping, when the salary is known.
    pub fn salary_bucket(&self) -> Option<SalaryBucket> {
        self.salary_k.map(SalaryBucket::for_thousands)
    }
}
