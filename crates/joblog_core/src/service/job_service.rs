//! Job use-case service.
//!
//! # Responsibility
//! - Provide create/update/get/list/delete APIs for jobs and their
//!   children.
//! - Normalize form input: trim text fields, drop empty optionals, parse
//!   link URLs.
//!
//! # Invariants
//! - Title and company are required on every write path.
//! - New jobs start in `Applied` unless the caller picks a stage.
//! - Contact/location collapse to `None` when blank after trimming.

use crate::model::job::{
    DocumentId, Job, JobDocument, JobId, JobLink, JobNote, JobStatus, JobTask, LinkId, NoteId,
    TaskId,
};
use crate::repo::job_repo::{JobListQuery, JobRepository};
use crate::repo::{RepoError, RepoResult};
use crate::service::non_empty;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

/// Service error for job use-cases.
#[derive(Debug)]
pub enum JobServiceError {
    /// Job title is empty after trimming.
    EmptyTitle,
    /// Company name is empty after trimming.
    EmptyCompany,
    /// Note text is empty after trimming.
    EmptyNoteText,
    /// Task title is empty after trimming.
    EmptyTaskTitle,
    /// Link title is empty after trimming.
    EmptyLinkTitle,
    /// Link target does not parse as a URL.
    InvalidUrl(String),
    /// Document name is empty after trimming.
    EmptyDocumentName,
    /// Document path is empty after trimming.
    EmptyDocumentPath,
    /// Target job does not exist.
    JobNotFound(JobId),
    /// Target task does not exist on the job.
    TaskNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for JobServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "job title must not be empty"),
            Self::EmptyCompany => write!(f, "company must not be empty"),
            Self::EmptyNoteText => write!(f, "note text must not be empty"),
            Self::EmptyTaskTitle => write!(f, "task title must not be empty"),
            Self::EmptyLinkTitle => write!(f, "link title must not be empty"),
            Self::InvalidUrl(value) => write!(f, "invalid url: `{value}`"),
            Self::EmptyDocumentName => write!(f, "document name must not be empty"),
            Self::EmptyDocumentPath => write!(f, "document path must not be empty"),
            Self::JobNotFound(id) => write!(f, "job not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JobServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for JobServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity: "job", id } => Self::JobNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Request model for creating a job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub contact: Option<String>,
    /// `None` falls back to `JobStatus::Applied`.
    pub status: Option<JobStatus>,
    pub location: Option<String>,
    pub salary_k: Option<u32>,
}

/// Job service facade over repository implementations.
pub struct JobService<R: JobRepository> {
    repo: R,
}

impl<R: JobRepository> JobService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one job from form input.
    ///
    /// # Contract
    /// - Title and company are trimmed and must remain non-empty.
    /// - Blank contact/location collapse to `None`.
    /// - Missing status defaults to `Applied`.
    pub fn add_job(&self, input: NewJob) -> Result<Job, JobServiceError> {
        let title = non_empty(&input.title).ok_or(JobServiceError::EmptyTitle)?;
        let company = non_empty(&input.company).ok_or(JobServiceError::EmptyCompany)?;

        let mut job = Job::new(title, company);
        job.contact = input.contact.as_deref().and_then(non_empty);
        job.location = input.location.as_deref().and_then(non_empty);
        job.salary_k = input.salary_k;
        if let Some(status) = input.status {
            job.status = status;
        }

        self.repo.create_job(&job)?;
        Ok(job)
    }

    /// Updates a job's scalar fields. Children are managed by the
    /// dedicated child operations.
    pub fn update_job(&self, job: &Job) -> Result<(), JobServiceError> {
        if job.title.trim().is_empty() {
            return Err(JobServiceError::EmptyTitle);
        }
        if job.company.trim().is_empty() {
            return Err(JobServiceError::EmptyCompany);
        }

        self.repo.update_job(job)?;
        Ok(())
    }

    /// Gets one job with children by stable ID.
    pub fn get_job(&self, id: JobId) -> RepoResult<Option<Job>> {
        self.repo.get_job(id)
    }

    /// Lists jobs newest-first with optional status filter and pagination.
    pub fn list_jobs(&self, query: &JobListQuery) -> RepoResult<Vec<Job>> {
        self.repo.list_jobs(query)
    }

    /// Deletes one job and everything attached to it.
    pub fn delete_job(&self, id: JobId) -> Result<(), JobServiceError> {
        self.repo.delete_job(id)?;
        Ok(())
    }

    /// Attaches a note; the text is trimmed and must remain non-empty.
    pub fn add_note(
        &self,
        job_id: JobId,
        text: impl Into<String>,
    ) -> Result<JobNote, JobServiceError> {
        let text = text.into();
        let text = non_empty(&text).ok_or(JobServiceError::EmptyNoteText)?;

        let note = JobNote::new(text);
        self.repo.add_note(job_id, &note)?;
        Ok(note)
    }

    /// Removes one note.
    pub fn delete_note(&self, id: NoteId) -> Result<(), JobServiceError> {
        self.repo.delete_note(id)?;
        Ok(())
    }

    /// Attaches a task; the title is trimmed and must remain non-empty.
    pub fn add_task(
        &self,
        job_id: JobId,
        title: impl Into<String>,
        due_date: Option<NaiveDate>,
    ) -> Result<JobTask, JobServiceError> {
        let title = title.into();
        let title = non_empty(&title).ok_or(JobServiceError::EmptyTaskTitle)?;

        let task = JobTask::new(title, due_date);
        self.repo.add_task(job_id, &task)?;
        Ok(task)
    }

    /// Flips a task's completion flag and returns the new state.
    pub fn toggle_task(&self, job_id: JobId, task_id: TaskId) -> Result<bool, JobServiceError> {
        let job = self
            .repo
            .get_job(job_id)?
            .ok_or(JobServiceError::JobNotFound(job_id))?;
        let task = job
            .tasks
            .iter()
            .find(|task| task.id == task_id)
            .ok_or(JobServiceError::TaskNotFound(task_id))?;

        let next = !task.is_completed;
        self.repo.set_task_completed(task_id, next)?;
        Ok(next)
    }

    /// Removes one task.
    pub fn delete_task(&self, id: TaskId) -> Result<(), JobServiceError> {
        self.repo.delete_task(id)?;
        Ok(())
    }

    /// Attaches a link after validating title and URL text.
    pub fn add_link(
        &self,
        job_id: JobId,
        title: impl Into<String>,
        url_text: &str,
    ) -> Result<JobLink, JobServiceError> {
        let title = title.into();
        let title = non_empty(&title).ok_or(JobServiceError::EmptyLinkTitle)?;

        let trimmed = url_text.trim();
        let url =
            Url::parse(trimmed).map_err(|_| JobServiceError::InvalidUrl(trimmed.to_string()))?;

        let link = JobLink::new(title, url);
        self.repo.add_link(job_id, &link)?;
        Ok(link)
    }

    /// Removes one link.
    pub fn delete_link(&self, id: LinkId) -> Result<(), JobServiceError> {
        self.repo.delete_link(id)?;
        Ok(())
    }

    /// Attaches a document reference; name and path must be non-empty.
    pub fn add_document(
        &self,
        job_id: JobId,
        name: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Result<JobDocument, JobServiceError> {
        let name = name.into();
        let name = non_empty(&name).ok_or(JobServiceError::EmptyDocumentName)?;
        let file_path = file_path.into();
        let file_path = non_empty(&file_path).ok_or(JobServiceError::EmptyDocumentPath)?;

        let document = JobDocument::new(name, file_path);
        self.repo.add_document(job_id, &document)?;
        Ok(document)
    }

    /// Removes one document reference; the file itself is never touched.
    pub fn delete_document(&self, id: DocumentId) -> Result<(), JobServiceError> {
        self.repo.delete_document(id)?;
        Ok(())
    }
}

/// Converts a dollar figure from a form slider/field into stored
/// integer thousands.
///
/// Rules:
/// - Rounds to the nearest thousand.
/// - Negative input clamps to zero; `None` stays unknown.
pub fn salary_k_from_dollars(dollars: Option<f64>) -> Option<u32> {
    dollars.map(|value| {
        let thousands = (value / 1000.0).round();
        if thousands <= 0.0 {
            0
        } else if thousands >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            thousands as u32
        }
    })
}

#[cfg(test)]
mod tests {
    use super::salary_k_from_dollars;

    #[test]
    fn salary_conversion_rounds_to_nearest_thousand() {
        assert_eq!(salary_k_from_dollars(Some(120_000.0)), Some(120));
        assert_eq!(salary_k_from_dollars(Some(120_499.0)), Some(120));
        assert_eq!(salary_k_from_dollars(Some(120_500.0)), Some(121));
    }

    #[test]
    fn salary_conversion_clamps_negative_to_zero() {
        assert_eq!(salary_k_from_dollars(Some(-5_000.0)), Some(0));
    }

    #[test]
    fn salary_conversion_keeps_unknown() {
        assert_eq!(salary_k_from_dollars(None), None);
    }
}
