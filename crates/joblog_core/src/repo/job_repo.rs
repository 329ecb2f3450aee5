//! Job repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs for jobs and their owned note/task/link/document
//!   rows.
//! - Keep SQL details and child-row ordering inside the repository
//!   boundary.
//!
//! # Invariants
//! - A loaded `Job` always carries its full child collections.
//! - Job listing is deterministic: `created_at DESC, uuid ASC`.
//! - Deleting a job removes every child row in the same transaction; no
//!   orphans survive.

use crate::model::job::{
    DocumentId, Job, JobDocument, JobId, JobLink, JobNote, JobStatus, JobTask, LinkId, NoteId,
    TaskId,
};
use crate::repo::{
    bool_to_int, datetime_from_ms, parse_bool, parse_uuid, RepoError, RepoResult,
};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use url::Url;
use uuid::Uuid;

const JOB_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    company,
    contact,
    status,
    location,
    salary_k,
    created_at
FROM jobs";

/// Query options for listing jobs.
#[derive(Debug, Clone, Default)]
pub struct JobListQuery {
    pub status: Option<JobStatus>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for jobs and their child records.
pub trait JobRepository {
    /// Persists one job together with any children it already carries.
    fn create_job(&self, job: &Job) -> RepoResult<JobId>;
    /// Updates the job's scalar columns; children are managed separately.
    fn update_job(&self, job: &Job) -> RepoResult<()>;
    /// Loads one job with all child collections.
    fn get_job(&self, id: JobId) -> RepoResult<Option<Job>>;
    /// Lists jobs newest-first with child collections loaded.
    fn list_jobs(&self, query: &JobListQuery) -> RepoResult<Vec<Job>>;
    /// Deletes one job and every child row it owns.
    fn delete_job(&self, id: JobId) -> RepoResult<()>;
    /// Attaches one note to an existing job.
    fn add_note(&self, job_id: JobId, note: &JobNote) -> RepoResult<NoteId>;
    /// Removes one note.
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
    /// Attaches one task to an existing job, appended after its siblings.
    fn add_task(&self, job_id: JobId, task: &JobTask) -> RepoResult<TaskId>;
    /// Sets the completion flag of one task.
    fn set_task_completed(&self, id: TaskId, is_completed: bool) -> RepoResult<()>;
    /// Removes one task.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    /// Attaches one link to an existing job, appended after its siblings.
    fn add_link(&self, job_id: JobId, link: &JobLink) -> RepoResult<LinkId>;
    /// Removes one link.
    fn delete_link(&self, id: LinkId) -> RepoResult<()>;
    /// Attaches one document reference to an existing job.
    fn add_document(&self, job_id: JobId, document: &JobDocument) -> RepoResult<DocumentId>;
    /// Removes one document reference. The file itself is never touched.
    fn delete_document(&self, id: DocumentId) -> RepoResult<()>;
}

/// SQLite-backed job repository.
pub struct SqliteJobRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteJobRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl JobRepository for SqliteJobRepository<'_> {
    fn create_job(&self, job: &Job) -> RepoResult<JobId> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO jobs (
                uuid,
                title,
                company,
                contact,
                status,
                location,
                salary_k,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                job.id.to_string(),
                job.title.as_str(),
                job.company.as_str(),
                job.contact.as_deref(),
                status_to_db(job.status),
                job.location.as_deref(),
                job.salary_k.map(i64::from),
                job.created_at.timestamp_millis(),
            ],
        )?;

        for note in &job.notes {
            insert_note(&tx, job.id, note)?;
        }
        for (index, task) in job.tasks.iter().enumerate() {
            insert_task(&tx, job.id, task, index as i64)?;
        }
        for (index, link) in job.links.iter().enumerate() {
            insert_link(&tx, job.id, link, index as i64)?;
        }
        for document in &job.documents {
            insert_document(&tx, job.id, document)?;
        }

        tx.commit()?;
        Ok(job.id)
    }

    fn update_job(&self, job: &Job) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE jobs
             SET
                title = ?1,
                company = ?2,
                contact = ?3,
                status = ?4,
                location = ?5,
                salary_k = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?7;",
            params![
                job.title.as_str(),
                job.company.as_str(),
                job.contact.as_deref(),
                status_to_db(job.status),
                job.location.as_deref(),
                job.salary_k.map(i64::from),
                job.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("job", job.id));
        }

        Ok(())
    }

    fn get_job(&self, id: JobId) -> RepoResult<Option<Job>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{JOB_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;

        if let Some(row) = rows.next()? {
            let mut job = parse_job_row(row)?;
            load_children(self.conn, &mut job)?;
            return Ok(Some(job));
        }

        Ok(None)
    }

    fn list_jobs(&self, query: &JobListQuery) -> RepoResult<Vec<Job>> {
        let mut sql = format!("{JOB_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status_to_db(status).to_string()));
        }

        sql.push_str(" ORDER BY created_at DESC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut jobs = Vec::new();

        while let Some(row) = rows.next()? {
            jobs.push(parse_job_row(row)?);
        }

        for job in &mut jobs {
            load_children(self.conn, job)?;
        }

        Ok(jobs)
    }

    fn delete_job(&self, id: JobId) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        // The schema declares FKs without ON DELETE; children go first,
        // inside the same transaction as the job row.
        for table in ["job_notes", "job_tasks", "job_links", "job_documents"] {
            tx.execute(
                &format!("DELETE FROM {table} WHERE job_uuid = ?1;"),
                [id.to_string()],
            )?;
        }

        let changed = tx.execute("DELETE FROM jobs WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::not_found("job", id));
        }

        tx.commit()?;
        Ok(())
    }

    fn add_note(&self, job_id: JobId, note: &JobNote) -> RepoResult<NoteId> {
        ensure_job_exists(self.conn, job_id)?;
        insert_note(self.conn, job_id, note)?;
        Ok(note.id)
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        delete_child_row(self.conn, "job_notes", "note", id)
    }

    fn add_task(&self, job_id: JobId, task: &JobTask) -> RepoResult<TaskId> {
        ensure_job_exists(self.conn, job_id)?;
        let sort_order = next_sort_order(self.conn, "job_tasks", job_id)?;
        insert_task(self.conn, job_id, task, sort_order)?;
        Ok(task.id)
    }

    fn set_task_completed(&self, id: TaskId, is_completed: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE job_tasks
             SET is_completed = ?2
             WHERE uuid = ?1;",
            params![id.to_string(), bool_to_int(is_completed)],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("task", id));
        }

        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        delete_child_row(self.conn, "job_tasks", "task", id)
    }

    fn add_link(&self, job_id: JobId, link: &JobLink) -> RepoResult<LinkId> {
        ensure_job_exists(self.conn, job_id)?;
        let sort_order = next_sort_order(self.conn, "job_links", job_id)?;
        insert_link(self.conn, job_id, link, sort_order)?;
        Ok(link.id)
    }

    fn delete_link(&self, id: LinkId) -> RepoResult<()> {
        delete_child_row(self.conn, "job_links", "link", id)
    }

    fn add_document(&self, job_id: JobId, document: &JobDocument) -> RepoResult<DocumentId> {
        ensure_job_exists(self.conn, job_id)?;
        insert_document(self.conn, job_id, document)?;
        Ok(document.id)
    }

    fn delete_document(&self, id: DocumentId) -> RepoResult<()> {
        delete_child_row(self.conn, "job_documents", "document", id)
    }
}

fn ensure_job_exists(conn: &Connection, job_id: JobId) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM jobs WHERE uuid = ?1);",
        [job_id.to_string()],
        |row| row.get(0),
    )?;

    if exists == 1 {
        Ok(())
    } else {
        Err(RepoError::not_found("job", job_id))
    }
}

fn delete_child_row(
    conn: &Connection,
    table: &str,
    entity: &'static str,
    id: Uuid,
) -> RepoResult<()> {
    let changed = conn.execute(
        &format!("DELETE FROM {table} WHERE uuid = ?1;"),
        [id.to_string()],
    )?;

    if changed == 0 {
        return Err(RepoError::not_found(entity, id));
    }

    Ok(())
}

fn next_sort_order(conn: &Connection, table: &str, job_id: JobId) -> RepoResult<i64> {
    let next = conn.query_row(
        &format!("SELECT COALESCE(MAX(sort_order), -1) + 1 FROM {table} WHERE job_uuid = ?1;"),
        [job_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(next)
}

fn insert_note(conn: &Connection, job_id: JobId, note: &JobNote) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO job_notes (uuid, job_uuid, text, created_at)
         VALUES (?1, ?2, ?3, ?4);",
        params![
            note.id.to_string(),
            job_id.to_string(),
            note.text.as_str(),
            note.created_at.timestamp_millis(),
        ],
    )?;
    Ok(())
}

fn insert_task(conn: &Connection, job_id: JobId, task: &JobTask, sort_order: i64) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO job_tasks (uuid, job_uuid, title, due_date, is_completed, sort_order)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            task.id.to_string(),
            job_id.to_string(),
            task.title.as_str(),
            task.due_date.map(|due| due.format("%Y-%m-%d").to_string()),
            bool_to_int(task.is_completed),
            sort_order,
        ],
    )?;
    Ok(())
}

fn insert_link(conn: &Connection, job_id: JobId, link: &JobLink, sort_order: i64) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO job_links (uuid, job_uuid, title, url, sort_order)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            link.id.to_string(),
            job_id.to_string(),
            link.title.as_str(),
            link.url.as_str(),
            sort_order,
        ],
    )?;
    Ok(())
}

fn insert_document(conn: &Connection, job_id: JobId, document: &JobDocument) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO job_documents (uuid, job_uuid, name, file_path, added_at, is_mutable)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            document.id.to_string(),
            job_id.to_string(),
            document.name.as_str(),
            document.file_path.as_str(),
            document.added_at.timestamp_millis(),
            bool_to_int(document.is_mutable),
        ],
    )?;
    Ok(())
}

fn load_children(conn: &Connection, job: &mut Job) -> RepoResult<()> {
    job.notes = load_notes(conn, job.id)?;
    job.tasks = load_tasks(conn, job.id)?;
    job.links = load_links(conn, job.id)?;
    job.documents = load_documents(conn, job.id)?;
    Ok(())
}

fn load_notes(conn: &Connection, job_id: JobId) -> RepoResult<Vec<JobNote>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, text, created_at
         FROM job_notes
         WHERE job_uuid = ?1
         ORDER BY created_at DESC, uuid ASC;",
    )?;
    let mut rows = stmt.query([job_id.to_string()])?;
    let mut notes = Vec::new();

    while let Some(row) = rows.next()? {
        notes.push(parse_note_row(row)?);
    }

    Ok(notes)
}

fn load_tasks(conn: &Connection, job_id: JobId) -> RepoResult<Vec<JobTask>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, title, due_date, is_completed
         FROM job_tasks
         WHERE job_uuid = ?1
         ORDER BY sort_order ASC, uuid ASC;",
    )?;
    let mut rows = stmt.query([job_id.to_string()])?;
    let mut tasks = Vec::new();

    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }

    Ok(tasks)
}

fn load_links(conn: &Connection, job_id: JobId) -> RepoResult<Vec<JobLink>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, title, url
         FROM job_links
         WHERE job_uuid = ?1
         ORDER BY sort_order ASC, uuid ASC;",
    )?;
    let mut rows = stmt.query([job_id.to_string()])?;
    let mut links = Vec::new();

    while let Some(row) = rows.next()? {
        links.push(parse_link_row(row)?);
    }

    Ok(links)
}

fn load_documents(conn: &Connection, job_id: JobId) -> RepoResult<Vec<JobDocument>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, name, file_path, added_at, is_mutable
         FROM job_documents
         WHERE job_uuid = ?1
         ORDER BY added_at ASC, uuid ASC;",
    )?;
    let mut rows = stmt.query([job_id.to_string()])?;
    let mut documents = Vec::new();

    while let Some(row) = rows.next()? {
        documents.push(parse_document_row(row)?);
    }

    Ok(documents)
}

fn parse_job_row(row: &Row<'_>) -> RepoResult<Job> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "jobs.uuid")?;

    let status_text: String = row.get("status")?;
    let status = parse_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid job status `{status_text}` in jobs.status"))
    })?;

    let salary_k = match row.get::<_, Option<i64>>("salary_k")? {
        Some(value) => Some(u32::try_from(value).map_err(|_| {
            RepoError::InvalidData(format!("invalid salary value `{value}` in jobs.salary_k"))
        })?),
        None => None,
    };

    Ok(Job {
        id,
        title: row.get("title")?,
        company: row.get("company")?,
        contact: row.get("contact")?,
        created_at: datetime_from_ms(row.get("created_at")?, "jobs.created_at")?,
        status,
        location: row.get("location")?,
        salary_k,
        notes: Vec::new(),
        tasks: Vec::new(),
        links: Vec::new(),
        documents: Vec::new(),
    })
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<JobNote> {
    let uuid_text: String = row.get("uuid")?;
    Ok(JobNote {
        id: parse_uuid(&uuid_text, "job_notes.uuid")?,
        text: row.get("text")?,
        created_at: datetime_from_ms(row.get("created_at")?, "job_notes.created_at")?,
    })
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<JobTask> {
    let uuid_text: String = row.get("uuid")?;

    let due_date = match row.get::<_, Option<String>>("due_date")? {
        Some(value) => Some(NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid due date `{value}` in job_tasks.due_date"
            ))
        })?),
        None => None,
    };

    Ok(JobTask {
        id: parse_uuid(&uuid_text, "job_tasks.uuid")?,
        title: row.get("title")?,
        due_date,
        is_completed: parse_bool(row.get("is_completed")?, "job_tasks.is_completed")?,
    })
}

fn parse_link_row(row: &Row<'_>) -> RepoResult<JobLink> {
    let uuid_text: String = row.get("uuid")?;

    let url_text: String = row.get("url")?;
    let url = Url::parse(&url_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid url `{url_text}` in job_links.url"))
    })?;

    Ok(JobLink {
        id: parse_uuid(&uuid_text, "job_links.uuid")?,
        title: row.get("title")?,
        url,
    })
}

fn parse_document_row(row: &Row<'_>) -> RepoResult<JobDocument> {
    let uuid_text: String = row.get("uuid")?;
    Ok(JobDocument {
        id: parse_uuid(&uuid_text, "job_documents.uuid")?,
        name: row.get("name")?,
        file_path: row.get("file_path")?,
        added_at: datetime_from_ms(row.get("added_at")?, "job_documents.added_at")?,
        is_mutable: parse_bool(row.get("is_mutable")?, "job_documents.is_mutable")?,
    })
}

fn status_to_db(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Docket => "docket",
        JobStatus::Research => "research",
        JobStatus::Applied => "applied",
        JobStatus::Contacted => "contacted",
        JobStatus::Interviewing => "interviewing",
        JobStatus::Offer => "offer",
        JobStatus::Rejected => "rejected",
        JobStatus::Withdrawn => "withdrawn",
    }
}

fn parse_status(value: &str) -> Option<JobStatus> {
    match value {
        "docket" => Some(JobStatus::Docket),
        "research" => Some(JobStatus::Research),
        "applied" => Some(JobStatus::Applied),
        "contacted" => Some(JobStatus::Contacted),
        "interviewing" => Some(JobStatus::Interviewing),
        "offer" => Some(JobStatus::Offer),
        "rejected" => Some(JobStatus::Rejected),
        "withdrawn" => Some(JobStatus::Withdrawn),
        _ => None,
    }
}
