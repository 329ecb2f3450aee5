use chrono::{DateTime, NaiveDate};
use joblog_core::db::open_db_in_memory;
use joblog_core::{
    Job, JobDocument, JobLink, JobListQuery, JobNote, JobRepository, JobStatus, JobTask,
    RepoError, SqliteJobRepository,
};
use rusqlite::Connection;
use url::Url;
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let mut job = Job::new("Backend Engineer", "Acme");
    job.contact = Some("Dana Reyes".to_string());
    job.location = Some("Remote".to_string());
    job.salary_k = Some(120);
    job.status = JobStatus::Interviewing;
    let id = repo.create_job(&job).unwrap();

    let loaded = repo.get_job(id).unwrap().unwrap();
    assert_eq!(loaded.id, job.id);
    assert_eq!(loaded.title, "Backend Engineer");
    assert_eq!(loaded.company, "Acme");
    assert_eq!(loaded.contact.as_deref(), Some("Dana Reyes"));
    assert_eq!(loaded.location.as_deref(), Some("Remote"));
    assert_eq!(loaded.salary_k, Some(120));
    assert_eq!(loaded.status, JobStatus::Interviewing);
    // Storage keeps millisecond precision.
    assert_eq!(
        loaded.created_at.timestamp_millis(),
        job.created_at.timestamp_millis()
    );
}

#[test]
fn get_missing_job_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    assert!(repo.get_job(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn create_persists_children_carried_by_the_job() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let mut job = Job::new("Platform Engineer", "Acme");
    let mut older_note = JobNote::new("applied via referral");
    older_note.created_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let mut newer_note = JobNote::new("recruiter replied");
    newer_note.created_at = DateTime::from_timestamp(1_700_000_100, 0).unwrap();
    job.notes.push(older_note.clone());
    job.notes.push(newer_note.clone());
    job.tasks.push(JobTask::new("update resume", None));
    job.tasks.push(JobTask::new(
        "prep system design",
        Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()),
    ));
    job.links.push(JobLink::new(
        "posting",
        Url::parse("https://acme.example.com/careers/42").unwrap(),
    ));
    job.documents.push(JobDocument::new("resume", "/files/resume.pdf"));

    let id = repo.create_job(&job).unwrap();
    let loaded = repo.get_job(id).unwrap().unwrap();

    // Notes come back newest first.
    assert_eq!(loaded.notes.len(), 2);
    assert_eq!(loaded.notes[0].id, newer_note.id);
    assert_eq!(loaded.notes[1].id, older_note.id);

    // Tasks and links keep insertion order.
    assert_eq!(loaded.tasks.len(), 2);
    assert_eq!(loaded.tasks[0].title, "update resume");
    assert_eq!(loaded.tasks[1].title, "prep system design");
    assert_eq!(
        loaded.tasks[1].due_date,
        Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
    );
    assert_eq!(loaded.links.len(), 1);
    assert_eq!(loaded.links[0].url.as_str(), "https://acme.example.com/careers/42");
    assert_eq!(loaded.documents.len(), 1);
    assert_eq!(loaded.documents[0].file_path, "/files/resume.pdf");
}

#[test]
fn update_existing_job_changes_scalar_fields_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let mut job = Job::new("Engineer", "Acme");
    repo.create_job(&job).unwrap();
    repo.add_note(job.id, &JobNote::new("kept across updates")).unwrap();

    job.title = "Staff Engineer".to_string();
    job.status = JobStatus::Offer;
    job.salary_k = Some(180);
    repo.update_job(&job).unwrap();

    let loaded = repo.get_job(job.id).unwrap().unwrap();
    assert_eq!(loaded.title, "Staff Engineer");
    assert_eq!(loaded.status, JobStatus::Offer);
    assert_eq!(loaded.salary_k, Some(180));
    assert_eq!(loaded.notes.len(), 1);
}

#[test]
fn update_missing_job_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let job = Job::new("Ghost", "Acme");
    let err = repo.update_job(&job).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "job", id } if id == job.id));
}

#[test]
fn delete_job_removes_all_child_rows_in_one_transaction() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let mut job = Job::new("Engineer", "Acme");
    job.notes.push(JobNote::new("note"));
    job.tasks.push(JobTask::new("task", None));
    job.links.push(JobLink::new(
        "link",
        Url::parse("https://example.com/x").unwrap(),
    ));
    job.documents.push(JobDocument::new("doc", "/files/doc.pdf"));
    repo.create_job(&job).unwrap();

    repo.delete_job(job.id).unwrap();

    assert!(repo.get_job(job.id).unwrap().is_none());
    for table in ["job_notes", "job_tasks", "job_links", "job_documents"] {
        assert_eq!(count_rows(&conn, table), 0, "table {table} still has rows");
    }
}

#[test]
fn delete_missing_job_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let id = Uuid::new_v4();
    let err = repo.delete_job(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "job", id: missing } if missing == id));
}

#[test]
fn child_rows_can_be_added_and_deleted_individually() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let job = Job::new("Engineer", "Acme");
    repo.create_job(&job).unwrap();

    let note = JobNote::new("called back");
    let task = JobTask::new("send thank-you", None);
    let link = JobLink::new("profile", Url::parse("https://github.com/someone").unwrap());
    let document = JobDocument::new("cover letter", "/files/cover.pdf");

    repo.add_note(job.id, &note).unwrap();
    repo.add_task(job.id, &task).unwrap();
    repo.add_link(job.id, &link).unwrap();
    repo.add_document(job.id, &document).unwrap();

    let loaded = repo.get_job(job.id).unwrap().unwrap();
    assert_eq!(loaded.notes.len(), 1);
    assert_eq!(loaded.tasks.len(), 1);
    assert_eq!(loaded.links.len(), 1);
    assert_eq!(loaded.documents.len(), 1);

    repo.delete_note(note.id).unwrap();
    repo.delete_task(task.id).unwrap();
    repo.delete_link(link.id).unwrap();
    repo.delete_document(document.id).unwrap();

    let emptied = repo.get_job(job.id).unwrap().unwrap();
    assert!(emptied.notes.is_empty());
    assert!(emptied.tasks.is_empty());
    assert!(emptied.links.is_empty());
    assert!(emptied.documents.is_empty());
}

#[test]
fn adding_children_to_missing_job_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let missing = Uuid::new_v4();
    let err = repo.add_note(missing, &JobNote::new("orphan")).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "job", .. }));

    let err = repo
        .add_task(missing, &JobTask::new("orphan", None))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "job", .. }));
}

#[test]
fn deleting_missing_child_rows_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let err = repo.delete_note(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "note", .. }));
    let err = repo.delete_task(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "task", .. }));
    let err = repo.delete_link(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "link", .. }));
    let err = repo.delete_document(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "document", .. }));
}

#[test]
fn set_task_completed_roundtrip_and_missing_task_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let job = Job::new("Engineer", "Acme");
    repo.create_job(&job).unwrap();
    let task = JobTask::new("follow up", None);
    repo.add_task(job.id, &task).unwrap();

    repo.set_task_completed(task.id, true).unwrap();
    let loaded = repo.get_job(job.id).unwrap().unwrap();
    assert!(loaded.tasks[0].is_completed);

    repo.set_task_completed(task.id, false).unwrap();
    let loaded = repo.get_job(job.id).unwrap().unwrap();
    assert!(!loaded.tasks[0].is_completed);

    let err = repo.set_task_completed(Uuid::new_v4(), true).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "task", .. }));
}

#[test]
fn tasks_appended_later_keep_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let mut job = Job::new("Engineer", "Acme");
    job.tasks.push(JobTask::new("first", None));
    repo.create_job(&job).unwrap();

    repo.add_task(job.id, &JobTask::new("second", None)).unwrap();
    repo.add_task(job.id, &JobTask::new("third", None)).unwrap();

    let loaded = repo.get_job(job.id).unwrap().unwrap();
    let loaded_titles: Vec<&str> = loaded.tasks.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(loaded_titles, vec!["first", "second", "third"]);
}

#[test]
fn list_orders_by_created_at_descending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let job_old = Job::new("old", "Acme");
    let job_new = Job::new("new", "Acme");
    let job_mid = Job::new("mid", "Acme");
    repo.create_job(&job_old).unwrap();
    repo.create_job(&job_new).unwrap();
    repo.create_job(&job_mid).unwrap();

    set_created_at(&conn, job_old.id, 1_000);
    set_created_at(&conn, job_mid.id, 2_000);
    set_created_at(&conn, job_new.id, 3_000);

    let listed = repo.list_jobs(&JobListQuery::default()).unwrap();
    let listed_titles: Vec<&str> = listed.iter().map(|job| job.title.as_str()).collect();
    assert_eq!(listed_titles, vec!["new", "mid", "old"]);
}

#[test]
fn list_filters_by_status() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let mut offer = Job::new("offer", "Acme");
    offer.status = JobStatus::Offer;
    let applied = Job::new("applied", "Acme");
    repo.create_job(&offer).unwrap();
    repo.create_job(&applied).unwrap();

    let query = JobListQuery {
        status: Some(JobStatus::Offer),
        ..JobListQuery::default()
    };
    let listed = repo.list_jobs(&query).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, offer.id);
}

#[test]
fn list_pagination_with_limit_and_offset_is_stable() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let job_a = job_with_fixed_id("00000000-0000-4000-8000-000000000001", "a");
    let job_b = job_with_fixed_id("00000000-0000-4000-8000-000000000002", "b");
    let job_c = job_with_fixed_id("00000000-0000-4000-8000-000000000003", "c");
    repo.create_job(&job_c).unwrap();
    repo.create_job(&job_a).unwrap();
    repo.create_job(&job_b).unwrap();

    conn.execute("UPDATE jobs SET created_at = 1234567890000;", [])
        .unwrap();

    let query = JobListQuery {
        limit: Some(2),
        offset: 1,
        ..JobListQuery::default()
    };
    let page = repo.list_jobs(&query).unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, job_b.id);
    assert_eq!(page[1].id, job_c.id);
}

#[test]
fn list_pagination_with_offset_only_path_is_stable() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::new(&conn);

    let job_a = job_with_fixed_id("00000000-0000-4000-8000-000000000001", "a");
    let job_b = job_with_fixed_id("00000000-0000-4000-8000-000000000002", "b");
    let job_c = job_with_fixed_id("00000000-0000-4000-8000-000000000003", "c");
    repo.create_job(&job_a).unwrap();
    repo.create_job(&job_b).unwrap();
    repo.create_job(&job_c).unwrap();

    conn.execute("UPDATE jobs SET created_at = 1234567890000;", [])
        .unwrap();

    let query = JobListQuery {
        offset: 1,
        ..JobListQuery::default()
    };
    let page = repo.list_jobs(&query).unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, job_b.id);
    assert_eq!(page[1].id, job_c.id);
}

fn job_with_fixed_id(id: &str, title: &str) -> Job {
    Job::with_id(Uuid::parse_str(id).unwrap(), title, "Acme")
}

fn set_created_at(conn: &Connection, id: Uuid, created_at: i64) {
    conn.execute(
        "UPDATE jobs SET created_at = ?1 WHERE uuid = ?2;",
        rusqlite::params![created_at, id.to_string()],
    )
    .unwrap();
}

fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
