use joblog_core::{
    Job, JobDocument, JobLink, JobNote, JobStatus, JobTask, LinkKind, SalaryBucket,
};
use url::Url;
use uuid::Uuid;

#[test]
fn job_new_sets_defaults() {
    let job = Job::new("Backend Engineer", "Acme");

    assert!(!job.id.is_nil());
    assert_eq!(job.title, "Backend Engineer");
    assert_eq!(job.company, "Acme");
    assert_eq!(job.status, JobStatus::Applied);
    assert_eq!(job.contact, None);
    assert_eq!(job.location, None);
    assert_eq!(job.salary_k, None);
    assert!(job.notes.is_empty());
    assert!(job.tasks.is_empty());
    assert!(job.links.is_empty());
    assert!(job.documents.is_empty());
}

#[test]
fn salary_accessors_agree_on_thousands() {
    let mut job = Job::new("Data Engineer", "Acme");
    job.salary_k = Some(120);

    assert_eq!(job.salary_in_dollars(), Some(120_000));
    assert_eq!(job.salary_display(), "$120k");
    assert_eq!(job.salary_bucket(), Some(SalaryBucket::From100To150));
}

#[test]
fn missing_salary_renders_placeholder_and_no_bucket() {
    let job = Job::new("Intern", "Acme");

    assert_eq!(job.salary_in_dollars(), None);
    assert_eq!(job.salary_display(), "—");
    assert_eq!(job.salary_bucket(), None);
}

#[test]
fn salary_bucket_boundaries_are_exact() {
    assert_eq!(SalaryBucket::for_thousands(0), SalaryBucket::Under50);
    assert_eq!(SalaryBucket::for_thousands(49), SalaryBucket::Under50);
    assert_eq!(SalaryBucket::for_thousands(50), SalaryBucket::From50To75);
    assert_eq!(SalaryBucket::for_thousands(74), SalaryBucket::From50To75);
    assert_eq!(SalaryBucket::for_thousands(75), SalaryBucket::From75To100);
    assert_eq!(SalaryBucket::for_thousands(99), SalaryBucket::From75To100);
    assert_eq!(SalaryBucket::for_thousands(100), SalaryBucket::From100To150);
    assert_eq!(SalaryBucket::for_thousands(149), SalaryBucket::From100To150);
    assert_eq!(SalaryBucket::for_thousands(150), SalaryBucket::Above150);
    assert_eq!(SalaryBucket::for_thousands(400), SalaryBucket::Above150);
}

#[test]
fn salary_bucket_labels_cover_all_bands() {
    let labels: Vec<&str> = SalaryBucket::ALL.iter().map(|b| b.label()).collect();
    assert_eq!(
        labels,
        vec!["Under 50k", "50k–75k", "75k–100k", "100k–150k", "150k+"]
    );
}

#[test]
fn status_order_follows_pipeline() {
    assert!(JobStatus::Docket < JobStatus::Research);
    assert!(JobStatus::Research < JobStatus::Applied);
    assert!(JobStatus::Applied < JobStatus::Contacted);
    assert!(JobStatus::Contacted < JobStatus::Interviewing);
    assert!(JobStatus::Interviewing < JobStatus::Offer);
    assert!(JobStatus::Offer < JobStatus::Rejected);
    assert!(JobStatus::Rejected < JobStatus::Withdrawn);

    let mut sorted = JobStatus::ALL;
    sorted.sort();
    assert_eq!(sorted, JobStatus::ALL);
}

#[test]
fn open_tasks_count_ignores_completed_tasks() {
    let mut job = Job::new("SRE", "Acme");
    job.tasks.push(JobTask::new("update resume", None));
    job.tasks.push(JobTask::new("prep interview", None));
    let mut done = JobTask::new("send application", None);
    done.is_completed = true;
    job.tasks.push(done);

    assert_eq!(job.open_tasks_count(), 2);
}

#[test]
fn new_task_starts_open() {
    let task = JobTask::new("follow up", None);
    assert!(!task.is_completed);
    assert_eq!(task.due_date, None);
}

#[test]
fn link_kind_follows_host() {
    let cases = [
        ("https://linkedin.com/in/someone", LinkKind::Linkedin),
        ("https://www.linkedin.com/jobs/view/1", LinkKind::Linkedin),
        ("https://github.com/someone", LinkKind::Github),
        ("https://gist.github.com/someone/abc", LinkKind::Github),
        ("https://acme.example.com/careers", LinkKind::Other),
        ("https://notlinkedin.com/x", LinkKind::Other),
    ];

    for (raw, expected) in cases {
        let link = JobLink::new("posting", Url::parse(raw).unwrap());
        assert_eq!(link.kind(), expected, "host of {raw}");
    }
}

#[test]
fn document_reference_starts_immutable() {
    let document = JobDocument::new("resume", "/files/resume.pdf");
    assert!(!document.is_mutable);
    assert_eq!(document.name, "resume");
    assert_eq!(document.file_path, "/files/resume.pdf");
}

#[test]
fn job_serialization_uses_expected_wire_fields() {
    let job_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut job = Job::with_id(job_id, "Platform Engineer", "Acme");
    job.status = JobStatus::Interviewing;
    job.salary_k = Some(130);
    job.location = Some("Remote".to_string());
    job.notes.push(JobNote::new("phone screen went well"));

    let json = serde_json::to_value(&job).unwrap();
    assert_eq!(json["id"], job_id.to_string());
    assert_eq!(json["title"], "Platform Engineer");
    assert_eq!(json["status"], "interviewing");
    assert_eq!(json["salary_k"], 130);
    assert_eq!(json["location"], "Remote");
    assert_eq!(json["contact"], serde_json::Value::Null);
    assert_eq!(json["notes"][0]["text"], "phone screen went well");

    let decoded: Job = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, job);
}
