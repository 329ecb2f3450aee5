//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `joblog_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("joblog_core ping={}", joblog_core::ping());
    println!("joblog_core version={}", joblog_core::core_version());

    match joblog_core::db::open_db_in_memory() {
        Ok(_conn) => println!(
            "joblog_core schema_version={}",
            joblog_core::db::migrations::latest_version()
        ),
        Err(err) => println!("joblog_core db=error detail={err}"),
    }
}
