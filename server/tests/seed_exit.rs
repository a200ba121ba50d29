use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::{SystemTime, UNIX_EPOCH};

fn scratch_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!(
        "daily-report-exit-{tag}-{}-{nanos}",
        std::process::id()
    ))
}

fn run_seed(database_url: &str) -> ExitStatus {
    Command::new(env!("CARGO_BIN_EXE_seed"))
        .current_dir(std::env::temp_dir())
        .env("DATABASE_URL", database_url)
        .env("SEED_REPORT_DATE", "2026-02-05")
        .env("RUST_LOG", "error")
        .env_remove("OTLP_ENDPOINT")
        .env_remove("SEED_AUTO_MIGRATE")
        .env_remove("SEED_INCLUDE_ADMIN")
        .status()
        .unwrap()
}

fn sqlite_url(path: &Path) -> String {
    format!("sqlite://{}?mode=rwc", path.display())
}

#[test]
fn unopenable_database_exits_with_one() {
    let missing_dir = scratch_path("missing");
    let status = run_seed(&sqlite_url(&missing_dir.join("seed.db")));
    assert_eq!(status.code(), Some(1));
    assert!(!missing_dir.exists());
}

#[test]
fn seeding_exits_zero_on_first_run_and_rerun() {
    let path = scratch_path("ok").with_extension("db");
    let url = sqlite_url(&path);

    let first = run_seed(&url);
    let second = run_seed(&url);
    let _ = std::fs::remove_file(&path);

    assert_eq!(first.code(), Some(0));
    assert_eq!(second.code(), Some(0));
}
