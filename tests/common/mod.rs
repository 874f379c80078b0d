#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use credit_tracker::{
    core::{CalendarZone, CreditTracker, FixedClock, OpenReport, SessionOptions},
    storage::{JsonStorage, MemoryStorage},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

pub fn utc_options() -> SessionOptions {
    SessionOptions {
        zone: CalendarZone::Utc,
        seed_sample_card: true,
    }
}

/// Opens a session over `storage` with the clock pinned to `now`.
pub fn open_memory(storage: &MemoryStorage, now: DateTime<Utc>) -> (CreditTracker, OpenReport) {
    CreditTracker::open(
        Box::new(storage.clone()),
        Box::new(FixedClock(now)),
        utc_options(),
    )
    .expect("open tracker")
}

/// Creates an isolated data directory that survives until the test binary exits.
pub fn temp_data_dir() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().join("data");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn open_json(dir: &std::path::Path, now: DateTime<Utc>) -> (CreditTracker, OpenReport) {
    let storage = JsonStorage::with_retention(dir.to_path_buf(), 3).expect("json storage");
    CreditTracker::open(Box::new(storage), Box::new(FixedClock(now)), utc_options())
        .expect("open tracker")
}
