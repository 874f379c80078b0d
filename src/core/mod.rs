pub mod errors;
pub mod reset;
pub mod services;
pub mod time;
pub mod tracker;

pub use errors::{Result, TrackerError};
pub use reset::{ResetPolicy, ResetReport};
pub use time::{CalendarZone, Clock, FixedClock, SystemClock};
pub use tracker::{CreditTracker, OpenReport, SessionOptions};
