use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Calendar used to decide which month an instant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarZone {
    /// The machine's local time zone.
    #[default]
    Local,
    Utc,
    Named(Tz),
}

impl CalendarZone {
    /// Parses `local`, `utc`, or an IANA zone name such as `America/Chicago`.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Some(CalendarZone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") {
            return Some(CalendarZone::Utc);
        }
        trimmed.parse::<Tz>().ok().map(CalendarZone::Named)
    }
}
