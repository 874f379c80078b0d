//! Monthly reset of the "used this month" flags.

use chrono::{DateTime, Local, Utc};
use uuid::Uuid;

use crate::core::time::CalendarZone;
use crate::domain::{Credit, Wallet};

/// Credits cleared by one pass of [`ResetPolicy::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetReport {
    pub reset: Vec<Uuid>,
    pub examined: usize,
}

impl ResetReport {
    pub fn changed(&self) -> bool {
        !self.reset.is_empty()
    }
}

/// Runs on session start only. There is no timer: a credit stays flagged
/// until the next time a session opens in a later month.
pub struct ResetPolicy;

impl ResetPolicy {
    /// Resets every credit whose `last_reset` month differs from `now`'s month
    /// as seen through `zone`.
    pub fn apply(wallet: &mut Wallet, now: DateTime<Utc>, zone: CalendarZone) -> ResetReport {
        let mut report = ResetReport {
            examined: wallet.credits.len(),
            ..ResetReport::default()
        };
        for credit in &mut wallet.credits {
            if reset_in_zone(credit, now, zone) {
                report.reset.push(credit.id);
            }
        }
        if report.changed() {
            wallet.touch(now);
            tracing::info!(
                reset = report.reset.len(),
                examined = report.examined,
                "monthly credits reset"
            );
        }
        report
    }
}

/// Both instants are read through the zone's own rules, so each keeps the
/// offset that was in force at that moment.
fn reset_in_zone(credit: &mut Credit, now: DateTime<Utc>, zone: CalendarZone) -> bool {
    match zone {
        CalendarZone::Local => credit.reset_if_needed(&now.with_timezone(&Local)),
        CalendarZone::Utc => credit.reset_if_needed(&now),
        CalendarZone::Named(tz) => credit.reset_if_needed(&now.with_timezone(&tz)),
    }
}
