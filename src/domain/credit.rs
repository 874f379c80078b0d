use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    category::CreditCategory,
    common::{Displayable, Identifiable},
};

/// Recurring monthly benefit attached to a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credit {
    pub id: Uuid,
    /// Owning card. Used for lookup only; the card's sequence decides lifetime.
    pub card_id: Uuid,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub category: CreditCategory,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub used_this_month: bool,
    pub last_reset: DateTime<Utc>,
}

impl Credit {
    /// Creates an unused credit whose month starts at `now`.
    pub fn new(
        card_id: Uuid,
        name: impl Into<String>,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            card_id,
            name: name.into(),
            amount,
            category: CreditCategory::default(),
            notes: String::new(),
            used_this_month: false,
            last_reset: now,
        }
    }

    pub fn with_category(mut self, category: CreditCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Flips the used flag. Never moves `last_reset`.
    pub fn toggle_used(&mut self) {
        self.used_this_month = !self.used_this_month;
    }

    /// Clears the used flag when `now` falls in a different calendar month than
    /// `last_reset`, both read in `now`'s time zone. Returns whether a reset fired.
    pub fn reset_if_needed<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> bool {
        let last = self.last_reset.with_timezone(&now.timezone());
        if (last.year(), last.month()) == (now.year(), now.month()) {
            return false;
        }
        self.used_this_month = false;
        self.last_reset = now.with_timezone(&Utc);
        true
    }
}

impl Identifiable for Credit {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Credit {
    fn display_label(&self) -> String {
        let status = if self.used_this_month { "used" } else { "available" };
        format!("{} ${:.2} ({}, {})", self.name, self.amount, self.category, status)
    }
}
