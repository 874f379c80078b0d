use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    common::{Displayable, Identifiable},
    credit::Credit,
};

/// A physical or virtual credit card and the ordered credits it owns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    /// Owned credits in insertion order.
    #[serde(default)]
    pub credit_ids: Vec<Uuid>,
    pub date_added: DateTime<Utc>,
}

impl Card {
    pub fn new(name: impl Into<String>, issuer: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            issuer: issuer.into(),
            credit_ids: Vec::new(),
            date_added: now,
        }
    }

    pub fn owns(&self, credit_id: Uuid) -> bool {
        self.credit_ids.contains(&credit_id)
    }
}

impl Identifiable for Card {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Card {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.issuer)
    }
}

/// Borrowed view of a card together with its credits in sequence order.
///
/// All figures are recomputed on every call.
#[derive(Debug, Clone)]
pub struct CardView<'a> {
    pub card: &'a Card,
    pub credits: Vec<&'a Credit>,
}

impl<'a> CardView<'a> {
    pub fn new(card: &'a Card, credits: Vec<&'a Credit>) -> Self {
        Self { card, credits }
    }

    pub fn unused_count(&self) -> usize {
        self.credits
            .iter()
            .filter(|credit| !credit.used_this_month)
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.credits.len()
    }

    pub fn total_monthly_value(&self) -> f64 {
        self.credits.iter().map(|credit| credit.amount).sum()
    }

    pub fn used_value(&self) -> f64 {
        self.credits
            .iter()
            .filter(|credit| credit.used_this_month)
            .map(|credit| credit.amount)
            .sum()
    }

    pub fn remaining_value(&self) -> f64 {
        self.credits
            .iter()
            .filter(|credit| !credit.used_this_month)
            .map(|credit| credit.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn label_and_id_come_from_the_card() {
        let card = Card::new("Amex Gold", "American Express", now());
        assert_eq!(card.display_label(), "Amex Gold (American Express)");
        assert_eq!(Identifiable::id(&card), card.id);
    }

    #[test]
    fn empty_card_has_zero_aggregates() {
        let card = Card::new("Blue Cash", "American Express", now());
        let view = CardView::new(&card, Vec::new());
        assert_eq!(view.total_count(), 0);
        assert_eq!(view.unused_count(), 0);
        assert_eq!(view.total_monthly_value(), 0.0);
        assert_eq!(view.used_value(), 0.0);
        assert_eq!(view.remaining_value(), 0.0);
    }

    #[test]
    fn used_and_remaining_partition_the_total() {
        let card = Card::new("Amex Gold", "American Express", now());
        let mut uber = Credit::new(card.id, "Uber Cash", 10.0, now());
        let dining = Credit::new(card.id, "Dining Credit", 10.0, now());
        let mut dunkin = Credit::new(card.id, "Dunkin' Credit", 7.0, now());
        uber.toggle_used();
        dunkin.toggle_used();

        let view = CardView::new(&card, vec![&uber, &dining, &dunkin]);
        assert_eq!(view.total_count(), 3);
        assert_eq!(view.unused_count(), 1);
        assert!((view.used_value() - 17.0).abs() < f64::EPSILON);
        assert!((view.remaining_value() - 10.0).abs() < f64::EPSILON);
        assert!(
            (view.used_value() + view.remaining_value() - view.total_monthly_value()).abs()
                < 1e-9
        );
    }
}
