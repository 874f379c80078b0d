//! The persisted aggregate holding every card and credit.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    card::{Card, CardView},
    common::{find_by_id, find_by_id_mut, position_by_id},
    credit::Credit,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    #[serde(default = "Wallet::schema_version_default")]
    pub schema_version: u8,
    /// Cards in creation order.
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub credits: Vec<Credit>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            cards: Vec::new(),
            credits: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, id: Uuid) -> Option<&Card> {
        find_by_id(&self.cards, id)
    }

    pub fn card_mut(&mut self, id: Uuid) -> Option<&mut Card> {
        find_by_id_mut(&mut self.cards, id)
    }

    pub fn credit(&self, id: Uuid) -> Option<&Credit> {
        find_by_id(&self.credits, id)
    }

    pub fn credit_mut(&mut self, id: Uuid) -> Option<&mut Credit> {
        find_by_id_mut(&mut self.credits, id)
    }

    /// Credits owned by `card_id`, in the card's sequence order.
    pub fn credits_for(&self, card_id: Uuid) -> Vec<&Credit> {
        let Some(card) = self.card(card_id) else {
            return Vec::new();
        };
        card.credit_ids
            .iter()
            .filter_map(|id| self.credit(*id))
            .collect()
    }

    pub fn card_view(&self, card_id: Uuid) -> Option<CardView<'_>> {
        let card = self.card(card_id)?;
        Some(CardView::new(card, self.credits_for(card_id)))
    }

    pub fn card_views(&self) -> Vec<CardView<'_>> {
        self.cards
            .iter()
            .map(|card| CardView::new(card, self.credits_for(card.id)))
            .collect()
    }

    pub fn add_card(&mut self, card: Card) -> Uuid {
        let id = card.id;
        self.cards.push(card);
        id
    }

    /// Appends `credit` to the end of its card's sequence. Returns `None` when
    /// the owning card does not exist.
    pub fn attach_credit(&mut self, credit: Credit) -> Option<Uuid> {
        let id = credit.id;
        let card = self.card_mut(credit.card_id)?;
        card.credit_ids.push(id);
        self.credits.push(credit);
        Some(id)
    }

    /// Detaches and drops a credit from `card_id`. Returns `None` when the card
    /// does not own it.
    pub fn detach_credit(&mut self, card_id: Uuid, credit_id: Uuid) -> Option<Credit> {
        let card = self.card_mut(card_id)?;
        let position = card.credit_ids.iter().position(|id| *id == credit_id)?;
        card.credit_ids.remove(position);
        let index = position_by_id(&self.credits, credit_id)?;
        Some(self.credits.remove(index))
    }

    /// Removes a card and every credit it owns.
    pub fn remove_card(&mut self, card_id: Uuid) -> Option<(Card, Vec<Credit>)> {
        let index = position_by_id(&self.cards, card_id)?;
        let card = self.cards.remove(index);
        let owned: HashSet<Uuid> = card.credit_ids.iter().copied().collect();
        let (removed, kept): (Vec<Credit>, Vec<Credit>) = self
            .credits
            .drain(..)
            .partition(|credit| owned.contains(&credit.id) || credit.card_id == card_id);
        self.credits = kept;
        Some((card, removed))
    }

    /// Drops dangling references left behind by an interrupted or hand-edited
    /// file. Returns a description of each fix applied.
    pub fn repair(&mut self) -> Vec<String> {
        let mut fixes = Vec::new();
        let credit_ids: HashSet<Uuid> = self.credits.iter().map(|credit| credit.id).collect();
        for card in &mut self.cards {
            let before = card.credit_ids.len();
            card.credit_ids.retain(|id| credit_ids.contains(id));
            if card.credit_ids.len() != before {
                fixes.push(format!(
                    "card {} referenced {} missing credit(s)",
                    card.id,
                    before - card.credit_ids.len()
                ));
            }
        }

        let owned: HashSet<(Uuid, Uuid)> = self
            .cards
            .iter()
            .flat_map(|card| card.credit_ids.iter().map(move |id| (card.id, *id)))
            .collect();
        let before = self.credits.len();
        self.credits.retain(|credit| {
            let keep = owned.contains(&(credit.card_id, credit.id));
            if !keep {
                fixes.push(format!(
                    "credit {} is not owned by card {}",
                    credit.id, credit.card_id
                ));
            }
            keep
        });
        if self.credits.len() != before {
            let retained: HashSet<Uuid> = self.credits.iter().map(|credit| credit.id).collect();
            for card in &mut self.cards {
                card.credit_ids.retain(|id| retained.contains(id));
            }
        }

        fixes
    }

    /// Stamps `updated_at`. Callers own the clock, so the mutators above leave it alone.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
