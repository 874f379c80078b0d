use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Card, CardPreset, Credit, Displayable, PresetCredit, Wallet};

use super::{required, ServiceError, ServiceResult};

pub struct CardService;

impl CardService {
    /// Inserts a card with an empty credit sequence.
    pub fn create(
        wallet: &mut Wallet,
        name: &str,
        issuer: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<Card> {
        let name = required("Card name", name)?;
        let issuer = required("Issuer", issuer)?;
        let card = Card::new(name, issuer, now);
        wallet.add_card(card.clone());
        tracing::debug!(card = %card.id, label = %card.display_label(), "card created");
        Ok(card)
    }

    /// Inserts the preset card followed by its bundled credits, in order.
    pub fn create_from_preset(
        wallet: &mut Wallet,
        preset: CardPreset,
        now: DateTime<Utc>,
    ) -> ServiceResult<Card> {
        Self::create_with_credits(wallet, preset.name(), preset.issuer(), preset.credits(), now)
    }

    /// Inserts a hand-entered card. When the name matches a preset, that
    /// preset's credits are attached under the issuer as entered.
    pub fn create_named(
        wallet: &mut Wallet,
        name: &str,
        issuer: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<Card> {
        let bundle = CardPreset::matching(name)
            .map(|preset| preset.credits())
            .unwrap_or_default();
        Self::create_with_credits(wallet, name, issuer, bundle, now)
    }

    fn create_with_credits(
        wallet: &mut Wallet,
        name: &str,
        issuer: &str,
        bundle: &[PresetCredit],
        now: DateTime<Utc>,
    ) -> ServiceResult<Card> {
        let card = Self::create(wallet, name, issuer, now)?;
        if bundle.is_empty() {
            return Ok(card);
        }
        for bundled in bundle {
            let credit = Credit::new(card.id, bundled.name, bundled.amount, now)
                .with_category(bundled.category)
                .with_notes(bundled.notes);
            wallet.attach_credit(credit).ok_or_else(|| {
                ServiceError::NotFound(format!("Card {} not found", card.id))
            })?;
        }
        let created = wallet
            .card(card.id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("Card {} not found", card.id)))?;
        tracing::debug!(
            card = %created.id,
            credits = created.credit_ids.len(),
            "bundled credits attached"
        );
        Ok(created)
    }

    /// Removes a card and cascades to every credit it owns.
    pub fn remove(wallet: &mut Wallet, card_id: Uuid) -> ServiceResult<Card> {
        let (card, credits) = wallet
            .remove_card(card_id)
            .ok_or_else(|| ServiceError::NotFound(format!("Card {card_id} not found")))?;
        tracing::debug!(
            card = %card.id,
            label = %card.display_label(),
            credits = credits.len(),
            "card deleted"
        );
        Ok(card)
    }

    pub fn list(wallet: &Wallet) -> Vec<&Card> {
        wallet.cards.iter().collect()
    }
}
