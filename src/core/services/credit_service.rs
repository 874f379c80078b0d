use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Credit, CreditCategory, Displayable, Wallet};

use super::{required, ServiceError, ServiceResult};

/// Raw form input for a new credit.
#[derive(Debug, Clone, Default)]
pub struct CreditDraft {
    pub name: String,
    pub amount: String,
    pub category: Option<CreditCategory>,
    pub notes: Option<String>,
}

impl CreditDraft {
    pub fn new(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            ..Self::default()
        }
    }

    pub fn category(mut self, category: CreditCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Parses a user-entered amount as a finite, non-negative decimal.
pub fn parse_amount(raw: &str) -> ServiceResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Validation("Amount is required".into()));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ServiceError::Validation(format!("Amount `{trimmed}` is not a number")))?;
    if !value.is_finite() {
        return Err(ServiceError::Validation(format!(
            "Amount `{trimmed}` is not a number"
        )));
    }
    if value < 0.0 {
        return Err(ServiceError::Validation(format!(
            "Amount `{trimmed}` must not be negative"
        )));
    }
    // `-0` passes the sign check above; store it as plain zero.
    Ok(value.abs())
}

pub struct CreditService;

impl CreditService {
    /// Validates `draft` and appends the new credit to the end of the card's sequence.
    pub fn add(
        wallet: &mut Wallet,
        card_id: Uuid,
        draft: CreditDraft,
        now: DateTime<Utc>,
    ) -> ServiceResult<Credit> {
        let name = required("Credit name", &draft.name)?;
        let amount = parse_amount(&draft.amount)?;
        if wallet.card(card_id).is_none() {
            return Err(ServiceError::NotFound(format!("Card {card_id} not found")));
        }
        let credit = Credit::new(card_id, name, amount, now)
            .with_category(draft.category.unwrap_or_default())
            .with_notes(draft.notes.unwrap_or_default());
        wallet
            .attach_credit(credit.clone())
            .ok_or_else(|| ServiceError::NotFound(format!("Card {card_id} not found")))?;
        tracing::debug!(
            card = %card_id,
            credit = %credit.id,
            label = %credit.display_label(),
            "credit added"
        );
        Ok(credit)
    }

    /// Flips the used flag and returns the new value.
    pub fn toggle_used(wallet: &mut Wallet, credit_id: Uuid) -> ServiceResult<bool> {
        let credit = wallet
            .credit_mut(credit_id)
            .ok_or_else(|| ServiceError::NotFound(format!("Credit {credit_id} not found")))?;
        credit.toggle_used();
        let used = credit.used_this_month;
        tracing::debug!(credit = %credit_id, used, "credit toggled");
        Ok(used)
    }

    pub fn remove(wallet: &mut Wallet, card_id: Uuid, credit_id: Uuid) -> ServiceResult<Credit> {
        if wallet.card(card_id).is_none() {
            return Err(ServiceError::NotFound(format!("Card {card_id} not found")));
        }
        let removed = wallet.detach_credit(card_id, credit_id).ok_or_else(|| {
            ServiceError::NotFound(format!(
                "Credit {credit_id} not found on card {card_id}"
            ))
        })?;
        tracing::debug!(card = %card_id, credit = %credit_id, "credit deleted");
        Ok(removed)
    }

    pub fn list(wallet: &Wallet, card_id: Uuid) -> ServiceResult<Vec<&Credit>> {
        if wallet.card(card_id).is_none() {
            return Err(ServiceError::NotFound(format!("Card {card_id} not found")));
        }
        Ok(wallet.credits_for(card_id))
    }
}
