use serde::Serialize;
use uuid::Uuid;

use crate::domain::{CardView, Wallet};

use super::{ServiceError, ServiceResult};

/// Monthly figures for one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSummary {
    pub card_id: Uuid,
    pub name: String,
    pub issuer: String,
    pub unused_count: usize,
    pub total_count: usize,
    pub total_monthly_value: f64,
    pub used_value: f64,
    pub remaining_value: f64,
}

impl CardSummary {
    pub fn from_view(view: &CardView<'_>) -> Self {
        Self {
            card_id: view.card.id,
            name: view.card.name.clone(),
            issuer: view.card.issuer.clone(),
            unused_count: view.unused_count(),
            total_count: view.total_count(),
            total_monthly_value: view.total_monthly_value(),
            used_value: view.used_value(),
            remaining_value: view.remaining_value(),
        }
    }
}

/// Figures summed across every card.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct PortfolioSummary {
    pub card_count: usize,
    pub unused_count: usize,
    pub total_count: usize,
    pub total_monthly_value: f64,
    pub used_value: f64,
    pub remaining_value: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn card_summary(wallet: &Wallet, card_id: Uuid) -> ServiceResult<CardSummary> {
        wallet
            .card_view(card_id)
            .map(|view| CardSummary::from_view(&view))
            .ok_or_else(|| ServiceError::NotFound(format!("Card {card_id} not found")))
    }

    pub fn card_summaries(wallet: &Wallet) -> Vec<CardSummary> {
        wallet
            .card_views()
            .iter()
            .map(CardSummary::from_view)
            .collect()
    }

    pub fn portfolio(wallet: &Wallet) -> PortfolioSummary {
        Self::card_summaries(wallet).into_iter().fold(
            PortfolioSummary::default(),
            |mut totals, card| {
                totals.card_count += 1;
                totals.unused_count += card.unused_count;
                totals.total_count += card.total_count;
                totals.total_monthly_value += card.total_monthly_value;
                totals.used_value += card.used_value;
                totals.remaining_value += card.remaining_value;
                totals
            },
        )
    }
}
