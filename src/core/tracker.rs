//! Session facade that owns the wallet and persists after every change.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::Config;
use crate::core::{
    errors::{Result, TrackerError},
    reset::{ResetPolicy, ResetReport},
    services::{
        CardService, CardSummary, CreditDraft, CreditService, PortfolioSummary, ServiceResult,
        SummaryService,
    },
    time::{CalendarZone, Clock, SystemClock},
};
use crate::domain::{Card, CardPreset, CardView, Credit, Displayable, Wallet};
use crate::storage::{JsonStorage, WalletStorage};

/// What happened while a session was opened.
#[derive(Debug, Clone, Default)]
pub struct OpenReport {
    /// `true` when nothing had been persisted before.
    pub fresh: bool,
    pub repairs: Vec<String>,
    pub reset: ResetReport,
    /// Card created by first-run seeding, if any.
    pub seeded: Option<Uuid>,
}

/// Options that shape how a session opens.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub zone: CalendarZone,
    pub seed_sample_card: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            zone: CalendarZone::default(),
            seed_sample_card: true,
        }
    }
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            zone: config.calendar_zone()?,
            seed_sample_card: config.seed_sample_card,
        })
    }
}

pub struct CreditTracker {
    wallet: Wallet,
    storage: Box<dyn WalletStorage>,
    clock: Box<dyn Clock>,
    zone: CalendarZone,
}

impl CreditTracker {
    /// Opens a session: load, reset stale flags, seed an empty wallet, persist.
    pub fn open(
        storage: Box<dyn WalletStorage>,
        clock: Box<dyn Clock>,
        options: SessionOptions,
    ) -> Result<(Self, OpenReport)> {
        let loaded = storage.load()?;
        let mut report = OpenReport {
            fresh: loaded.is_none(),
            ..OpenReport::default()
        };
        let now = clock.now();
        let mut wallet = loaded.unwrap_or_else(|| Wallet::new(now));

        report.repairs = wallet.repair();
        for fix in &report.repairs {
            tracing::warn!(%fix, "repaired wallet on load");
        }
        if !report.repairs.is_empty() {
            wallet.touch(now);
        }

        report.reset = ResetPolicy::apply(&mut wallet, now, options.zone);

        if options.seed_sample_card && wallet.is_empty() {
            let card = CardService::create_from_preset(&mut wallet, CardPreset::AmexGold, now)?;
            wallet.touch(now);
            tracing::info!(
                card = %card.id,
                label = %card.display_label(),
                "seeded sample card"
            );
            report.seeded = Some(card.id);
        }

        let tracker = Self {
            wallet,
            storage,
            clock,
            zone: options.zone,
        };
        tracker.persist()?;
        tracing::info!(
            cards = tracker.wallet.cards.len(),
            credits = tracker.wallet.credits.len(),
            "session opened"
        );
        Ok((tracker, report))
    }

    /// Opens a session backed by the JSON store and system clock described by `config`.
    pub fn open_with_config(config: &Config) -> Result<(Self, OpenReport)> {
        let storage =
            JsonStorage::with_retention(config.resolve_data_dir(), config.backup_retention)?;
        Self::open(
            Box::new(storage),
            Box::new(SystemClock),
            SessionOptions::from_config(config)?,
        )
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn zone(&self) -> CalendarZone {
        self.zone
    }

    pub fn create_card(&mut self, name: &str, issuer: &str) -> Result<Card> {
        self.mutate(|wallet, now| CardService::create(wallet, name, issuer, now))
    }

    pub fn create_card_from_preset(&mut self, preset: CardPreset) -> Result<Card> {
        self.mutate(|wallet, now| CardService::create_from_preset(wallet, preset, now))
    }

    /// Saves a card entered by hand. A name that matches a preset brings that
    /// preset's credits along; the issuer is kept as typed.
    pub fn save_card(&mut self, name: &str, issuer: &str) -> Result<Card> {
        self.mutate(|wallet, now| CardService::create_named(wallet, name, issuer, now))
    }

    pub fn add_credit(&mut self, card_id: Uuid, draft: CreditDraft) -> Result<Credit> {
        self.mutate(|wallet, now| CreditService::add(wallet, card_id, draft, now))
    }

    /// Flips a credit's used flag and returns the new value.
    pub fn toggle_credit(&mut self, credit_id: Uuid) -> Result<bool> {
        self.mutate(|wallet, _| CreditService::toggle_used(wallet, credit_id))
    }

    pub fn delete_credit(&mut self, card_id: Uuid, credit_id: Uuid) -> Result<Credit> {
        self.mutate(|wallet, _| CreditService::remove(wallet, card_id, credit_id))
    }

    pub fn delete_card(&mut self, card_id: Uuid) -> Result<Card> {
        self.mutate(|wallet, _| CardService::remove(wallet, card_id))
    }

    pub fn list_cards(&self) -> Vec<&Card> {
        CardService::list(&self.wallet)
    }

    pub fn card(&self, card_id: Uuid) -> Option<&Card> {
        self.wallet.card(card_id)
    }

    pub fn credits(&self, card_id: Uuid) -> Result<Vec<&Credit>> {
        Ok(CreditService::list(&self.wallet, card_id)?)
    }

    pub fn card_view(&self, card_id: Uuid) -> Option<CardView<'_>> {
        self.wallet.card_view(card_id)
    }

    pub fn card_summary(&self, card_id: Uuid) -> Result<CardSummary> {
        Ok(SummaryService::card_summary(&self.wallet, card_id)?)
    }

    pub fn card_summaries(&self) -> Vec<CardSummary> {
        SummaryService::card_summaries(&self.wallet)
    }

    pub fn portfolio(&self) -> PortfolioSummary {
        SummaryService::portfolio(&self.wallet)
    }

    /// Applies `op` and persists. The in-memory wallet is rolled back when
    /// either step fails.
    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut Wallet, DateTime<Utc>) -> ServiceResult<T>,
    ) -> Result<T> {
        let before = self.wallet.clone();
        let now = self.clock.now();
        let outcome = op(&mut self.wallet, now)
            .map_err(TrackerError::from)
            .and_then(|value| {
                self.wallet.touch(now);
                self.persist().map(|()| value)
            });
        if outcome.is_err() {
            self.wallet = before;
        }
        outcome
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.wallet)
    }
}
