//! Well-known cards offered as quick picks, with their bundled credits.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::category::CreditCategory;

/// A credit that ships with a preset card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetCredit {
    pub name: &'static str,
    pub amount: f64,
    pub category: CreditCategory,
    pub notes: &'static str,
}

const AMEX_GOLD_CREDITS: [PresetCredit; 3] = [
    PresetCredit {
        name: "Uber Cash",
        amount: 10.0,
        category: CreditCategory::Transportation,
        notes: "$10/month for Uber rides, Uber Eats, and Uber groceries",
    },
    PresetCredit {
        name: "Dining Credit",
        amount: 10.0,
        category: CreditCategory::Dining,
        notes: "Grubhub, Cheesecake Factory, Goldbelly, Wine.com, Five Guys",
    },
    PresetCredit {
        name: "Dunkin' Credit",
        amount: 7.0,
        category: CreditCategory::Dining,
        notes: "$7/month for eligible U.S. Dunkin' purchases",
    },
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardPreset {
    AmexGold,
    AmexPlatinum,
    ChaseSapphireReserve,
}

impl CardPreset {
    pub const ALL: [CardPreset; 3] = [
        CardPreset::AmexGold,
        CardPreset::AmexPlatinum,
        CardPreset::ChaseSapphireReserve,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CardPreset::AmexGold => "Amex Gold",
            CardPreset::AmexPlatinum => "Amex Platinum",
            CardPreset::ChaseSapphireReserve => "Chase Sapphire Reserve",
        }
    }

    pub fn issuer(&self) -> &'static str {
        match self {
            CardPreset::AmexGold | CardPreset::AmexPlatinum => "American Express",
            CardPreset::ChaseSapphireReserve => "Chase",
        }
    }

    /// Credits created alongside the card, in display order.
    pub fn credits(&self) -> &'static [PresetCredit] {
        match self {
            CardPreset::AmexGold => &AMEX_GOLD_CREDITS,
            CardPreset::AmexPlatinum | CardPreset::ChaseSapphireReserve => &[],
        }
    }

    /// Finds the preset with exactly this card name, ignoring surrounding
    /// whitespace. The issuer plays no part.
    pub fn matching(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.iter().copied().find(|preset| preset.name() == name)
    }
}

impl fmt::Display for CardPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
