//! Closed set of credit categories and their display icons.

use std::{fmt, str::FromStr};

use serde::{de::Deserializer, Deserialize, Serialize};

/// Spending area a credit applies to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
pub enum CreditCategory {
    Dining,
    Transportation,
    Entertainment,
    Groceries,
    Travel,
    Streaming,
    Shopping,
    #[default]
    Other,
}

impl CreditCategory {
    /// Every category in picker order.
    pub const ALL: [CreditCategory; 8] = [
        CreditCategory::Dining,
        CreditCategory::Transportation,
        CreditCategory::Entertainment,
        CreditCategory::Groceries,
        CreditCategory::Travel,
        CreditCategory::Streaming,
        CreditCategory::Shopping,
        CreditCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CreditCategory::Dining => "Dining",
            CreditCategory::Transportation => "Transportation",
            CreditCategory::Entertainment => "Entertainment",
            CreditCategory::Groceries => "Groceries",
            CreditCategory::Travel => "Travel",
            CreditCategory::Streaming => "Streaming",
            CreditCategory::Shopping => "Shopping",
            CreditCategory::Other => "Other",
        }
    }

    /// Symbol name used by the presentation layer when rendering the category.
    pub fn icon(&self) -> &'static str {
        match self {
            CreditCategory::Dining => "fork.knife",
            CreditCategory::Transportation => "car.fill",
            CreditCategory::Entertainment => "ticket.fill",
            CreditCategory::Groceries => "cart.fill",
            CreditCategory::Travel => "airplane",
            CreditCategory::Streaming => "tv.fill",
            CreditCategory::Shopping => "bag.fill",
            CreditCategory::Other => "star.fill",
        }
    }

    /// Maps a free-form label onto the closed set, falling back to `Other`.
    pub fn from_label(value: &str) -> Self {
        let normalized = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.label().eq_ignore_ascii_case(normalized))
            .unwrap_or_default()
    }
}

impl fmt::Display for CreditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CreditCategory {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(value))
    }
}

impl<'de> Deserialize<'de> for CreditCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .as_deref()
            .map(CreditCategory::from_label)
            .unwrap_or_default())
    }
}
