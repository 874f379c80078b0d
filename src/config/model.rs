use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ConfigError;
use crate::core::time::CalendarZone;
use crate::storage::json_backend::DEFAULT_RETENTION;

const APP_DIR_NAME: &str = "credit_tracker";

/// User preferences for the tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// `local`, `utc`, or an IANA zone name. Unset means `local`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_zone: Option<String>,
    /// Create the sample Amex Gold card when a session opens on an empty wallet.
    #[serde(default = "Config::default_seed_sample_card")]
    pub seed_sample_card: bool,
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the wallet file. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            calendar_zone: None,
            seed_sample_card: Self::default_seed_sample_card(),
            backup_retention: Self::default_backup_retention(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_seed_sample_card() -> bool {
        true
    }

    pub fn default_backup_retention() -> usize {
        DEFAULT_RETENTION
    }

    pub fn calendar_zone(&self) -> Result<CalendarZone, ConfigError> {
        match self.calendar_zone.as_deref() {
            None => Ok(CalendarZone::default()),
            Some(value) => CalendarZone::parse(value)
                .ok_or_else(|| ConfigError::InvalidZone(value.to_string())),
        }
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join(APP_DIR_NAME)
    }
}
