use std::{
    cmp::Reverse,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{
    core::errors::{Result, TrackerError},
    domain::{Wallet, CURRENT_SCHEMA_VERSION},
    utils::persistence::write_atomic,
};

use super::WalletStorage;

const WALLET_STEM: &str = "wallet";
const JSON_EXTENSION: &str = "json";
const BACKUP_DIR: &str = "backups";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const DEFAULT_RETENTION: usize = 5;

/// A timestamped copy of a previously saved wallet file.
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub path: PathBuf,
}

/// Filesystem-backed JSON persistence for the wallet and its backups.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    wallet_path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        Self::with_retention(data_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(data_dir: PathBuf, retention: usize) -> Result<Self> {
        let backups_dir = data_dir.join(BACKUP_DIR);
        fs::create_dir_all(&data_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            wallet_path: data_dir.join(format!("{WALLET_STEM}.{JSON_EXTENSION}")),
            backups_dir,
            retention: retention.max(1),
        })
    }

    pub fn wallet_path(&self) -> &Path {
        &self.wallet_path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Backups newest first.
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(JSON_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(BackupInfo {
                    id: file_name.to_string(),
                    created_at: parse_backup_timestamp(file_name),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|info| Reverse((info.created_at, info.id.clone())));
        Ok(entries)
    }

    /// Replaces the live wallet file with `backup` and returns its contents.
    pub fn restore_backup(&self, backup: &BackupInfo) -> Result<Wallet> {
        if !backup.path.exists() {
            return Err(TrackerError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let wallet = load_wallet_from_path(&backup.path)?;
        self.save(&wallet)?;
        Ok(wallet)
    }

    fn backup_existing_file(&self) -> Result<()> {
        if !self.wallet_path.exists() {
            return Ok(());
        }
        fs::create_dir_all(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let file_name = format!("{WALLET_STEM}_{timestamp}.{JSON_EXTENSION}");
        fs::copy(&self.wallet_path, self.backups_dir.join(&file_name))?;
        self.prune_backups()?;
        Ok(())
    }

    /// Deletes backups beyond the retention window. Returns how many could
    /// not be removed; each failure is logged and the save still goes ahead.
    fn prune_backups(&self) -> Result<usize> {
        let mut failed = 0;
        for entry in self.list_backups()?.into_iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&entry.path) {
                failed += 1;
                tracing::warn!(
                    backup = %entry.path.display(),
                    error = %err,
                    "failed to prune wallet backup"
                );
            }
        }
        Ok(failed)
    }
}

impl WalletStorage for JsonStorage {
    fn load(&self) -> Result<Option<Wallet>> {
        if !self.wallet_path.exists() {
            return Ok(None);
        }
        load_wallet_from_path(&self.wallet_path).map(Some)
    }

    fn save(&self, wallet: &Wallet) -> Result<()> {
        self.backup_existing_file()?;
        save_wallet_to_path(wallet, &self.wallet_path)
    }
}

/// Writes the wallet next to `path` first and renames it into place.
pub fn save_wallet_to_path(wallet: &Wallet, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(wallet)?;
    write_atomic(path, &json)?;
    Ok(())
}

/// Loads a wallet, refusing files written by a newer schema.
pub fn load_wallet_from_path(path: &Path) -> Result<Wallet> {
    let data = fs::read_to_string(path)?;
    let wallet: Wallet = serde_json::from_str(&data)?;
    if wallet.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(TrackerError::Storage(format!(
            "wallet schema v{} is newer than supported v{}",
            wallet.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(wallet)
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{JSON_EXTENSION}"))?;
    let mut segments = trimmed.split('_').collect::<Vec<_>>();
    if segments.len() < 3 {
        return None;
    }
    let time = segments.pop()?;
    let date = segments.pop()?;
    if !is_digits(date, 8) || !is_digits(time, 6) {
        return None;
    }
    let raw = format!("{date}{time}");
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}
