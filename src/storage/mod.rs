pub mod json_backend;
pub mod memory;

use crate::{core::errors::Result, domain::Wallet};

/// Abstraction over persistence backends capable of storing the wallet document.
pub trait WalletStorage: Send + Sync {
    /// Returns `None` when nothing has been persisted yet.
    fn load(&self) -> Result<Option<Wallet>>;
    fn save(&self, wallet: &Wallet) -> Result<()>;
}

pub use json_backend::{BackupInfo, JsonStorage};
pub use memory::MemoryStorage;
