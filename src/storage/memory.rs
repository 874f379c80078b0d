use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    core::errors::{Result, TrackerError},
    domain::Wallet,
};

use super::WalletStorage;

#[derive(Debug, Default)]
struct MemoryState {
    wallet: Option<Wallet>,
    saves: usize,
}

/// In-process storage. Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wallet(wallet: Wallet) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                wallet: Some(wallet),
                saves: 0,
            })),
        }
    }

    /// The last saved wallet, if any.
    pub fn snapshot(&self) -> Result<Option<Wallet>> {
        Ok(self.lock()?.wallet.clone())
    }

    pub fn save_count(&self) -> Result<usize> {
        Ok(self.lock()?.saves)
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| TrackerError::Storage("memory storage lock poisoned".into()))
    }
}

impl WalletStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Wallet>> {
        self.snapshot()
    }

    fn save(&self, wallet: &Wallet) -> Result<()> {
        let mut state = self.lock()?;
        state.wallet = Some(wallet.clone());
        state.saves += 1;
        Ok(())
    }
}
