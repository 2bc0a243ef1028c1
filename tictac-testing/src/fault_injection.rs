use parking_lot::RwLock;
use std::sync::Arc;
use tictac_core::{Result, StorageBackend, TicTacError};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultType {
    /// Every write fails, as with a full disk or exceeded quota
    FailWrites,
    /// Every read fails
    FailReads,
    /// Reads return bytes that no codec will accept
    CorruptReads,
}

/// Storage wrapper that injects faults into an inner backend.
///
/// Clones share the fault switch, so a test can keep one clone to toggle
/// faults while the engine owns another.
#[derive(Debug, Clone)]
pub struct FaultyStorage<B> {
    inner: B,
    fault: Arc<RwLock<Option<FaultType>>>,
}

impl<B: StorageBackend> FaultyStorage<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            fault: Arc::new(RwLock::new(None)),
        }
    }

    pub fn inject(&self, fault: FaultType) {
        debug!("Injecting storage fault {:?}", fault);
        *self.fault.write() = Some(fault);
    }

    pub fn heal(&self) {
        *self.fault.write() = None;
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    fn active(&self) -> Option<FaultType> {
        *self.fault.read()
    }
}

impl<B: StorageBackend> StorageBackend for FaultyStorage<B> {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.active() {
            Some(FaultType::FailReads) => Err(TicTacError::persistence(format!(
                "injected read failure for '{}'",
                key
            ))),
            Some(FaultType::CorruptReads) => Ok(self
                .inner
                .read(key)?
                .map(|_| b"\x00\xff{corrupt".to_vec())),
            _ => self.inner.read(key),
        }
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        match self.active() {
            Some(FaultType::FailWrites) => Err(TicTacError::persistence(format!(
                "injected write failure for '{}'",
                key
            ))),
            _ => self.inner.write(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }
}
