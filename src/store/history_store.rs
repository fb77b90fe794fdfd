// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Navtrail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Navtrail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::{History, HistoryEntry};

use super::storage::{Storage, StorageError};

/// Storage slot holding the serialized history sequence.
pub const HISTORY_KEY: &str = "navHistory";

/// Owns the in-memory history and keeps the persisted copy in lock-step.
///
/// `load` is the only read-through from storage; afterwards the in-memory
/// sequence is authoritative and every mutation rewrites the full slot
/// before the operation completes. Mutations take `&mut self`, so two
/// read-modify-write cycles can never overlap against the backend.
#[derive(Debug)]
pub struct HistoryStore<S> {
    storage: S,
    history: History,
    locked: bool,
}

impl<S: Storage> HistoryStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            history: History::new(),
            locked: false,
        }
    }

    /// Read the persisted sequence. Absent or malformed content degrades to
    /// an empty sequence; only a backend failure is an error.
    pub async fn load(&mut self) -> Result<&History, StoreError> {
        let stored = self
            .storage
            .get(HISTORY_KEY)
            .await
            .map_err(|source| StoreError::Storage { source })?;

        self.history = match stored {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => History::new(),
        };
        Ok(&self.history)
    }

    /// Dedup-and-promote `entry` into the sequence and persist. While the
    /// lock flag is set this is a no-op returning the sequence unchanged.
    pub async fn append(&mut self, entry: HistoryEntry) -> Result<&History, StoreError> {
        if self.locked {
            return Ok(&self.history);
        }

        self.history.record(entry);
        self.persist().await?;
        Ok(&self.history)
    }

    /// Remove the entry at `index` and persist. Out-of-range is a no-op and
    /// skips the write (the persisted value is already correct).
    pub async fn remove_at(&mut self, index: usize) -> Result<&History, StoreError> {
        if self.history.remove_at(index) {
            self.persist().await?;
        }
        Ok(&self.history)
    }

    pub async fn clear(&mut self) -> Result<&History, StoreError> {
        self.history.clear();
        self.persist().await?;
        Ok(&self.history)
    }

    /// Current in-memory sequence.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Process-lifetime lock flag; never persisted. While set, appends are
    /// ignored but reads, removal, and clearing stay available.
    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Flip the lock flag and return the new state.
    pub fn toggle_locked(&mut self) -> bool {
        self.locked = !self.locked;
        self.locked
    }

    async fn persist(&mut self) -> Result<(), StoreError> {
        let value = serde_json::to_value(&self.history)
            .map_err(|source| StoreError::Encode { source })?;
        self.storage
            .set(HISTORY_KEY, value)
            .await
            .map_err(|source| StoreError::Storage { source })
    }
}

#[derive(Debug)]
pub enum StoreError {
    /// The storage backend failed a round-trip. The in-memory and persisted
    /// sequences may diverge until the next successful write.
    Storage { source: StorageError },
    /// The sequence could not be serialized for persistence.
    Encode { source: serde_json::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage { source } => write!(f, "history store unavailable: {source}"),
            Self::Encode { source } => write!(f, "failed to encode history: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage { source } => Some(source),
            Self::Encode { source } => Some(source),
        }
    }
}
