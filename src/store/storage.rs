// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Navtrail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Navtrail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde_json::Value;

/// Asynchronous whole-value key-value capability backing the history store.
///
/// `set` replaces the entire value under `key`; there are no partial writes.
/// Both operations either complete or fail with a [`StorageError`] — the
/// backend never returns torn data.
#[allow(async_fn_in_trait)]
pub trait Storage {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// The storage backend could not be reached or refused the round-trip.
///
/// Not locally recoverable: the in-memory sequence stays authoritative and
/// the caller may retry the write later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageError {
    reason: String,
}

impl StorageError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage backend unavailable: {}", self.reason)
    }
}

impl std::error::Error for StorageError {}

/// In-memory storage double.
///
/// Clones share the same slots, so a "restarted" store can be pointed at the
/// backing data of a previous one. `fail_requests` makes every round-trip
/// error until switched off, for exercising the unavailable path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryStorageInner>>,
}

#[derive(Debug, Default)]
struct MemoryStorageInner {
    slots: HashMap<String, Value>,
    failing: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_requests(&self, failing: bool) {
        self.inner.lock().expect("memory storage lock poisoned").failing = failing;
    }

    /// Raw view of a slot, for asserting on the persisted layout.
    pub fn slot(&self, key: &str) -> Option<Value> {
        self.inner
            .lock()
            .expect("memory storage lock poisoned")
            .slots
            .get(key)
            .cloned()
    }

    /// Seed a slot directly, bypassing the `Storage` contract.
    pub fn put_slot(&self, key: &str, value: Value) {
        self.inner
            .lock()
            .expect("memory storage lock poisoned")
            .slots
            .insert(key.to_owned(), value);
    }
}

impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let inner = self.inner.lock().expect("memory storage lock poisoned");
        if inner.failing {
            return Err(StorageError::new("injected read failure"));
        }
        Ok(inner.slots.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().expect("memory storage lock poisoned");
        if inner.failing {
            return Err(StorageError::new("injected write failure"));
        }
        inner.slots.insert(key.to_owned(), value);
        Ok(())
    }
}
