// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Navtrail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Navtrail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for the history sequence.
//!
//! The backend is an injected whole-value key-value capability; the store
//! keeps the in-memory sequence and the persisted slot in lock-step by
//! rewriting the full sequence after every mutation.

pub mod history_store;
pub mod storage;

pub use history_store::{HistoryStore, StoreError, HISTORY_KEY};
pub use storage::{MemoryStorage, Storage, StorageError};
