// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Navtrail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Navtrail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::entry::HistoryEntry;

/// Capacity bound. Recording a 21st distinct location evicts the oldest.
pub const MAX_ENTRIES: usize = 20;

/// Most-recent-first bounded sequence of visited locations.
///
/// Order reflects recency of (re-)visit, not creation time of the node.
/// Serializes transparently as a bare array of entries, which is the exact
/// layout the storage slot has always held.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dedup-and-promote: drop any entry for the same location, insert the
    /// new one at the front, evict past `MAX_ENTRIES`.
    ///
    /// The timestamp is clamped against the current front entry so the
    /// stored sequence never sees time run backwards.
    pub fn record(&mut self, mut entry: HistoryEntry) {
        if let Some(front) = self.entries.first() {
            if entry.timestamp < front.timestamp {
                entry.timestamp = front.timestamp;
            }
        }

        self.entries
            .retain(|existing| !existing.same_location(&entry));
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_ENTRIES);
    }

    /// Remove the entry at `index`. Out-of-range is a no-op, not an error;
    /// returns whether anything was removed.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.entries.remove(index);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
