// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Navtrail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Navtrail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Entries snapshot a visited location (page plus optional node); the
//! history is the bounded, deduplicated, most-recent-first sequence of them.

pub mod entry;
pub mod history;
pub mod ids;

pub use entry::{
    derive_icon, truncate_display_name, HistoryEntry, IconTag, LayoutMode, NodeKind, MAX_NAME_LEN,
};
pub use history::{History, MAX_ENTRIES};
pub use ids::{Id, IdError, NodeId, PageId};
