// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Navtrail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Navtrail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Navtrail — bounded, deduplicated navigation history for a design-tool plugin.
//!
//! The crate is the host-agnostic core: it owns the visited-location sequence
//! (capped, deduplicated by `(page, node)` identity, persisted whole after
//! every mutation) and the selection-event coordination that feeds it
//! (debounced bursts, suppressed self-echoes). Scene-graph access, key-value
//! storage, and the panel UI are injected capabilities.

pub mod coordinator;
pub mod host;
pub mod model;
pub mod panel;
pub mod plugin;
pub mod store;
