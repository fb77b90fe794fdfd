// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Navtrail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Navtrail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Message contract with the presentation layer.
//!
//! Both directions are plain data: the panel never reaches into the store,
//! and the core never renders.

use serde::{Deserialize, Serialize};

use crate::model::History;

/// Fixed panel width; hosts honor only the height of a resize request.
pub const PANEL_WIDTH: u32 = 280;

/// Height the panel opens with.
pub const INITIAL_PANEL_HEIGHT: u32 = 400;

/// Lower clamp for resize requests.
pub const MIN_PANEL_HEIGHT: u32 = 200;

/// Inbound panel → core messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PanelRequest {
    /// The panel finished mounting: sync state and capture the current
    /// location immediately.
    Ready,
    GetHistory,
    GetLockState,
    ToggleLock,
    ClearHistory,
    RemoveEntry { index: usize },
    Navigate { index: usize },
    Resize { height: u32 },
}

/// Outbound core → panel messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PanelUpdate {
    History { history: History },
    Locked { locked: bool },
}

/// Clamp a requested panel height to the allowed minimum.
pub fn clamp_panel_height(height: u32) -> u32 {
    height.max(MIN_PANEL_HEIGHT)
}
