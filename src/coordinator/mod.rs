// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Navtrail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Navtrail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Selection-event coordination: debouncing bursts and suppressing echoes.
//!
//! The machine is pure — transitions return directives and the event loop
//! owns the actual timer — so every path is unit-testable without a runtime.

use std::time::Duration;

use crate::host::{Host, NodeInfo, PageInfo};
use crate::model::{derive_icon, truncate_display_name, HistoryEntry, LayoutMode, NodeKind};

/// Quiet period required before a burst of selection changes is recorded.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Coordinator states.
///
/// `Suppressed` is armed strictly before a programmatic selection change and
/// consumes exactly one notification; it does not queue. A notification in
/// `Idle` or `Debouncing` (re)arms the debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatorState {
    #[default]
    Idle,
    Suppressed,
    Debouncing,
}

/// What the event loop should do with the notification it just handed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationDirective {
    /// Self-triggered echo; drop it and record nothing.
    Discard,
    /// (Re)arm the debounce timer for [`DEBOUNCE_DELAY`].
    RestartTimer,
}

#[derive(Debug, Default)]
pub struct SelectionCoordinator {
    state: CoordinatorState,
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Arm suppression for the next notification. Overwrites whatever state
    /// was pending — a dangling suppression from a navigation whose echo
    /// never arrived is simply replaced, never queued.
    pub fn suppress_next(&mut self) {
        self.state = CoordinatorState::Suppressed;
    }

    /// A selection-change notification arrived.
    pub fn on_notification(&mut self) -> NotificationDirective {
        match self.state {
            CoordinatorState::Suppressed => {
                self.state = CoordinatorState::Idle;
                NotificationDirective::Discard
            }
            CoordinatorState::Idle | CoordinatorState::Debouncing => {
                self.state = CoordinatorState::Debouncing;
                NotificationDirective::RestartTimer
            }
        }
    }

    /// The armed timer elapsed without being restarted. Returns whether the
    /// current selection should be captured now.
    pub fn on_timer_elapsed(&mut self) -> bool {
        if self.state == CoordinatorState::Debouncing {
            self.state = CoordinatorState::Idle;
            true
        } else {
            // A navigation re-armed suppression while the timer was live;
            // the stale expiry records nothing.
            false
        }
    }
}

/// Normalize the host's current selection into an entry: the first selected
/// object wins; an empty selection records the page itself.
pub fn snapshot_location<H: Host>(host: &H, timestamp: u64) -> HistoryEntry {
    let page = host.current_page();
    match host.selection().into_iter().next() {
        Some(node) => entry_for_node(&page, &node, timestamp),
        None => entry_for_page(&page, timestamp),
    }
}

fn entry_for_page(page: &PageInfo, timestamp: u64) -> HistoryEntry {
    HistoryEntry {
        page_id: page.id.clone(),
        page_name: page.name.clone(),
        node_id: None,
        node_name: None,
        node_type: NodeKind::Page,
        layout_mode: LayoutMode::None,
        icon: Some(derive_icon(NodeKind::Page, LayoutMode::None)),
        timestamp,
    }
}

fn entry_for_node(page: &PageInfo, node: &NodeInfo, timestamp: u64) -> HistoryEntry {
    HistoryEntry {
        page_id: page.id.clone(),
        page_name: page.name.clone(),
        node_id: Some(node.id.clone()),
        node_name: Some(truncate_display_name(&node.name)),
        node_type: node.kind,
        layout_mode: node.layout_mode,
        icon: Some(derive_icon(node.kind, node.layout_mode)),
        timestamp,
    }
}
