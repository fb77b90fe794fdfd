// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Navtrail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Navtrail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plugin controller.
//!
//! Owns the host, the history store, and the selection coordinator, and runs
//! the single-threaded event loop over selection notifications, panel
//! requests, and the restartable debounce timer. All state lives here as
//! explicit fields — independent plugin instances never interfere.

use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use crate::coordinator::{
    snapshot_location, NotificationDirective, SelectionCoordinator, DEBOUNCE_DELAY,
};
use crate::host::Host;
use crate::model::History;
use crate::panel::{clamp_panel_height, PanelRequest, PanelUpdate, INITIAL_PANEL_HEIGHT, PANEL_WIDTH};
use crate::store::{HistoryStore, Storage, StoreError};

pub struct Plugin<H, S> {
    host: H,
    store: HistoryStore<S>,
    coordinator: SelectionCoordinator,
    updates: mpsc::UnboundedSender<PanelUpdate>,
}

impl<H: Host, S: Storage> Plugin<H, S> {
    /// Load the persisted history, open the panel at its initial size, and
    /// record where the user already is, before any panel message arrives.
    pub async fn start(
        host: H,
        storage: S,
        updates: mpsc::UnboundedSender<PanelUpdate>,
    ) -> Result<Self, StoreError> {
        let mut store = HistoryStore::new(storage);
        store.load().await?;
        host.resize_panel(PANEL_WIDTH, INITIAL_PANEL_HEIGHT);

        let mut plugin = Self {
            host,
            store,
            coordinator: SelectionCoordinator::new(),
            updates,
        };
        // The later `ready` capture dedups against this entry.
        plugin.capture_current().await?;
        Ok(plugin)
    }

    pub fn history(&self) -> &History {
        self.store.history()
    }

    pub fn locked(&self) -> bool {
        self.store.locked()
    }

    /// Dispatch one inbound panel message.
    pub async fn handle_request(&mut self, request: PanelRequest) -> Result<(), StoreError> {
        match request {
            PanelRequest::Ready => self.on_ready().await?,
            PanelRequest::GetHistory => self.push_history(),
            PanelRequest::GetLockState => self.push_lock(),
            PanelRequest::ToggleLock => {
                self.store.toggle_locked();
                self.push_lock();
            }
            PanelRequest::ClearHistory => {
                self.store.clear().await?;
                self.push_history();
            }
            PanelRequest::RemoveEntry { index } => {
                self.store.remove_at(index).await?;
                self.push_history();
            }
            PanelRequest::Navigate { index } => self.navigate(index),
            PanelRequest::Resize { height } => {
                self.host.resize_panel(PANEL_WIDTH, clamp_panel_height(height));
            }
        }
        Ok(())
    }

    /// The panel signalled readiness: sync its state, then capture the
    /// current location immediately, bypassing the debounce.
    pub async fn on_ready(&mut self) -> Result<(), StoreError> {
        self.push_history();
        self.push_lock();
        self.capture_current().await
    }

    /// Record where the user is right now.
    pub async fn capture_current(&mut self) -> Result<(), StoreError> {
        let entry = snapshot_location(&self.host, now_millis());
        self.store.append(entry).await?;
        self.push_history();
        Ok(())
    }

    /// Jump to the recorded location at `index`. Out-of-range is a no-op; a
    /// stale page produces a notice and changes nothing; a stale node
    /// degrades to page-only navigation.
    pub fn navigate(&mut self, index: usize) {
        let Some(entry) = self.store.history().get(index).cloned() else {
            return;
        };

        let Some(page) = self.host.resolve_page(&entry.page_id) else {
            self.host
                .notify(&format!("Page \"{}\" not found", entry.page_name));
            return;
        };

        let node = entry
            .node_id
            .as_ref()
            .and_then(|node_id| self.host.resolve_node(&page.id, node_id));
        match node {
            Some(node) => {
                // Suppression must be armed before the host can observe the
                // programmatic selection change.
                self.coordinator.suppress_next();
                self.host.set_current_page(&page.id);
                self.host.select_node(&node.id);
                self.host.frame_node(&node.id);
            }
            None => {
                // No selection change happens, so nothing to suppress.
                self.host.set_current_page(&page.id);
            }
        }
    }

    /// One selection-change notification arrived. Returns whether the
    /// debounce timer must be (re)armed.
    pub fn on_selection_change(&mut self) -> bool {
        matches!(
            self.coordinator.on_notification(),
            NotificationDirective::RestartTimer
        )
    }

    /// The armed debounce timer elapsed without being restarted.
    pub async fn on_debounce_elapsed(&mut self) -> Result<(), StoreError> {
        if self.coordinator.on_timer_elapsed() {
            self.capture_current().await?;
        }
        Ok(())
    }

    /// Event loop. Exits when both the host notification stream and the
    /// panel request stream are gone; a storage failure is surfaced to the
    /// embedder, which may build a fresh plugin over the same storage and
    /// retry.
    pub async fn run(
        mut self,
        mut requests: mpsc::UnboundedReceiver<PanelRequest>,
    ) -> Result<(), StoreError> {
        let mut events = self.host.subscribe_selection();
        let mut deadline: Option<Instant> = None;

        loop {
            tokio::select! {
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    deadline = None;
                    self.on_debounce_elapsed().await?;
                }
                event = events.next() => match event {
                    Some(_) => {
                        if self.on_selection_change() {
                            deadline = Some(Instant::now() + DEBOUNCE_DELAY);
                        }
                    }
                    None => break,
                },
                request = requests.recv() => match request {
                    Some(request) => self.handle_request(request).await?,
                    None => break,
                },
            }
        }

        Ok(())
    }

    fn push_history(&self) {
        // A closed panel channel only means nobody is watching.
        let _ = self.updates.send(PanelUpdate::History {
            history: self.store.history().clone(),
        });
    }

    fn push_lock(&self) {
        let _ = self.updates.send(PanelUpdate::Locked {
            locked: self.store.locked(),
        });
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
