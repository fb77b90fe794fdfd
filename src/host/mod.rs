// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Navtrail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Navtrail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Host-facing capability contract.
//!
//! The core never touches a scene graph directly; it consumes this trait.
//! Notifications carry no payload — on receipt the coordinator re-queries
//! the host for the current page and selection.

use tokio::sync::mpsc;

use crate::model::{LayoutMode, NodeId, NodeKind, PageId};

pub mod fake;

pub use fake::FakeHost;

/// Identity and display name of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub id: PageId,
    pub name: String,
}

/// Identity, display name, and typing of a selectable object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub layout_mode: LayoutMode,
}

/// Marker event: the host's selection changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChanged;

/// Cancellable handle on the host's selection-change notification stream.
#[derive(Debug)]
pub struct SelectionEvents {
    rx: mpsc::UnboundedReceiver<SelectionChanged>,
}

impl SelectionEvents {
    pub fn new(rx: mpsc::UnboundedReceiver<SelectionChanged>) -> Self {
        Self { rx }
    }

    /// Next notification, or `None` once the host side shut down.
    pub async fn next(&mut self) -> Option<SelectionChanged> {
        self.rx.recv().await
    }

    /// Cancel the subscription; the host observes a closed channel.
    pub fn cancel(&mut self) {
        self.rx.close();
    }
}

/// Abstract host contract (scene graph, viewport, panel chrome).
///
/// Commands take `&self`: real hosts expose a process-global API surface and
/// the fake uses shared interior state.
pub trait Host {
    /// Page the user is currently on.
    fn current_page(&self) -> PageInfo;

    /// Ordered selection on the current page; only the first element is
    /// significant to the history.
    fn selection(&self) -> Vec<NodeInfo>;

    fn resolve_page(&self, page_id: &PageId) -> Option<PageInfo>;

    /// Resolve a node within an already-resolved page.
    fn resolve_node(&self, page_id: &PageId, node_id: &NodeId) -> Option<NodeInfo>;

    fn set_current_page(&self, page_id: &PageId);

    /// Replace the current selection with the single given node. Real hosts
    /// echo this back as a selection-change notification.
    fn select_node(&self, node_id: &NodeId);

    /// Ask the viewport to scroll/zoom the node into view.
    fn frame_node(&self, node_id: &NodeId);

    /// Show a transient user-facing notice.
    fn notify(&self, message: &str);

    fn resize_panel(&self, width: u32, height: u32);

    /// Subscribe to selection-change notifications.
    fn subscribe_selection(&self) -> SelectionEvents;
}
