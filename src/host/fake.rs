// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Navtrail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Navtrail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::model::{LayoutMode, NodeId, NodeKind, PageId};

use super::{Host, NodeInfo, PageInfo, SelectionChanged, SelectionEvents};

/// Scripted in-memory host used by tests and benches.
///
/// Clones share state. `select_node` and `set_user_selection` emit the same
/// selection-change echo a real host produces, which is exactly what the
/// coordinator's suppression handling is up against.
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    inner: Arc<Mutex<FakeHostInner>>,
}

#[derive(Debug, Default)]
struct FakeHostInner {
    pages: Vec<PageInfo>,
    nodes: HashMap<PageId, Vec<NodeInfo>>,
    current_page: Option<PageId>,
    selection: Vec<NodeId>,
    notices: Vec<String>,
    framed: Vec<NodeId>,
    panel_size: Option<(u32, u32)>,
    subscriber: Option<mpsc::UnboundedSender<SelectionChanged>>,
}

impl FakeHostInner {
    fn emit(&self) {
        if let Some(subscriber) = &self.subscriber {
            let _ = subscriber.send(SelectionChanged);
        }
    }

    fn node_info(&self, page_id: &PageId, node_id: &NodeId) -> Option<NodeInfo> {
        self.nodes
            .get(page_id)?
            .iter()
            .find(|node| &node.id == node_id)
            .cloned()
    }
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page; the first page added becomes the current one.
    pub fn add_page(&self, id: &str, name: &str) -> PageId {
        let page_id = PageId::new(id).expect("fake page id");
        let mut inner = self.lock();
        inner.pages.push(PageInfo {
            id: page_id.clone(),
            name: name.to_owned(),
        });
        if inner.current_page.is_none() {
            inner.current_page = Some(page_id.clone());
        }
        page_id
    }

    pub fn add_node(
        &self,
        page_id: &PageId,
        id: &str,
        name: &str,
        kind: NodeKind,
        layout_mode: LayoutMode,
    ) -> NodeId {
        let node_id = NodeId::new(id).expect("fake node id");
        self.lock()
            .nodes
            .entry(page_id.clone())
            .or_default()
            .push(NodeInfo {
                id: node_id.clone(),
                name: name.to_owned(),
                kind,
                layout_mode,
            });
        node_id
    }

    /// Drop a page from the document, simulating a stale reference.
    pub fn remove_page(&self, page_id: &PageId) {
        let mut inner = self.lock();
        inner.pages.retain(|page| &page.id != page_id);
        inner.nodes.remove(page_id);
    }

    /// Drop a node from its page, simulating a stale node reference.
    pub fn remove_node(&self, page_id: &PageId, node_id: &NodeId) {
        let mut inner = self.lock();
        if let Some(nodes) = inner.nodes.get_mut(page_id) {
            nodes.retain(|node| &node.id != node_id);
        }
        inner.selection.retain(|selected| selected != node_id);
    }

    /// The user changes the selection; emits the notification.
    pub fn set_user_selection(&self, node_ids: Vec<NodeId>) {
        let mut inner = self.lock();
        inner.selection = node_ids;
        inner.emit();
    }

    /// Fire a notification without touching state (e.g. a host-side quirk).
    pub fn emit_selection_change(&self) {
        self.lock().emit();
    }

    pub fn current_page_id(&self) -> Option<PageId> {
        self.lock().current_page.clone()
    }

    pub fn selected(&self) -> Vec<NodeId> {
        self.lock().selection.clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.lock().notices.clone()
    }

    pub fn framed(&self) -> Vec<NodeId> {
        self.lock().framed.clone()
    }

    pub fn panel_size(&self) -> Option<(u32, u32)> {
        self.lock().panel_size
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeHostInner> {
        self.inner.lock().expect("fake host lock poisoned")
    }
}

impl Host for FakeHost {
    fn current_page(&self) -> PageInfo {
        let inner = self.lock();
        let current = inner
            .current_page
            .as_ref()
            .expect("fake host has no current page");
        inner
            .pages
            .iter()
            .find(|page| &page.id == current)
            .cloned()
            .expect("fake host current page resolves")
    }

    fn selection(&self) -> Vec<NodeInfo> {
        let inner = self.lock();
        let Some(current) = inner.current_page.clone() else {
            return Vec::new();
        };
        inner
            .selection
            .iter()
            .filter_map(|node_id| inner.node_info(&current, node_id))
            .collect()
    }

    fn resolve_page(&self, page_id: &PageId) -> Option<PageInfo> {
        self.lock()
            .pages
            .iter()
            .find(|page| &page.id == page_id)
            .cloned()
    }

    fn resolve_node(&self, page_id: &PageId, node_id: &NodeId) -> Option<NodeInfo> {
        self.lock().node_info(page_id, node_id)
    }

    fn set_current_page(&self, page_id: &PageId) {
        self.lock().current_page = Some(page_id.clone());
    }

    fn select_node(&self, node_id: &NodeId) {
        let mut inner = self.lock();
        inner.selection = vec![node_id.clone()];
        // The echo the real host produces for a programmatic selection.
        inner.emit();
    }

    fn frame_node(&self, node_id: &NodeId) {
        self.lock().framed.push(node_id.clone());
    }

    fn notify(&self, message: &str) {
        self.lock().notices.push(message.to_owned());
    }

    fn resize_panel(&self, width: u32, height: u32) {
        self.lock().panel_size = Some((width, height));
    }

    fn subscribe_selection(&self) -> SelectionEvents {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().subscriber = Some(tx);
        SelectionEvents::new(rx)
    }
}
