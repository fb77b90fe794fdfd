// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Navtrail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Navtrail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end flows against the scripted host and the in-memory storage:
//! ready capture, debounce coalescing, echo suppression, navigation, lock
//! behavior, and survival across a simulated process restart.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;

use navtrail::host::{FakeHost, Host};
use navtrail::model::{LayoutMode, NodeId, NodeKind, PageId};
use navtrail::panel::{PanelRequest, PanelUpdate, MIN_PANEL_HEIGHT, PANEL_WIDTH};
use navtrail::plugin::Plugin;
use navtrail::store::{HistoryStore, MemoryStorage};

struct Scene {
    host: FakeHost,
    cover: PageId,
    specs: PageId,
    hero: NodeId,
    title: NodeId,
}

fn scene() -> Scene {
    let host = FakeHost::new();
    let cover = host.add_page("0:1", "Cover");
    let hero = host.add_node(&cover, "1:1", "Hero", NodeKind::Frame, LayoutMode::Vertical);
    let title = host.add_node(&cover, "1:2", "Title", NodeKind::Text, LayoutMode::None);
    let specs = host.add_page("0:2", "Specs");
    Scene {
        host,
        cover,
        specs,
        hero,
        title,
    }
}

async fn started(
    host: &FakeHost,
    storage: &MemoryStorage,
) -> (
    Plugin<FakeHost, MemoryStorage>,
    mpsc::UnboundedReceiver<PanelUpdate>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let plugin = Plugin::start(host.clone(), storage.clone(), tx)
        .await
        .expect("start plugin");
    (plugin, rx)
}

async fn persisted_history(storage: &MemoryStorage) -> navtrail::model::History {
    let mut store = HistoryStore::new(storage.clone());
    store.load().await.expect("load").clone()
}

fn drain(rx: &mut mpsc::UnboundedReceiver<PanelUpdate>) -> Vec<PanelUpdate> {
    let mut updates = Vec::new();
    while let Ok(update) = rx.try_recv() {
        updates.push(update);
    }
    updates
}

#[tokio::test]
async fn startup_captures_the_current_location_before_any_panel_message() {
    let scene = scene();
    let storage = MemoryStorage::new();
    let (plugin, _rx) = started(&scene.host, &storage).await;

    assert_eq!(plugin.history().len(), 1);
    let front = plugin.history().get(0).expect("front");
    assert_eq!(front.page_id, scene.cover);
    assert_eq!(front.node_id, None);
    assert_eq!(front.node_type, NodeKind::Page);
    assert_eq!(persisted_history(&storage).await.len(), 1);
}

#[tokio::test]
async fn ready_syncs_panel_and_captures_the_current_location() {
    let scene = scene();
    let storage = MemoryStorage::new();
    let (mut plugin, mut rx) = started(&scene.host, &storage).await;

    assert_eq!(scene.host.panel_size(), Some((PANEL_WIDTH, 400)));

    plugin
        .handle_request(PanelRequest::Ready)
        .await
        .expect("ready");

    assert_eq!(plugin.history().len(), 1);
    let front = plugin.history().get(0).expect("front");
    assert_eq!(front.page_id, scene.cover);
    assert_eq!(front.node_id, None);
    assert_eq!(front.node_type, NodeKind::Page);

    let updates = drain(&mut rx);
    assert!(updates.contains(&PanelUpdate::Locked { locked: false }));
    assert!(matches!(updates.last(), Some(PanelUpdate::History { history }) if history.len() == 1));
}

#[tokio::test]
async fn explicit_sync_requests_resend_state() {
    let scene = scene();
    let storage = MemoryStorage::new();
    let (mut plugin, mut rx) = started(&scene.host, &storage).await;
    drain(&mut rx);

    plugin
        .handle_request(PanelRequest::GetHistory)
        .await
        .expect("get history");
    plugin
        .handle_request(PanelRequest::GetLockState)
        .await
        .expect("get lock state");

    let expected = plugin.history().clone();
    let updates = drain(&mut rx);
    assert_eq!(
        updates,
        vec![
            PanelUpdate::History { history: expected },
            PanelUpdate::Locked { locked: false },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn debounce_coalesces_a_burst_into_one_entry() {
    let scene = scene();
    let storage = MemoryStorage::new();
    let (plugin, _rx) = started(&scene.host, &storage).await;

    let (req_tx, req_rx) = mpsc::unbounded_channel();
    let loop_handle = tokio::spawn(plugin.run(req_rx));
    sleep(Duration::from_millis(1)).await;

    // Three changes inside the quiet window; only the last state counts.
    for node in [&scene.hero, &scene.title, &scene.hero] {
        scene.host.set_user_selection(vec![node.clone()]);
        sleep(Duration::from_millis(100)).await;
    }
    sleep(Duration::from_millis(400)).await;

    // [hero, cover-page]: the burst collapsed into one new entry.
    let history = persisted_history(&storage).await;
    assert_eq!(history.len(), 2);
    assert_eq!(history.get(0).expect("front").node_id, Some(scene.hero.clone()));

    drop(req_tx);
    loop_handle.await.expect("join").expect("run");
}

#[tokio::test(start_paused = true)]
async fn a_quiet_stream_never_records_until_input_settles() {
    let scene = scene();
    let storage = MemoryStorage::new();
    let (plugin, _rx) = started(&scene.host, &storage).await;

    let (req_tx, req_rx) = mpsc::unbounded_channel();
    let loop_handle = tokio::spawn(plugin.run(req_rx));
    sleep(Duration::from_millis(1)).await;

    // A continuous stream of changes defers recording indefinitely; only
    // the startup entry is persisted while it lasts.
    for _ in 0..10 {
        scene.host.set_user_selection(vec![scene.hero.clone()]);
        sleep(Duration::from_millis(250)).await;
    }
    assert_eq!(persisted_history(&storage).await.len(), 1);

    sleep(Duration::from_millis(350)).await;
    let history = persisted_history(&storage).await;
    assert_eq!(history.len(), 2);
    assert_eq!(history.get(0).expect("front").node_id, Some(scene.hero.clone()));

    drop(req_tx);
    loop_handle.await.expect("join").expect("run");
}

#[tokio::test(start_paused = true)]
async fn spurious_notification_without_a_change_adds_no_duplicate() {
    let scene = scene();
    let storage = MemoryStorage::new();
    let (plugin, _rx) = started(&scene.host, &storage).await;

    let (req_tx, req_rx) = mpsc::unbounded_channel();
    let loop_handle = tokio::spawn(plugin.run(req_rx));
    sleep(Duration::from_millis(1)).await;

    // The host fires a notification although nothing actually changed.
    scene.host.emit_selection_change();
    sleep(Duration::from_millis(350)).await;

    // The re-queried location dedups against the startup entry.
    let history = persisted_history(&storage).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history.get(0).expect("front").node_id, None);
    assert_eq!(history.get(0).expect("front").page_id, scene.cover);

    drop(req_tx);
    loop_handle.await.expect("join").expect("run");
}

#[tokio::test(start_paused = true)]
async fn navigation_echo_is_suppressed_exactly_once() {
    let scene = scene();
    let storage = MemoryStorage::new();
    let (plugin, _rx) = started(&scene.host, &storage).await;

    let (req_tx, req_rx) = mpsc::unbounded_channel();
    let loop_handle = tokio::spawn(plugin.run(req_rx));
    sleep(Duration::from_millis(1)).await;

    req_tx.send(PanelRequest::Ready).expect("send ready");
    sleep(Duration::from_millis(10)).await;

    scene.host.set_user_selection(vec![scene.hero.clone()]);
    sleep(Duration::from_millis(350)).await;

    // History: [hero, cover-page].
    assert_eq!(persisted_history(&storage).await.len(), 2);

    // Navigating back re-selects hero; the host echoes one notification.
    req_tx
        .send(PanelRequest::Navigate { index: 0 })
        .expect("send navigate");
    sleep(Duration::from_millis(400)).await;

    assert_eq!(scene.host.selected(), vec![scene.hero.clone()]);
    assert_eq!(scene.host.framed(), vec![scene.hero.clone()]);
    // The echo produced no new entry.
    assert_eq!(persisted_history(&storage).await.len(), 2);

    // A second, independent change afterwards is processed normally.
    scene.host.set_user_selection(vec![scene.title.clone()]);
    sleep(Duration::from_millis(350)).await;

    let history = persisted_history(&storage).await;
    assert_eq!(history.len(), 3);
    assert_eq!(history.get(0).expect("front").node_id, Some(scene.title.clone()));

    drop(req_tx);
    loop_handle.await.expect("join").expect("run");
}

#[tokio::test]
async fn navigating_to_a_missing_page_notifies_and_changes_nothing() {
    let scene = scene();
    let storage = MemoryStorage::new();
    let (mut plugin, _rx) = started(&scene.host, &storage).await;

    scene.host.set_current_page(&scene.specs);
    plugin.capture_current().await.expect("capture");
    scene.host.set_current_page(&scene.cover);
    scene.host.remove_page(&scene.specs);

    let before = plugin.history().clone();
    plugin.handle_request(PanelRequest::Navigate { index: 0 })
        .await
        .expect("navigate");

    assert_eq!(scene.host.notices(), vec!["Page \"Specs\" not found".to_owned()]);
    assert_eq!(plugin.history(), &before);
    assert_eq!(persisted_history(&storage).await, before);
    assert_eq!(scene.host.current_page_id(), Some(scene.cover.clone()));
    assert!(scene.host.selected().is_empty());
}

#[tokio::test]
async fn navigating_to_a_missing_node_still_reaches_the_page() {
    let scene = scene();
    let storage = MemoryStorage::new();
    let (mut plugin, _rx) = started(&scene.host, &storage).await;

    scene.host.set_user_selection(vec![scene.hero.clone()]);
    plugin.capture_current().await.expect("capture");

    scene.host.remove_node(&scene.cover, &scene.hero);
    scene.host.set_current_page(&scene.specs);

    plugin.handle_request(PanelRequest::Navigate { index: 0 })
        .await
        .expect("navigate");

    assert_eq!(scene.host.current_page_id(), Some(scene.cover.clone()));
    assert!(scene.host.selected().is_empty());
    assert!(scene.host.framed().is_empty());
    assert!(scene.host.notices().is_empty());
}

#[tokio::test]
async fn out_of_range_navigation_is_a_noop() {
    let scene = scene();
    let storage = MemoryStorage::new();
    let (mut plugin, _rx) = started(&scene.host, &storage).await;

    plugin.handle_request(PanelRequest::Navigate { index: 7 })
        .await
        .expect("navigate");

    assert!(scene.host.notices().is_empty());
    assert_eq!(scene.host.current_page_id(), Some(scene.cover.clone()));
}

#[tokio::test]
async fn lock_blocks_captures_until_toggled_off() {
    let scene = scene();
    let storage = MemoryStorage::new();
    let (mut plugin, mut rx) = started(&scene.host, &storage).await;

    plugin.handle_request(PanelRequest::Ready).await.expect("ready");
    assert_eq!(plugin.history().len(), 1);

    plugin
        .handle_request(PanelRequest::ToggleLock)
        .await
        .expect("toggle");
    assert!(drain(&mut rx).contains(&PanelUpdate::Locked { locked: true }));

    scene.host.set_user_selection(vec![scene.hero.clone()]);
    assert!(plugin.on_selection_change());
    plugin.on_debounce_elapsed().await.expect("elapsed");
    assert_eq!(plugin.history().len(), 1);

    // Removal stays available while locked.
    plugin
        .handle_request(PanelRequest::RemoveEntry { index: 0 })
        .await
        .expect("remove");
    assert!(plugin.history().is_empty());

    plugin
        .handle_request(PanelRequest::ToggleLock)
        .await
        .expect("toggle");
    assert!(plugin.on_selection_change());
    plugin.on_debounce_elapsed().await.expect("elapsed");
    assert_eq!(plugin.history().len(), 1);
    assert_eq!(
        plugin.history().get(0).expect("front").node_id,
        Some(scene.hero.clone())
    );
}

#[tokio::test]
async fn clearing_history_does_not_reset_the_lock() {
    let scene = scene();
    let storage = MemoryStorage::new();
    let (mut plugin, _rx) = started(&scene.host, &storage).await;

    plugin.handle_request(PanelRequest::ToggleLock).await.expect("toggle");
    plugin
        .handle_request(PanelRequest::ClearHistory)
        .await
        .expect("clear");

    assert!(plugin.locked());
    assert!(plugin.history().is_empty());
}

#[tokio::test]
async fn resize_requests_keep_width_and_clamp_height() {
    let scene = scene();
    let storage = MemoryStorage::new();
    let (mut plugin, _rx) = started(&scene.host, &storage).await;

    plugin
        .handle_request(PanelRequest::Resize { height: 50 })
        .await
        .expect("resize");
    assert_eq!(scene.host.panel_size(), Some((PANEL_WIDTH, MIN_PANEL_HEIGHT)));

    plugin
        .handle_request(PanelRequest::Resize { height: 900 })
        .await
        .expect("resize");
    assert_eq!(scene.host.panel_size(), Some((PANEL_WIDTH, 900)));
}

#[tokio::test]
async fn history_survives_a_simulated_restart() {
    let scene = scene();
    let storage = MemoryStorage::new();

    {
        let (mut plugin, _rx) = started(&scene.host, &storage).await;
        plugin.handle_request(PanelRequest::Ready).await.expect("ready");
        scene.host.set_user_selection(vec![scene.hero.clone()]);
        plugin.capture_current().await.expect("capture");
        assert_eq!(plugin.history().len(), 2);
    }

    // New plugin instance over the same backing storage.
    let (plugin, _rx) = started(&scene.host, &storage).await;
    assert_eq!(plugin.history().len(), 2);
    assert_eq!(
        plugin.history().get(0).expect("front").node_id,
        Some(scene.hero.clone())
    );
    // The lock flag is process-lifetime state and does not survive.
    assert!(!plugin.locked());
}
