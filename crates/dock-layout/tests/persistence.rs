// ABOUTME: Saving and restoring layout state through memory and file stores.
// ABOUTME: Covers auto-save on destroy, auto-load on build, key filtering and live loads.

use dock_core::{
    Edge, FileStateStore, FxSettings, LayoutConfig, LayoutSnapshot, MemoryStateStore,
    PaneSnapshot, SizeSpec, StateField, StateKey, StateStore,
};
use dock_layout::{CloseOptions, HeadlessSurface, Layout, LayoutBuilder, PaneStatus};

fn config() -> LayoutConfig {
    let mut config = LayoutConfig::default();
    for edge in Edge::BORDERS {
        if let Some(options) = config.pane_mut(edge) {
            options.fx = FxSettings::none();
        }
    }
    config
}

fn surface() -> HeadlessSurface {
    HeadlessSurface::new(800, 600)
        .with_pane(Edge::East)
        .with_pane(Edge::West)
}

fn four_panes() -> HeadlessSurface {
    HeadlessSurface::with_all_panes(800, 600)
        .with_natural_size(Edge::North, 0, 50)
        .with_natural_size(Edge::South, 0, 50)
}

#[test]
fn state_survives_destroy_and_rebuild() {
    let store = MemoryStateStore::new();
    let mut layout = LayoutBuilder::new(config())
        .state_store(store.clone())
        .build(surface())
        .unwrap();
    layout.close(Edge::West, CloseOptions::default());
    layout.size_pane(Edge::East, SizeSpec::Pixels(300));
    layout.destroy();

    let saved = store.snapshot().unwrap();
    assert_eq!(
        saved.pane(Edge::West),
        Some(&PaneSnapshot {
            size: Some(200),
            is_closed: Some(true),
            is_hidden: Some(false),
        })
    );
    assert_eq!(saved.pane(Edge::East).unwrap().size, Some(300));

    let layout = LayoutBuilder::new(config())
        .state_store(store)
        .build(surface())
        .unwrap();
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Closed));
    assert_eq!(layout.pane(Edge::East).unwrap().size, 300);
    assert_eq!(layout.center_rect().width, 800 - 6 - 306);
}

#[test]
fn only_configured_keys_are_saved() {
    let store = MemoryStateStore::new();
    let mut config = config();
    config.state.keys = StateKey::parse_list("west.isClosed,east__size");
    let mut layout = LayoutBuilder::new(config)
        .state_store(store.clone())
        .build(surface())
        .unwrap();

    layout.save_state().unwrap();
    let saved = store.snapshot().unwrap();
    assert_eq!(
        saved.keys(),
        vec![
            StateKey::new(Edge::East, StateField::Size),
            StateKey::new(Edge::West, StateField::IsClosed),
        ]
    );
}

#[test]
fn sliding_panes_are_saved_closed() {
    let mut config = config();
    config.west.init_closed = true;
    let mut layout = Layout::new(config, surface()).unwrap();
    layout.slide_open(Edge::West);

    let state = layout.get_state(&[StateKey::new(Edge::West, StateField::IsClosed)]);
    assert_eq!(state.pane(Edge::West).unwrap().is_closed, Some(true));
    assert!(state.pane(Edge::East).is_none());
}

#[test]
fn auto_load_can_be_turned_off() {
    let mut snapshot = LayoutSnapshot::new();
    snapshot.pane_mut(Edge::West).is_hidden = Some(true);
    let mut config = config();
    config.state.auto_load = false;

    let layout = LayoutBuilder::new(config)
        .state_store(MemoryStateStore::with_snapshot(snapshot))
        .build(surface())
        .unwrap();
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Open));
}

#[test]
fn saved_hidden_pane_starts_hidden() {
    let mut snapshot = LayoutSnapshot::new();
    snapshot.pane_mut(Edge::West).is_hidden = Some(true);
    snapshot.pane_mut(Edge::West).is_closed = Some(true);

    let layout = LayoutBuilder::new(config())
        .state_store(MemoryStateStore::with_snapshot(snapshot))
        .build(surface())
        .unwrap();
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Hidden));
    assert_eq!(layout.center_rect().x, 0);
}

#[test]
fn loading_state_applies_it_live() {
    let mut layout = Layout::new(config(), surface()).unwrap();

    let mut snapshot = LayoutSnapshot::new();
    *snapshot.pane_mut(Edge::West) = PaneSnapshot {
        size: Some(150),
        is_closed: Some(true),
        is_hidden: None,
    };
    snapshot.pane_mut(Edge::East).is_hidden = Some(true);
    layout.load_state(&snapshot, false);

    let west = layout.pane(Edge::West).unwrap();
    assert_eq!(west.status(), PaneStatus::Closed);
    assert_eq!(west.size, 150);
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Hidden));
    assert_eq!(layout.config().west.size, Some(SizeSpec::Pixels(150)));

    let mut reopen = LayoutSnapshot::new();
    reopen.pane_mut(Edge::West).is_closed = Some(false);
    reopen.pane_mut(Edge::East).is_hidden = Some(false);
    layout.load_state(&reopen, false);
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Open));
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Closed));
}

#[test]
fn captured_state_reapplies_for_any_key_set() {
    let mut source = Layout::new(config(), four_panes()).unwrap();
    source.close(Edge::West, CloseOptions::default());
    source.size_pane(Edge::East, SizeSpec::Pixels(300));
    source.size_pane(Edge::South, SizeSpec::Pixels(80));
    source.hide(Edge::North, false);

    let key_sets = [
        StateKey::defaults(),
        StateKey::parse_list("north.size,south.size,east.size,west.size"),
        StateKey::parse_list("west.isClosed,east.isHidden"),
        StateKey::parse_list("east.size,east.isClosed"),
        StateKey::parse_list("north.isHidden,north.size,south.isClosed"),
    ];
    for keys in key_sets {
        let captured = source.get_state(&keys);
        assert_eq!(captured.keys().len(), keys.len());

        let mut target = Layout::new(config(), four_panes()).unwrap();
        target.load_state(&captured, false);
        assert_eq!(target.get_state(&keys), captured, "keys: {:?}", keys);
    }
}

#[test]
fn file_store_roundtrip_through_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admin.state");
    let mut layout = LayoutBuilder::new(config())
        .state_store(FileStateStore::new(&path))
        .build(surface())
        .unwrap();

    layout.close(Edge::East, CloseOptions::default());
    layout.save_state().unwrap();
    assert!(path.exists());

    let loaded = FileStateStore::new(&path).load().unwrap().unwrap();
    assert_eq!(loaded.pane(Edge::East).unwrap().is_closed, Some(true));

    assert!(layout.load_saved_state().unwrap());
    layout.delete_saved_state().unwrap();
    assert!(!path.exists());
    assert!(!layout.load_saved_state().unwrap());
}

#[test]
fn saving_without_a_store_is_a_no_op() {
    let mut layout = Layout::new(config(), surface()).unwrap();
    layout.save_state().unwrap();
    assert!(!layout.load_saved_state().unwrap());
    layout.delete_saved_state().unwrap();
}
