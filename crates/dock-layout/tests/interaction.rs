// ABOUTME: Layout behavior driven by time and input: queued transitions, callbacks,
// ABOUTME: pointer slide triggers, hotkeys, debounced container resizes and resizer drags.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use dock_core::{Edge, FxSettings, LayoutConfig, SizeSpec, SlideCloseTrigger, SlideOpenTrigger};
use dock_layout::{
    CloseOptions, DragLimit, Flow, HeadlessSurface, Key, KeyInput, Layout, LayoutBuilder,
    LayoutError, LifecycleEvent, OpenOptions, PaneStatus, PointerKind, PointerTarget,
    RenderCommand,
};

fn east_west() -> HeadlessSurface {
    HeadlessSurface::new(800, 600)
        .with_pane(Edge::East)
        .with_pane(Edge::West)
}

fn instant(mut config: LayoutConfig) -> LayoutConfig {
    for edge in Edge::BORDERS {
        if let Some(options) = config.pane_mut(edge) {
            options.fx = FxSettings::none();
        }
    }
    config
}

const ANIMATION: Duration = Duration::from_millis(200);

#[test]
fn requests_wait_for_the_moving_pane() {
    let mut config = LayoutConfig::default();
    config.east.init_closed = true;
    let mut layout = Layout::new(config, east_west()).unwrap();

    layout.close(Edge::West, CloseOptions::default());
    assert!(layout.is_busy());

    layout.open(Edge::East, OpenOptions::default());
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Closed));
    let queued = layout.state().transitions.pending_for(Edge::West).unwrap();
    assert_eq!(queued.edge, Edge::East);

    layout.advance(ANIMATION);
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Closed));
    // the replayed open is now animating
    assert!(layout.is_busy());
    layout.advance(ANIMATION);
    assert!(!layout.is_busy());
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Open));
}

#[test]
fn latest_request_for_a_pane_wins() {
    let mut config = LayoutConfig::default();
    config.east.init_closed = true;
    let mut layout = Layout::new(config, east_west()).unwrap();

    layout.close(Edge::West, CloseOptions::default());
    layout.toggle(Edge::East, false);
    layout.hide(Edge::East, false);
    assert_eq!(layout.state().transitions.pending_len(), 1);

    layout.advance(ANIMATION);
    assert!(!layout.is_busy());
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Hidden));
}

#[test]
fn reopening_during_close_replays_afterwards() {
    let mut layout = Layout::new(LayoutConfig::default(), east_west()).unwrap();

    layout.close(Edge::West, CloseOptions::default());
    layout.open(Edge::West, OpenOptions::default());
    layout.advance(ANIMATION);
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Open));
    layout.advance(ANIMATION);
    assert!(!layout.is_busy());
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Open));
    assert_eq!(layout.center_rect().x, 206);
}

#[test]
fn queued_requests_keep_their_options() {
    let mut layout = Layout::new(LayoutConfig::default(), east_west()).unwrap();

    layout.close(Edge::West, CloseOptions::default());
    layout.close(Edge::East, CloseOptions::instant());
    layout.advance(ANIMATION);

    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Closed));
    assert!(!layout.is_busy());
}

#[test]
fn vetoed_replay_releases_the_requests_behind_it() {
    let mut config = LayoutConfig::default();
    config.north.size = Some(SizeSpec::Pixels(50));
    let mut layout = LayoutBuilder::new(config)
        .on_pane(Edge::East, LifecycleEvent::CloseStart, |_| Flow::Cancel)
        .build(east_west().with_pane(Edge::North))
        .unwrap();

    layout.close(Edge::West, CloseOptions::default());
    layout.close(Edge::East, CloseOptions::default());
    layout.close(Edge::North, CloseOptions::default());
    assert_eq!(layout.state().transitions.pending_len(), 2);

    layout.advance(ANIMATION);
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Open));
    assert_eq!(layout.state().transitions.pending_len(), 0);
    // north went ahead right after the veto
    assert!(layout.is_busy());
    layout.advance(ANIMATION);
    assert_eq!(layout.pane_state(Edge::North), Some(PaneStatus::Closed));
    assert!(!layout.is_busy());
}

#[test]
fn animations_use_the_configured_effect() {
    let mut config = LayoutConfig::default();
    config.west.fx.speed = Some(dock_core::Speed::Millis(50));
    let mut layout = Layout::new(config, east_west()).unwrap();
    layout.surface_mut().take_commands();

    layout.close(Edge::West, CloseOptions::default());
    let animate = layout
        .surface()
        .commands()
        .iter()
        .find_map(|c| match c {
            RenderCommand::Animate {
                duration, opening, ..
            } => Some((*duration, *opening)),
            _ => None,
        });
    assert_eq!(animate, Some((Duration::from_millis(50), false)));

    layout.advance(Duration::from_millis(49));
    assert!(layout.is_busy());
    layout.advance(Duration::from_millis(1));
    assert!(!layout.is_busy());
}

#[test]
fn start_callbacks_can_cancel() {
    let ends = Rc::new(RefCell::new(Vec::new()));
    let seen = ends.clone();
    let mut layout = LayoutBuilder::new(instant(LayoutConfig::default()))
        .on_pane(Edge::West, LifecycleEvent::CloseStart, |_| Flow::Cancel)
        .on(LifecycleEvent::CloseEnd, move |ctx| {
            seen.borrow_mut().push(ctx.edge);
            Flow::Continue
        })
        .build(east_west())
        .unwrap();

    layout.close(Edge::West, CloseOptions::default());
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Open));

    layout.close(Edge::East, CloseOptions::default());
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Closed));
    assert_eq!(*ends.borrow(), vec![Some(Edge::East)]);
}

#[test]
fn resize_start_cannot_be_vetoed() {
    let mut layout = LayoutBuilder::new(instant(LayoutConfig::default()))
        .on(LifecycleEvent::ResizeStart, |_| Flow::Cancel)
        .build(east_west())
        .unwrap();

    layout.size_pane(Edge::West, SizeSpec::Pixels(300));
    assert_eq!(layout.pane(Edge::West).unwrap().size, 300);
}

#[test]
fn callbacks_see_pane_and_layout_state() {
    let sizes = Rc::new(RefCell::new(Vec::new()));
    let seen = sizes.clone();
    let mut layout = LayoutBuilder::new(instant(LayoutConfig::default()))
        .on_pane(Edge::East, LifecycleEvent::ResizeEnd, move |ctx| {
            let pane = ctx.pane.map(|p| p.size);
            seen.borrow_mut().push((pane, ctx.layout.initialized));
            Flow::Continue
        })
        .build(east_west())
        .unwrap();

    layout.size_pane(Edge::East, SizeSpec::Percent(50.0));
    // 50% of 800 minus both open gutters
    assert_eq!(sizes.borrow().first(), Some(&(Some(394), true)));
}

#[test]
fn load_start_veto_fails_construction() {
    let result = LayoutBuilder::new(LayoutConfig::default())
        .on(LifecycleEvent::LoadStart, |_| Flow::Cancel)
        .build(east_west());
    assert!(matches!(result, Err(LayoutError::Cancelled)));
}

#[test]
fn resizer_click_slides_and_leaving_closes() {
    let mut config = instant(LayoutConfig::default());
    config.west.init_closed = true;
    let mut layout = Layout::new(config, east_west()).unwrap();
    let center = layout.center_rect();

    layout.pointer(Edge::West, PointerTarget::Resizer, PointerKind::Click);
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Sliding));
    assert_eq!(layout.center_rect(), center);

    layout.pointer(Edge::West, PointerTarget::Pane, PointerKind::Leave);
    layout.advance(Duration::from_millis(299));
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Sliding));

    // coming back cancels the pending close
    layout.pointer(Edge::West, PointerTarget::Pane, PointerKind::Enter);
    layout.advance(Duration::from_millis(500));
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Sliding));

    layout.pointer(Edge::West, PointerTarget::Pane, PointerKind::Leave);
    layout.advance(Duration::from_millis(300));
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Closed));
}

#[test]
fn mouse_enter_slides_open_after_the_delay() {
    let mut config = instant(LayoutConfig::default());
    config.west.init_closed = true;
    config.west.slide_trigger_open = SlideOpenTrigger::MouseEnter;
    config.west.slide_delay_open_ms = 100;
    config.west.slide_trigger_close = SlideCloseTrigger::Click;
    let mut layout = Layout::new(config, east_west()).unwrap();

    layout.pointer(Edge::West, PointerTarget::Resizer, PointerKind::Enter);
    layout.pointer(Edge::West, PointerTarget::Resizer, PointerKind::Leave);
    layout.advance(Duration::from_millis(200));
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Closed));

    layout.pointer(Edge::West, PointerTarget::Resizer, PointerKind::Enter);
    layout.advance(Duration::from_millis(100));
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Sliding));

    // click-to-close panes ignore leaving and close on an outside click
    layout.pointer(Edge::West, PointerTarget::Pane, PointerKind::Leave);
    layout.advance(Duration::from_millis(1000));
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Sliding));
    layout.pointer(Edge::Center, PointerTarget::Pane, PointerKind::Click);
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Closed));
}

#[test]
fn toggler_and_resizer_double_click_toggle() {
    let mut layout = Layout::new(instant(LayoutConfig::default()), east_west()).unwrap();

    layout.pointer(Edge::East, PointerTarget::Toggler, PointerKind::Click);
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Closed));
    layout.pointer(Edge::East, PointerTarget::Toggler, PointerKind::Click);
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Open));

    layout.pointer(Edge::East, PointerTarget::Resizer, PointerKind::DoubleClick);
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Closed));
}

#[test]
fn hotkeys_toggle_their_pane() {
    let mut config = instant(LayoutConfig::default());
    config.east.custom_hotkey = Some('e');
    config.west.enable_cursor_hotkey = false;
    let mut layout = Layout::new(config, east_west()).unwrap();

    assert!(!layout.key(KeyInput::new(Key::Left).ctrl()));
    assert_eq!(layout.pane_state(Edge::West), Some(PaneStatus::Open));

    assert!(layout.key(KeyInput::new(Key::Right).ctrl()));
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Closed));

    assert!(!layout.key(KeyInput::new(Key::Char('E'))));
    assert!(layout.key(KeyInput::new(Key::Char('E')).shift()));
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Open));

    layout.hide(Edge::East, true);
    assert!(!layout.key(KeyInput::new(Key::Right).ctrl()));
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Hidden));
}

#[test]
fn container_resizes_are_debounced() {
    let surface = HeadlessSurface::new(800, 600).with_pane(Edge::West);
    let mut layout = Layout::new(instant(LayoutConfig::default()), surface).unwrap();
    assert_eq!(layout.center_rect().width, 594);

    layout.surface_mut().set_container_size(600, 600);
    layout.container_resized();
    layout.advance(Duration::from_millis(150));
    layout.container_resized();
    layout.advance(Duration::from_millis(150));
    assert_eq!(layout.center_rect().width, 594);

    layout.advance(Duration::from_millis(50));
    assert_eq!(layout.center_rect().width, 394);
    assert_eq!(layout.next_deadline(), None);
}

#[test]
fn continuous_resizing_relayouts_at_the_max_delay() {
    let surface = HeadlessSurface::new(800, 600).with_pane(Edge::West);
    let mut config = instant(LayoutConfig::default());
    config.resize_with_window_max_delay_ms = 500;
    let mut layout = Layout::new(config, surface).unwrap();

    for step in 1..=4 {
        layout.surface_mut().set_container_size(800 - step * 10, 600);
        layout.container_resized();
        layout.advance(Duration::from_millis(100));
    }
    assert_eq!(layout.state().container.inner_width, 800);

    layout.surface_mut().set_container_size(750, 600);
    layout.container_resized();
    layout.advance(Duration::from_millis(100));
    assert_eq!(layout.state().container.inner_width, 750);
}

#[test]
fn drag_is_clamped_to_the_size_limits() {
    let surface = east_west().with_embeds(Edge::West, 2);
    let mut config = instant(LayoutConfig::default());
    config.west.min_size = SizeSpec::Pixels(100);
    config.west.max_size = SizeSpec::Pixels(400);
    let mut layout = Layout::new(config, surface).unwrap();

    assert!(layout.begin_drag(Edge::West));
    assert!(layout.is_dragging());
    assert!(layout.is_busy());
    assert_eq!(layout.surface().masks(Edge::West).map(<[_]>::len), Some(2));

    assert_eq!(layout.drag_to(50), Some(100));
    assert!(matches!(
        layout.surface().commands().last(),
        Some(RenderCommand::DragFeedback {
            position: 100,
            limit: DragLimit::Minimum,
            ..
        })
    ));
    assert_eq!(layout.drag_to(650), Some(400));
    // not live: the pane keeps its size until release
    assert_eq!(layout.pane(Edge::West).unwrap().size, 200);

    assert_eq!(layout.end_drag(), Some(400));
    assert!(!layout.is_dragging());
    assert!(!layout.is_busy());
    assert!(layout.surface().masks(Edge::West).is_none());
    assert_eq!(layout.pane(Edge::West).unwrap().size, 400);
    assert!(!layout.config().west.auto_resize);
}

#[test]
fn live_drag_resizes_while_moving() {
    let mut config = instant(LayoutConfig::default());
    config.east.resize_while_dragging = true;
    let mut layout = Layout::new(config, east_west()).unwrap();

    assert!(layout.begin_drag(Edge::East));
    // east resizer sits left of the pane: 800 - 250 - 6
    assert_eq!(layout.drag_to(544), Some(250));
    assert_eq!(layout.pane(Edge::East).unwrap().size, 250);
    assert_eq!(layout.center_rect().width, 800 - 206 - 256);
    assert_eq!(layout.end_drag(), Some(250));
}

#[test]
fn drags_need_an_open_resizable_pane() {
    let mut config = instant(LayoutConfig::default());
    config.east.init_closed = true;
    config.west.resizable = false;
    let mut layout = LayoutBuilder::new(config)
        .on(LifecycleEvent::DragStart, |ctx| {
            if ctx.edge == Some(Edge::North) {
                Flow::Cancel
            } else {
                Flow::Continue
            }
        })
        .build(east_west().with_pane(Edge::North))
        .unwrap();

    assert!(!layout.begin_drag(Edge::East));
    assert!(!layout.begin_drag(Edge::West));
    assert!(!layout.begin_drag(Edge::North));
    assert!(!layout.is_busy());
    assert_eq!(layout.drag_to(10), None);
    assert_eq!(layout.end_drag(), None);
}

#[test]
fn requests_during_a_drag_run_on_release() {
    let mut layout = Layout::new(instant(LayoutConfig::default()), east_west()).unwrap();

    assert!(layout.begin_drag(Edge::West));
    layout.close(Edge::East, CloseOptions::default());
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Open));

    layout.drag_to(300);
    layout.end_drag();
    assert_eq!(layout.pane(Edge::West).unwrap().size, 300);
    assert_eq!(layout.pane_state(Edge::East), Some(PaneStatus::Closed));
}
