// ABOUTME: Shared types and configuration for dockable border layouts.
// ABOUTME: Defines edges, pane options, animation settings, and persisted state.

pub mod config;
pub mod edge;
pub mod fx;
pub mod persist;

pub use config::{
    CenterConfig, ConfigError, HotkeyModifier, LayoutConfig, MaskTargets, PaneConfig, SizeSpec,
    SlideCloseTrigger, SlideOpenTrigger, StateConfig, TogglerAlign, UNLIMITED_SIZE,
};
pub use edge::{Direction, Edge, UnknownEdge};
pub use fx::{Effect, FxSettings, Speed};
pub use persist::{
    FileStateStore, InvalidStateKey, LayoutSnapshot, MemoryStateStore, PaneSnapshot, StateField,
    StateKey, StateStore, StoreError,
};
