// ABOUTME: Persisted layout state: dotted keys, snapshots, and storage backends.
// ABOUTME: File storage writes zstd-compressed JSON, memory storage serves tests and embedders.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;

use crate::Edge;

/// Persistable attribute of a border pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateField {
    Size,
    IsClosed,
    IsHidden,
}

impl StateField {
    pub const ALL: [StateField; 3] = [StateField::Size, StateField::IsClosed, StateField::IsHidden];

    pub fn name(self) -> &'static str {
        match self {
            StateField::Size => "size",
            StateField::IsClosed => "isClosed",
            StateField::IsHidden => "isHidden",
        }
    }
}

/// A dotted state key such as `west.isClosed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateKey {
    pub edge: Edge,
    pub field: StateField,
}

impl StateKey {
    pub fn new(edge: Edge, field: StateField) -> Self {
        Self { edge, field }
    }

    /// `{north,south,east,west}.{size,isClosed,isHidden}`
    pub fn defaults() -> Vec<StateKey> {
        Edge::BORDERS
            .iter()
            .flat_map(|&edge| StateField::ALL.iter().map(move |&field| StateKey::new(edge, field)))
            .collect()
    }

    /// Parse a comma-separated key list, skipping entries that do not name a border pane
    pub fn parse_list(list: &str) -> Vec<StateKey> {
        list.split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| match s.parse::<StateKey>() {
                Ok(key) => Some(key),
                Err(e) => {
                    tracing::debug!("Skipping state key: {}", e);
                    None
                }
            })
            .collect()
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.edge, self.field.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid state key: {0}")]
pub struct InvalidStateKey(pub String);

impl FromStr for StateKey {
    type Err = InvalidStateKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // legacy cookie keys use a double underscore
        let normalized = s.trim().replace("__", ".");
        let (pane, field) = normalized
            .split_once('.')
            .ok_or_else(|| InvalidStateKey(s.to_string()))?;
        let edge: Edge = pane.parse().map_err(|_| InvalidStateKey(s.to_string()))?;
        if !edge.is_border() {
            return Err(InvalidStateKey(s.to_string()));
        }
        let field = match field {
            "size" => StateField::Size,
            "isClosed" | "initClosed" => StateField::IsClosed,
            "isHidden" | "initHidden" => StateField::IsHidden,
            _ => return Err(InvalidStateKey(s.to_string())),
        };
        Ok(StateKey { edge, field })
    }
}

impl TryFrom<String> for StateKey {
    type Error = InvalidStateKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StateKey> for String {
    fn from(key: StateKey) -> Self {
        key.to_string()
    }
}

/// Persisted attributes of one pane; absent fields are left untouched on load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PaneSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_closed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
}

impl PaneSnapshot {
    pub fn is_empty(&self) -> bool {
        self.size.is_none() && self.is_closed.is_none() && self.is_hidden.is_none()
    }

    fn has(&self, field: StateField) -> bool {
        match field {
            StateField::Size => self.size.is_some(),
            StateField::IsClosed => self.is_closed.is_some(),
            StateField::IsHidden => self.is_hidden.is_some(),
        }
    }
}

/// Partial layout state keyed by pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub version: u32,
    #[serde(default)]
    pub panes: BTreeMap<Edge, PaneSnapshot>,
}

impl LayoutSnapshot {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            panes: BTreeMap::new(),
        }
    }

    pub fn pane(&self, edge: Edge) -> Option<&PaneSnapshot> {
        self.panes.get(&edge)
    }

    pub fn pane_mut(&mut self, edge: Edge) -> &mut PaneSnapshot {
        self.panes.entry(edge).or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.values().all(PaneSnapshot::is_empty)
    }

    /// Keys that carry a value in this snapshot
    pub fn keys(&self) -> Vec<StateKey> {
        let mut keys = Vec::new();
        for (&edge, pane) in &self.panes {
            for field in StateField::ALL {
                if pane.has(field) {
                    keys.push(StateKey::new(edge, field));
                }
            }
        }
        keys
    }

    /// Copy of this snapshot restricted to an allow-list of keys
    pub fn filtered(&self, keys: &[StateKey]) -> LayoutSnapshot {
        let mut out = LayoutSnapshot::new();
        for key in keys {
            let Some(pane) = self.panes.get(&key.edge) else {
                continue;
            };
            match key.field {
                StateField::Size => {
                    if let Some(size) = pane.size {
                        out.pane_mut(key.edge).size = Some(size);
                    }
                }
                StateField::IsClosed => {
                    if let Some(closed) = pane.is_closed {
                        out.pane_mut(key.edge).is_closed = Some(closed);
                    }
                }
                StateField::IsHidden => {
                    if let Some(hidden) = pane.is_hidden {
                        out.pane_mut(key.edge).is_hidden = Some(hidden);
                    }
                }
            }
        }
        out
    }
}

impl Default for LayoutSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine state directory")]
    NoStatePath,

    #[error("Unsupported layout state version: {0}")]
    UnsupportedVersion(u32),
}

/// Where layout state is loaded from and saved to
pub trait StateStore {
    /// Returns `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<LayoutSnapshot>, StoreError>;
    fn save(&mut self, snapshot: &LayoutSnapshot) -> Result<(), StoreError>;
    fn delete(&mut self) -> Result<(), StoreError>;
}

/// Stores layout state on disk as zstd-compressed JSON
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the state directory (~/.local/state/dockable/<name>.state)
    pub fn for_layout(name: &str) -> Result<Self, StoreError> {
        Self::default_path(name)
            .map(Self::new)
            .ok_or(StoreError::NoStatePath)
    }

    pub fn default_path(name: &str) -> Option<PathBuf> {
        // Use state_dir on Linux, fall back to data_local_dir
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|p| p.join("dockable").join(format!("{}.state", name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> Result<Option<LayoutSnapshot>, StoreError> {
        let compressed = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut decoder = zstd::Decoder::new(&compressed[..])?;
        let mut json = Vec::new();
        decoder.read_to_end(&mut json)?;

        let snapshot: LayoutSnapshot = serde_json::from_slice(&json)?;
        if snapshot.version > LayoutSnapshot::CURRENT_VERSION {
            return Err(StoreError::UnsupportedVersion(snapshot.version));
        }
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &LayoutSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec(snapshot)?;
        let mut encoder = zstd::Encoder::new(Vec::new(), 3)?;
        encoder.write_all(&json)?;
        let compressed = encoder.finish()?;

        std::fs::write(&self.path, compressed)?;
        tracing::debug!("Saved layout state to {:?}", self.path);
        Ok(())
    }

    fn delete(&mut self) -> Result<(), StoreError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-process store; clones share the same saved snapshot
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    saved: Rc<RefCell<Option<LayoutSnapshot>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: LayoutSnapshot) -> Self {
        Self {
            saved: Rc::new(RefCell::new(Some(snapshot))),
        }
    }

    /// Currently saved snapshot, if any
    pub fn snapshot(&self) -> Option<LayoutSnapshot> {
        self.saved.borrow().clone()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<Option<LayoutSnapshot>, StoreError> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&mut self, snapshot: &LayoutSnapshot) -> Result<(), StoreError> {
        *self.saved.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }

    fn delete(&mut self) -> Result<(), StoreError> {
        *self.saved.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_key_forms() {
        let key: StateKey = "west.isClosed".parse().unwrap();
        assert_eq!(key, StateKey::new(Edge::West, StateField::IsClosed));
        assert_eq!("north__size".parse::<StateKey>().unwrap().to_string(), "north.size");
        assert!("center.size".parse::<StateKey>().is_err());
        assert!("west.width".parse::<StateKey>().is_err());
        assert_eq!(StateKey::defaults().len(), 12);
    }

    #[test]
    fn parse_list_skips_bad_entries() {
        let keys = StateKey::parse_list("west.size, bogus,east__isHidden,");
        assert_eq!(
            keys,
            vec![
                StateKey::new(Edge::West, StateField::Size),
                StateKey::new(Edge::East, StateField::IsHidden),
            ]
        );
    }

    #[test]
    fn filtered_keeps_only_allowed_keys() {
        let mut snapshot = LayoutSnapshot::new();
        *snapshot.pane_mut(Edge::West) = PaneSnapshot {
            size: Some(180),
            is_closed: Some(false),
            is_hidden: Some(false),
        };
        snapshot.pane_mut(Edge::South).is_closed = Some(true);

        let keys = [
            StateKey::new(Edge::West, StateField::Size),
            StateKey::new(Edge::South, StateField::IsClosed),
            StateKey::new(Edge::North, StateField::Size),
        ];
        let filtered = snapshot.filtered(&keys);
        assert_eq!(filtered.pane(Edge::West).unwrap().size, Some(180));
        assert_eq!(filtered.pane(Edge::West).unwrap().is_closed, None);
        assert_eq!(filtered.pane(Edge::South).unwrap().is_closed, Some(true));
        assert!(filtered.pane(Edge::North).is_none());
        assert_eq!(filtered.keys().len(), 2);
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStateStore::new(dir.path().join("state").join("admin.state"));
        assert!(store.load().unwrap().is_none());

        let mut snapshot = LayoutSnapshot::new();
        snapshot.pane_mut(Edge::East).size = Some(260);
        snapshot.pane_mut(Edge::North).is_hidden = Some(true);
        store.save(&snapshot).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, snapshot);

        store.delete().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_rejects_newer_versions() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStateStore::new(dir.path().join("future.state"));
        let mut snapshot = LayoutSnapshot::new();
        snapshot.version = LayoutSnapshot::CURRENT_VERSION + 1;
        store.save(&snapshot).unwrap();

        assert!(matches!(store.load(), Err(StoreError::UnsupportedVersion(_))));
    }

    #[test]
    fn memory_store_clones_share_state() {
        let store = MemoryStateStore::new();
        let mut writer = store.clone();
        let mut snapshot = LayoutSnapshot::new();
        snapshot.pane_mut(Edge::West).is_closed = Some(true);
        writer.save(&snapshot).unwrap();
        assert_eq!(store.snapshot(), Some(snapshot));
        writer.delete().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_default_path() {
        if let Some(p) = FileStateStore::default_path("admin") {
            assert!(p.ends_with("dockable/admin.state"));
        }
    }
}
