// ABOUTME: Layout configuration handling.
// ABOUTME: Per-pane options, center minimums, and TOML load/save of layout settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::{Edge, FxSettings, StateKey};

/// Upper bound used when a pane has no configured maximum size
pub const UNLIMITED_SIZE: i32 = 100_000;

/// A pane size as written in configuration.
///
/// Integers of 1 or more are pixels, fractions between 0 and 1 and `"NN%"`
/// strings are shares of the available space, and `"auto"` (or anything
/// unparseable) means the element's natural size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "SizeValue", into = "SizeValue")]
pub enum SizeSpec {
    Pixels(i32),
    Ratio(f64),
    Percent(f64),
    #[default]
    Auto,
}

impl SizeSpec {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case("auto") {
            return SizeSpec::Auto;
        }
        if let Some(pct) = text.strip_suffix('%') {
            return match pct.trim().parse::<f64>() {
                Ok(p) if p >= 0.0 => SizeSpec::Percent(p),
                _ => SizeSpec::Auto,
            };
        }
        match text.parse::<f64>() {
            Ok(n) => Self::from_number(n),
            Err(_) => SizeSpec::Auto,
        }
    }

    pub fn from_number(n: f64) -> Self {
        if n == 0.0 {
            SizeSpec::Pixels(0)
        } else if n >= 1.0 {
            SizeSpec::Pixels(n.min(i32::MAX as f64) as i32)
        } else if n > 0.0 {
            SizeSpec::Ratio(n)
        } else {
            SizeSpec::Auto
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, SizeSpec::Auto)
    }
}

impl From<i32> for SizeSpec {
    fn from(px: i32) -> Self {
        Self::from_number(px as f64)
    }
}

impl FromStr for SizeSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SizeValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<SizeValue> for SizeSpec {
    fn from(value: SizeValue) -> Self {
        match value {
            SizeValue::Int(n) => SizeSpec::from_number(n as f64),
            SizeValue::Float(f) => SizeSpec::from_number(f),
            SizeValue::Text(s) => SizeSpec::parse(&s),
        }
    }
}

impl From<SizeSpec> for SizeValue {
    fn from(spec: SizeSpec) -> Self {
        match spec {
            SizeSpec::Pixels(px) => SizeValue::Int(px as i64),
            SizeSpec::Ratio(r) => SizeValue::Float(r),
            SizeSpec::Percent(p) => SizeValue::Text(format!("{}%", p)),
            SizeSpec::Auto => SizeValue::Text("auto".to_string()),
        }
    }
}

/// Where the toggler sits along its resizer bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "AlignValue", into = "AlignValue")]
pub enum TogglerAlign {
    Start,
    #[default]
    Center,
    End,
    /// Pixel offset from the start, or from the end when negative
    Offset(i32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AlignValue {
    Offset(i32),
    Named(String),
}

impl From<AlignValue> for TogglerAlign {
    fn from(value: AlignValue) -> Self {
        match value {
            AlignValue::Offset(px) => TogglerAlign::Offset(px),
            AlignValue::Named(name) => match name.to_ascii_lowercase().as_str() {
                "start" | "top" | "left" => TogglerAlign::Start,
                "end" | "bottom" | "right" => TogglerAlign::End,
                // typos fall back to centered
                _ => TogglerAlign::Center,
            },
        }
    }
}

impl From<TogglerAlign> for AlignValue {
    fn from(align: TogglerAlign) -> Self {
        match align {
            TogglerAlign::Start => AlignValue::Named("start".to_string()),
            TogglerAlign::Center => AlignValue::Named("center".to_string()),
            TogglerAlign::End => AlignValue::Named("end".to_string()),
            TogglerAlign::Offset(px) => AlignValue::Offset(px),
        }
    }
}

/// Pointer gesture on a closed pane's resizer that slides it open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SlideOpenTrigger {
    #[default]
    Click,
    DblClick,
    MouseEnter,
}

/// Pointer gesture that closes a sliding pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SlideCloseTrigger {
    #[default]
    MouseLeave,
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyModifier {
    #[default]
    Shift,
    Ctrl,
    CtrlShift,
}

/// Elements covered by transparent masks while a resizer is dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MaskTargets {
    None,
    /// Every visible embed inside the pane being resized
    #[default]
    AllEmbeds,
    Elements(Vec<u64>),
}

/// Options for one border pane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneConfig {
    /// Initial size; `None` uses the edge default ("auto" for north/south, 200 for east/west)
    pub size: Option<SizeSpec>,
    pub min_size: SizeSpec,
    /// 0 means unlimited
    pub max_size: SizeSpec,
    pub spacing_open: i32,
    pub spacing_closed: i32,

    pub closable: bool,
    pub resizable: bool,
    pub slidable: bool,
    pub init_closed: bool,
    pub init_hidden: bool,

    /// Restore the configured size whenever the whole layout is resized
    pub auto_resize: bool,
    /// Reopen panes that were auto-closed for lack of room once room returns
    pub auto_reopen: bool,

    pub resize_while_dragging: bool,
    pub resize_content_while_dragging: bool,
    pub trigger_events_while_dragging: bool,
    pub trigger_events_on_load: bool,
    pub resizer_dbl_click_toggle: bool,
    pub mask_on_resize: MaskTargets,

    pub toggler_length_open: i32,
    pub toggler_length_closed: i32,
    pub toggler_align_open: TogglerAlign,
    pub toggler_align_closed: TogglerAlign,

    pub slide_trigger_open: SlideOpenTrigger,
    pub slide_trigger_close: SlideCloseTrigger,
    pub slide_delay_open_ms: u64,
    pub slide_delay_close_ms: u64,
    pub hide_toggler_on_slide: bool,
    pub prevent_quick_slide_close: bool,

    pub enable_cursor_hotkey: bool,
    pub custom_hotkey: Option<char>,
    pub custom_hotkey_modifier: HotkeyModifier,

    /// Notice shown when a pane cannot open for lack of room
    pub no_room_to_open_tip: String,

    pub fx: FxSettings,
}

impl Default for PaneConfig {
    fn default() -> Self {
        Self {
            size: None,
            min_size: SizeSpec::Pixels(0),
            max_size: SizeSpec::Pixels(0),
            spacing_open: 6,
            spacing_closed: 6,
            closable: true,
            resizable: true,
            slidable: true,
            init_closed: false,
            init_hidden: false,
            auto_resize: true,
            auto_reopen: true,
            resize_while_dragging: false,
            resize_content_while_dragging: false,
            trigger_events_while_dragging: true,
            trigger_events_on_load: false,
            resizer_dbl_click_toggle: true,
            mask_on_resize: MaskTargets::default(),
            toggler_length_open: 50,
            toggler_length_closed: 50,
            toggler_align_open: TogglerAlign::Center,
            toggler_align_closed: TogglerAlign::Center,
            slide_trigger_open: SlideOpenTrigger::Click,
            slide_trigger_close: SlideCloseTrigger::MouseLeave,
            slide_delay_open_ms: 300,
            slide_delay_close_ms: 300,
            hide_toggler_on_slide: false,
            prevent_quick_slide_close: false,
            enable_cursor_hotkey: true,
            custom_hotkey: None,
            custom_hotkey_modifier: HotkeyModifier::Shift,
            no_room_to_open_tip: "Not enough room to show this pane.".to_string(),
            fx: FxSettings::default(),
        }
    }
}

impl PaneConfig {
    /// Configured size, falling back to the edge default
    pub fn size_for(&self, edge: Edge) -> SizeSpec {
        self.size.unwrap_or(match edge {
            Edge::East | Edge::West => SizeSpec::Pixels(200),
            _ => SizeSpec::Auto,
        })
    }

    pub fn spacing(&self, closed: bool) -> i32 {
        if closed {
            self.spacing_closed
        } else {
            self.spacing_open
        }
    }
}

/// The center pane can only be constrained, never closed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterConfig {
    pub min_width: SizeSpec,
    pub min_height: SizeSpec,
    pub trigger_events_on_load: bool,
    pub resize_content_while_dragging: bool,
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self {
            min_width: SizeSpec::Pixels(0),
            min_height: SizeSpec::Pixels(0),
            trigger_events_on_load: false,
            resize_content_while_dragging: false,
        }
    }
}

/// Which parts of the layout state are persisted, and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    pub auto_load: bool,
    pub auto_save: bool,
    pub keys: Vec<StateKey>,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            auto_load: true,
            auto_save: true,
            keys: StateKey::defaults(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Layout name, used for the persisted state file
    pub name: String,

    /// Re-layout when the container (window) is resized
    pub resize_with_window: bool,
    pub resize_with_window_delay_ms: u64,
    /// Forced re-layout interval during continuous resizing; 0 disables it
    pub resize_with_window_max_delay_ms: u64,

    /// Emit "not enough room" notices to the renderer
    pub show_notices: bool,

    /// Order in which border panes are fitted; the first that cannot fit is collapsed
    pub collapse_order: Vec<Edge>,

    pub north: PaneConfig,
    pub south: PaneConfig,
    pub east: PaneConfig,
    pub west: PaneConfig,
    pub center: CenterConfig,

    pub state: StateConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            name: "layout".to_string(),
            resize_with_window: true,
            resize_with_window_delay_ms: 200,
            resize_with_window_max_delay_ms: 0,
            show_notices: true,
            collapse_order: vec![Edge::South, Edge::North, Edge::East, Edge::West],
            north: PaneConfig::default(),
            south: PaneConfig::default(),
            east: PaneConfig::default(),
            west: PaneConfig::default(),
            center: CenterConfig::default(),
            state: StateConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl LayoutConfig {
    /// Options for a border pane; the center has none
    pub fn pane(&self, edge: Edge) -> Option<&PaneConfig> {
        match edge {
            Edge::North => Some(&self.north),
            Edge::South => Some(&self.south),
            Edge::East => Some(&self.east),
            Edge::West => Some(&self.west),
            Edge::Center => None,
        }
    }

    pub fn pane_mut(&mut self, edge: Edge) -> Option<&mut PaneConfig> {
        match edge {
            Edge::North => Some(&mut self.north),
            Edge::South => Some(&mut self.south),
            Edge::East => Some(&mut self.east),
            Edge::West => Some(&mut self.west),
            Edge::Center => None,
        }
    }

    /// Debounce delay for container resizes; anything under 10ms becomes 100ms
    pub fn resize_delay_ms(&self) -> u64 {
        if self.resize_with_window_delay_ms < 10 {
            100
        } else {
            self.resize_with_window_delay_ms
        }
    }

    /// Border edges in fitting order, with any missing edge appended
    pub fn fitting_order(&self) -> Vec<Edge> {
        let mut order: Vec<Edge> = Vec::with_capacity(4);
        for edge in self.collapse_order.iter().copied() {
            if edge.is_border() && !order.contains(&edge) {
                order.push(edge);
            }
        }
        for edge in [Edge::South, Edge::North, Edge::East, Edge::West] {
            if !order.contains(&edge) {
                order.push(edge);
            }
        }
        order
    }

    /// Get the default config file path (~/.config/dockable/layout.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dockable").join("layout.toml"))
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save config to default path
    pub fn save_to_default(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::ReadError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save(&path)?;
        Ok(path)
    }
}
