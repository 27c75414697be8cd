// ABOUTME: Pointer and keyboard input vocabulary for pane routing.
// ABOUTME: Maps cursor and custom hotkeys to the pane they toggle.

use dock_core::{Edge, HotkeyModifier, LayoutConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Part of a pane the pointer interacted with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Pane,
    Resizer,
    Toggler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Click,
    DoubleClick,
    Enter,
    Leave,
}

fn modifier_matches(modifier: HotkeyModifier, input: &KeyInput) -> bool {
    match modifier {
        HotkeyModifier::Shift => input.shift && !input.ctrl,
        HotkeyModifier::Ctrl => input.ctrl && !input.shift,
        HotkeyModifier::CtrlShift => input.ctrl && input.shift,
    }
}

/// Pane a key press toggles, if any
pub fn hotkey_target(input: &KeyInput, config: &LayoutConfig) -> Option<Edge> {
    let cursor_edge = match input.key {
        Key::Up => Some(Edge::North),
        Key::Down => Some(Edge::South),
        Key::Left => Some(Edge::West),
        Key::Right => Some(Edge::East),
        Key::Char(_) => None,
    };
    if let Some(edge) = cursor_edge {
        let enabled = config.pane(edge).is_some_and(|o| o.enable_cursor_hotkey);
        return (input.ctrl && !input.shift && enabled).then_some(edge);
    }

    let Key::Char(c) = input.key else {
        return None;
    };
    Edge::BORDERS.into_iter().find(|&edge| {
        config.pane(edge).is_some_and(|options| {
            options
                .custom_hotkey
                .is_some_and(|hk| hk.eq_ignore_ascii_case(&c))
                && modifier_matches(options.custom_hotkey_modifier, input)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_arrows_toggle_matching_pane() {
        let config = LayoutConfig::default();
        assert_eq!(
            hotkey_target(&KeyInput::new(Key::Left).ctrl(), &config),
            Some(Edge::West)
        );
        assert_eq!(
            hotkey_target(&KeyInput::new(Key::Down).ctrl(), &config),
            Some(Edge::South)
        );
        assert_eq!(hotkey_target(&KeyInput::new(Key::Left), &config), None);
        assert_eq!(
            hotkey_target(&KeyInput::new(Key::Left).ctrl().shift(), &config),
            None
        );
    }

    #[test]
    fn cursor_hotkey_can_be_disabled() {
        let mut config = LayoutConfig::default();
        config.north.enable_cursor_hotkey = false;
        assert_eq!(hotkey_target(&KeyInput::new(Key::Up).ctrl(), &config), None);
    }

    #[test]
    fn custom_hotkey_needs_its_modifier() {
        let mut config = LayoutConfig::default();
        config.east.custom_hotkey = Some('e');
        config.west.custom_hotkey = Some('W');
        config.west.custom_hotkey_modifier = HotkeyModifier::CtrlShift;

        assert_eq!(
            hotkey_target(&KeyInput::new(Key::Char('E')).shift(), &config),
            Some(Edge::East)
        );
        assert_eq!(hotkey_target(&KeyInput::new(Key::Char('e')), &config), None);
        assert_eq!(
            hotkey_target(&KeyInput::new(Key::Char('w')).ctrl().shift(), &config),
            Some(Edge::West)
        );
        assert_eq!(hotkey_target(&KeyInput::new(Key::Char('w')).shift(), &config), None);
    }
}
