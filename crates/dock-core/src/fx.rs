// ABOUTME: Open/close animation settings for border panes.
// ABOUTME: Resolves effect and duration per direction with built-in speed defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Animation used when a pane opens or closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// No animation - the transition completes immediately
    None,
    #[default]
    Slide,
    Drop,
    Scale,
}

impl Effect {
    /// Built-in speed when no speed is configured
    pub fn default_speed(self) -> Speed {
        match self {
            Effect::None => Speed::Millis(0),
            Effect::Slide | Effect::Scale => Speed::Fast,
            Effect::Drop => Speed::Slow,
        }
    }
}

/// Named or explicit animation speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SpeedValue", into = "SpeedValue")]
pub enum Speed {
    Slow,
    Normal,
    Fast,
    Millis(u64),
}

impl Speed {
    pub fn duration(self) -> Duration {
        match self {
            Speed::Slow => Duration::from_millis(600),
            Speed::Normal => Duration::from_millis(400),
            Speed::Fast => Duration::from_millis(200),
            Speed::Millis(ms) => Duration::from_millis(ms),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SpeedValue {
    Millis(u64),
    Named(String),
}

impl TryFrom<SpeedValue> for Speed {
    type Error = String;

    fn try_from(value: SpeedValue) -> Result<Self, Self::Error> {
        match value {
            SpeedValue::Millis(ms) => Ok(Speed::Millis(ms)),
            SpeedValue::Named(name) => match name.to_ascii_lowercase().as_str() {
                "slow" => Ok(Speed::Slow),
                "normal" => Ok(Speed::Normal),
                "fast" => Ok(Speed::Fast),
                other => Err(format!("unknown animation speed '{}'", other)),
            },
        }
    }
}

impl From<Speed> for SpeedValue {
    fn from(speed: Speed) -> Self {
        match speed {
            Speed::Slow => SpeedValue::Named("slow".to_string()),
            Speed::Normal => SpeedValue::Named("normal".to_string()),
            Speed::Fast => SpeedValue::Named("fast".to_string()),
            Speed::Millis(ms) => SpeedValue::Millis(ms),
        }
    }
}

/// Per-pane animation settings with optional open/close overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FxSettings {
    pub effect: Effect,
    pub speed: Option<Speed>,
    /// Easing curve name passed through to the renderer
    pub easing: Option<String>,
    pub effect_open: Option<Effect>,
    pub effect_close: Option<Effect>,
    pub speed_open: Option<Speed>,
    pub speed_close: Option<Speed>,
}

impl FxSettings {
    /// Settings that make every transition synchronous
    pub fn none() -> Self {
        Self {
            effect: Effect::None,
            ..Self::default()
        }
    }

    pub fn effect_for(&self, opening: bool) -> Effect {
        let specific = if opening { self.effect_open } else { self.effect_close };
        specific.unwrap_or(self.effect)
    }

    pub fn duration_for(&self, opening: bool) -> Duration {
        let effect = self.effect_for(opening);
        if effect == Effect::None {
            return Duration::ZERO;
        }
        let specific = if opening { self.speed_open } else { self.speed_close };
        specific
            .or(self.speed)
            .unwrap_or_else(|| effect.default_speed())
            .duration()
    }

    /// True when the transition in this direction needs an animation step
    pub fn animates(&self, opening: bool) -> bool {
        self.effect_for(opening) != Effect::None && !self.duration_for(opening).is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_speeds_follow_effect() {
        let mut fx = FxSettings::default();
        assert_eq!(fx.duration_for(true), Duration::from_millis(200));

        fx.effect = Effect::Drop;
        assert_eq!(fx.duration_for(false), Duration::from_millis(600));
    }

    #[test]
    fn direction_overrides_win() {
        let fx = FxSettings {
            effect: Effect::Slide,
            speed: Some(Speed::Normal),
            effect_close: Some(Effect::None),
            speed_open: Some(Speed::Millis(50)),
            ..FxSettings::default()
        };
        assert_eq!(fx.duration_for(true), Duration::from_millis(50));
        assert_eq!(fx.effect_for(false), Effect::None);
        assert!(!fx.animates(false));
        assert!(fx.animates(true));
    }

    #[test]
    fn speed_parses_names_and_numbers() {
        #[derive(Deserialize)]
        struct Wrapper {
            speed: Speed,
        }
        let named: Wrapper = toml::from_str("speed = \"slow\"").unwrap();
        assert_eq!(named.speed, Speed::Slow);
        let millis: Wrapper = toml::from_str("speed = 125").unwrap();
        assert_eq!(millis.speed, Speed::Millis(125));
        assert!(toml::from_str::<Wrapper>("speed = \"warp\"").is_err());
    }
}
