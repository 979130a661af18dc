//! Trend classifier
//!
//! Maps a percentage change onto Up / Down / Neutral with hysteresis so the
//! status color does not flicker while the value hovers around zero.
//!
//! | From    | Up                  | Neutral                   | Down               |
//! |---------|---------------------|---------------------------|--------------------|
//! | Neutral | `change > enter`    | otherwise                 | `change < -enter`  |
//! | Up      | otherwise           | `-enter <= change < -exit`| `change < -enter`  |
//! | Down    | `change > enter`    | `exit < change <= enter`  | otherwise          |
//!
//! Entering a trend needs `|change| > enter`. Leaving it needs the change
//! to cross zero by more than `exit`; a swing past `enter` on the other
//! side flips straight to the opposite trend.

use smart_leds::RGB8;

use super::color::NamedColor;
use crate::config::TrendConfig;

/// Color trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrendState {
    #[default]
    Neutral,
    Up,
    Down,
}

impl TrendState {
    /// Base status color for this trend
    pub const fn color(self) -> RGB8 {
        match self {
            TrendState::Neutral => NamedColor::Gray.rgb(),
            TrendState::Up => NamedColor::Green.rgb(),
            TrendState::Down => NamedColor::Red.rgb(),
        }
    }
}

/// Hysteresis state machine over percentage changes
#[derive(Debug, Clone)]
pub struct TrendClassifier {
    config: TrendConfig,
    state: TrendState,
}

impl TrendClassifier {
    /// Create a classifier in the Neutral state
    pub const fn new(config: TrendConfig) -> Self {
        Self {
            config,
            state: TrendState::Neutral,
        }
    }

    /// Current trend
    pub fn state(&self) -> TrendState {
        self.state
    }

    /// Force back to Neutral
    pub fn reset(&mut self) {
        self.state = TrendState::Neutral;
    }

    /// Feed a new change value (percent) and return the resulting trend
    ///
    /// Non-finite values leave the state untouched.
    pub fn update(&mut self, change_pct: f32) -> TrendState {
        if !change_pct.is_finite() {
            return self.state;
        }

        let enter = self.config.enter_pct;
        let exit = self.config.exit_pct;

        self.state = match self.state {
            TrendState::Neutral => {
                if change_pct > enter {
                    TrendState::Up
                } else if change_pct < -enter {
                    TrendState::Down
                } else {
                    TrendState::Neutral
                }
            }
            TrendState::Up => {
                if change_pct < -enter {
                    TrendState::Down
                } else if change_pct < -exit {
                    TrendState::Neutral
                } else {
                    TrendState::Up
                }
            }
            TrendState::Down => {
                if change_pct > enter {
                    TrendState::Up
                } else if change_pct > exit {
                    TrendState::Neutral
                } else {
                    TrendState::Down
                }
            }
        };

        self.state
    }
}

impl Default for TrendClassifier {
    fn default() -> Self {
        Self::new(TrendConfig::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_holds_through_zero() {
        let mut trend = TrendClassifier::default();
        assert_eq!(trend.state(), TrendState::Neutral);
        assert_eq!(trend.update(0.03), TrendState::Up);
        assert_eq!(trend.update(0.001), TrendState::Up);
        assert_eq!(trend.update(-0.03), TrendState::Down);
    }

    #[test]
    fn test_neutral_band() {
        let mut trend = TrendClassifier::default();
        assert_eq!(trend.update(0.02), TrendState::Neutral);
        assert_eq!(trend.update(-0.02), TrendState::Neutral);
        assert_eq!(trend.update(0.0201), TrendState::Up);
    }

    #[test]
    fn test_exit_to_neutral() {
        let mut trend = TrendClassifier::default();
        trend.update(0.05);
        assert_eq!(trend.update(-0.004), TrendState::Up);
        assert_eq!(trend.update(-0.01), TrendState::Neutral);

        trend.update(-0.05);
        assert_eq!(trend.state(), TrendState::Down);
        assert_eq!(trend.update(0.004), TrendState::Down);
        assert_eq!(trend.update(0.01), TrendState::Neutral);
    }

    #[test]
    fn test_nan_ignored() {
        let mut trend = TrendClassifier::default();
        trend.update(1.0);
        assert_eq!(trend.update(f32::NAN), TrendState::Up);
    }

    #[test]
    fn test_trend_colors() {
        assert_eq!(TrendState::Up.color(), NamedColor::Green.rgb());
        assert_eq!(TrendState::Down.color(), NamedColor::Red.rgb());
        assert_eq!(TrendState::Neutral.color(), NamedColor::Gray.rgb());
    }
}
