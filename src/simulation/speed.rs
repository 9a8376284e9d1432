//! Named simulation speeds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Fixed set of tick intervals offered to the user
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Speed {
    #[default]
    Normal,
    Fast,
    Hyper,
}

impl Speed {
    /// All speeds in selection order
    pub const ALL: [Speed; 3] = [Speed::Normal, Speed::Fast, Speed::Hyper];

    pub fn name(self) -> &'static str {
        match self {
            Speed::Normal => "normal",
            Speed::Fast => "fast",
            Speed::Hyper => "hyper",
        }
    }

    /// Time between two periodic ticks
    pub fn period(self) -> Duration {
        match self {
            Speed::Normal => Duration::from_millis(200),
            Speed::Fast => Duration::from_millis(50),
            Speed::Hyper => Duration::from_millis(10),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|speed| speed.name() == name)
    }

    /// Speed for a 1-based selection position, as used by digit keys
    pub fn from_position(position: usize) -> Option<Self> {
        position.checked_sub(1).and_then(|index| Self::ALL.get(index).copied())
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods() {
        assert_eq!(Speed::Normal.period(), Duration::from_millis(200));
        assert_eq!(Speed::Fast.period(), Duration::from_millis(50));
        assert_eq!(Speed::Hyper.period(), Duration::from_millis(10));
        assert_eq!(Speed::default(), Speed::Normal);
    }

    #[test]
    fn test_lookup_by_name() {
        for speed in Speed::ALL {
            assert_eq!(Speed::from_name(speed.name()), Some(speed));
            assert_eq!(speed.to_string(), speed.name());
        }
        assert_eq!(Speed::from_name("ludicrous"), None);
        assert_eq!(Speed::from_name("Fast"), None);
        assert_eq!(Speed::from_name(""), None);
    }

    #[test]
    fn test_lookup_by_position() {
        assert_eq!(Speed::from_position(1), Some(Speed::Normal));
        assert_eq!(Speed::from_position(2), Some(Speed::Fast));
        assert_eq!(Speed::from_position(3), Some(Speed::Hyper));
        assert_eq!(Speed::from_position(0), None);
        assert_eq!(Speed::from_position(4), None);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_yaml::to_string(&Speed::Hyper).unwrap().trim(), "hyper");
        let speed: Speed = serde_yaml::from_str("fast").unwrap();
        assert_eq!(speed, Speed::Fast);
    }
}
