use serde::{Deserialize, Serialize};

/// Discrete distance classification shown by the ruler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceState {
    Acceptable,
    TooFar,
    TooClose,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown distance state: {0} (use acceptable, too-close, too-far, or unknown)")]
pub struct StateParseError(pub String);

impl DistanceState {
    pub const ALL: &[DistanceState] = &[
        DistanceState::Acceptable,
        DistanceState::TooFar,
        DistanceState::TooClose,
        DistanceState::Unknown,
    ];

    /// States a reading can produce. `Unknown` is only the initial value.
    pub const READINGS: &[DistanceState] = &[
        DistanceState::Acceptable,
        DistanceState::TooFar,
        DistanceState::TooClose,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DistanceState::Acceptable => "acceptable",
            DistanceState::TooFar => "too-far",
            DistanceState::TooClose => "too-close",
            DistanceState::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DistanceState::Acceptable => "Acceptable",
            DistanceState::TooFar => "Too Far",
            DistanceState::TooClose => "Too Close",
            DistanceState::Unknown => "Unknown",
        }
    }

    pub fn is_reading(self) -> bool {
        self != DistanceState::Unknown
    }
}

impl std::fmt::Display for DistanceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DistanceState {
    type Err = StateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "acceptable" | "ok" => Ok(DistanceState::Acceptable),
            "too-far" | "toofar" | "far" => Ok(DistanceState::TooFar),
            "too-close" | "tooclose" | "close" => Ok(DistanceState::TooClose),
            "unknown" => Ok(DistanceState::Unknown),
            _ => Err(StateParseError(s.trim().to_string())),
        }
    }
}

/// Where a visual element rests for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualPosition {
    Centered,
    ShiftedLeft,
    ShiftedRight,
}

impl VisualPosition {
    pub fn of(state: DistanceState) -> Self {
        match state {
            DistanceState::Acceptable | DistanceState::Unknown => VisualPosition::Centered,
            DistanceState::TooClose => VisualPosition::ShiftedLeft,
            DistanceState::TooFar => VisualPosition::ShiftedRight,
        }
    }

    /// -1 for left, 0 for centre, +1 for right.
    pub fn direction(self) -> f64 {
        match self {
            VisualPosition::Centered => 0.0,
            VisualPosition::ShiftedLeft => -1.0,
            VisualPosition::ShiftedRight => 1.0,
        }
    }
}

/// Parses a comma separated list such as `too-close,ok,too-far`.
pub fn parse_state_list(s: &str) -> Result<Vec<DistanceState>, StateParseError> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unknown() {
        assert_eq!(DistanceState::default(), DistanceState::Unknown);
    }

    #[test]
    fn name_round_trip() {
        for state in DistanceState::ALL {
            let parsed: DistanceState = state.name().parse().unwrap();
            assert_eq!(*state, parsed, "round-trip failed for {state}");
        }
    }

    #[test]
    fn parse_aliases() {
        assert_eq!("ok".parse::<DistanceState>().unwrap(), DistanceState::Acceptable);
        assert_eq!("Too Close".parse::<DistanceState>().unwrap(), DistanceState::TooClose);
        assert_eq!("too_far".parse::<DistanceState>().unwrap(), DistanceState::TooFar);
        assert_eq!(" UNKNOWN ".parse::<DistanceState>().unwrap(), DistanceState::Unknown);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "sideways".parse::<DistanceState>().unwrap_err();
        assert_eq!(err, StateParseError("sideways".to_string()));
        assert!(err.to_string().contains("sideways"));
    }

    #[test]
    fn readings_exclude_unknown() {
        assert_eq!(DistanceState::READINGS.len(), 3);
        assert!(DistanceState::READINGS.iter().all(|s| s.is_reading()));
    }

    #[test]
    fn visual_positions() {
        assert_eq!(VisualPosition::of(DistanceState::Unknown), VisualPosition::Centered);
        assert_eq!(VisualPosition::of(DistanceState::Acceptable), VisualPosition::Centered);
        assert_eq!(VisualPosition::of(DistanceState::TooClose), VisualPosition::ShiftedLeft);
        assert_eq!(VisualPosition::of(DistanceState::TooFar), VisualPosition::ShiftedRight);
    }

    #[test]
    fn state_list() {
        let states = parse_state_list("too-close, ok,too-far,").unwrap();
        assert_eq!(
            states,
            vec![DistanceState::TooClose, DistanceState::Acceptable, DistanceState::TooFar]
        );
        assert!(parse_state_list("ok,nope").is_err());
    }

    #[test]
    fn serde_uses_kebab_case() {
        use serde::de::value::{Error, StrDeserializer};
        use serde::de::IntoDeserializer;

        let de: StrDeserializer<'_, Error> = "too-close".into_deserializer();
        assert_eq!(DistanceState::deserialize(de).unwrap(), DistanceState::TooClose);
    }
}
