//! Pure mapping from a distance state and the measured ruler geometry to the
//! horizontal offsets of the highlight window and the pointer arrow.
//!
//! Offsets are measured from the centre of the track. Negative values move
//! toward the "too close" end, positive values toward the "too far" end.

use std::time::Duration;

use crate::state::{DistanceState, VisualPosition};

pub const MARKS: usize = 13;
pub const MARK_WIDTH: f64 = 3.0;
pub const MARK_HEIGHT: f64 = 20.0;
pub const HIGHLIGHT_HEIGHT: f64 = 26.0;
pub const HIGHLIGHT_COUNT: usize = 5;
pub const ANIMATION_DURATION: Duration = Duration::from_millis(950);
pub const UPDATE_INTERVAL: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Last known layout of the ruler. Zero until the first layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RulerMeasurement {
    /// One inter-mark gap as rendered.
    pub spacer: Size,
    /// The whole mark track.
    pub ruler: Size,
}

impl RulerMeasurement {
    pub fn new(spacer: Size, ruler: Size) -> Self {
        Self { spacer, ruler }
    }

    pub fn is_measured(&self) -> bool {
        self.ruler.width > 0.0
    }
}

/// Fixed dimensions of the ruler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulerSpec {
    pub marks: usize,
    pub mark_width: f64,
    pub mark_height: f64,
    pub highlight_height: f64,
    pub highlight_count: usize,
}

impl Default for RulerSpec {
    fn default() -> Self {
        Self {
            marks: MARKS,
            mark_width: MARK_WIDTH,
            mark_height: MARK_HEIGHT,
            highlight_height: HIGHLIGHT_HEIGHT,
            highlight_count: HIGHLIGHT_COUNT,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offsets {
    pub highlight: f64,
    pub arrow: f64,
}

impl Offsets {
    pub const ZERO: Offsets = Offsets {
        highlight: 0.0,
        arrow: 0.0,
    };
}

/// Width of the highlight window: enough to cover `highlight_count` marks
/// and the gap in front of each.
pub fn highlight_width(spacer: f64, mark_width: f64, highlight_count: usize) -> f64 {
    (spacer + mark_width) * highlight_count as f64
}

pub fn highlight_offset(state: DistanceState, measured: &RulerMeasurement, spec: &RulerSpec) -> f64 {
    if !measured.is_measured() {
        return 0.0;
    }
    let width = highlight_width(measured.spacer.width, spec.mark_width, spec.highlight_count);
    let offset_max = measured.ruler.width - width;
    neutral_if_degenerate(VisualPosition::of(state).direction() * offset_max / 2.0)
}

/// Distance from the centre to just inside the outermost marks.
pub fn edge_offset(measured: &RulerMeasurement, spec: &RulerSpec) -> f64 {
    measured.ruler.width / 2.0 - (measured.spacer.width + spec.mark_width / 2.0)
}

pub fn arrow_offset(state: DistanceState, measured: &RulerMeasurement, spec: &RulerSpec) -> f64 {
    if !measured.is_measured() {
        return 0.0;
    }
    neutral_if_degenerate(VisualPosition::of(state).direction() * edge_offset(measured, spec))
}

pub fn offsets(state: DistanceState, measured: &RulerMeasurement, spec: &RulerSpec) -> Offsets {
    Offsets {
        highlight: highlight_offset(state, measured, spec),
        arrow: arrow_offset(state, measured, spec),
    }
}

fn neutral_if_degenerate(value: f64) -> f64 {
    // -0.0 from the centred direction would break exact equality checks downstream
    if value.is_finite() && value != 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> RulerMeasurement {
        RulerMeasurement::new(Size::new(3.0, 20.0), Size::new(130.0, 20.0))
    }

    #[test]
    fn highlight_window_width() {
        assert_eq!(highlight_width(3.0, 3.0, 5), 30.0);
        assert_eq!(highlight_width(0.0, 3.0, 5), 15.0);
    }

    #[test]
    fn scenario_highlight_offsets() {
        let spec = RulerSpec::default();
        let m = scenario();
        assert_eq!(highlight_offset(DistanceState::TooClose, &m, &spec), -50.0);
        assert_eq!(highlight_offset(DistanceState::TooFar, &m, &spec), 50.0);
    }

    #[test]
    fn scenario_arrow_offsets() {
        let spec = RulerSpec::default();
        let m = scenario();
        assert_eq!(edge_offset(&m, &spec), 60.5);
        assert_eq!(arrow_offset(DistanceState::TooClose, &m, &spec), -60.5);
        assert_eq!(arrow_offset(DistanceState::TooFar, &m, &spec), 60.5);
    }

    #[test]
    fn centred_states_are_zero() {
        let spec = RulerSpec::default();
        for s in [0.0, 1.0, 3.0, 12.5] {
            for w in [0.0, 10.0, 130.0, 1000.0] {
                let m = RulerMeasurement::new(Size::new(s, 1.0), Size::new(w, 1.0));
                for state in [DistanceState::Acceptable, DistanceState::Unknown] {
                    assert_eq!(offsets(state, &m, &spec), Offsets::ZERO, "s={s} w={w}");
                }
            }
        }
    }

    #[test]
    fn symmetric_around_centre() {
        let spec = RulerSpec::default();
        for (s, w) in [(3.0, 130.0), (1.5, 47.0), (7.0, 12.0), (0.0, 64.0)] {
            let m = RulerMeasurement::new(Size::new(s, 1.0), Size::new(w, 1.0));
            let close = offsets(DistanceState::TooClose, &m, &spec);
            let far = offsets(DistanceState::TooFar, &m, &spec);
            assert_eq!(close.highlight, -far.highlight, "s={s} w={w}");
            assert_eq!(close.arrow, -far.arrow, "s={s} w={w}");
        }
    }

    #[test]
    fn unmeasured_is_neutral() {
        let spec = RulerSpec::default();
        let m = RulerMeasurement::default();
        assert!(!m.is_measured());
        for state in DistanceState::ALL {
            let o = offsets(*state, &m, &spec);
            assert_eq!(o, Offsets::ZERO);
            assert!(o.highlight.is_finite() && o.arrow.is_finite());
        }
    }

    #[test]
    fn non_finite_input_is_neutral() {
        let spec = RulerSpec::default();
        let m = RulerMeasurement::new(Size::new(f64::NAN, 1.0), Size::new(100.0, 1.0));
        assert_eq!(offsets(DistanceState::TooFar, &m, &spec), Offsets::ZERO);
    }

    #[test]
    fn repeated_state_gives_same_offsets() {
        let spec = RulerSpec::default();
        let m = scenario();
        let first = offsets(DistanceState::TooFar, &m, &spec);
        let second = offsets(DistanceState::TooFar, &m, &spec);
        assert_eq!(first, second);
    }
}
