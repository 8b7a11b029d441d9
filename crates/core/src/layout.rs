use crate::geometry::{RulerMeasurement, Size};

/// Column layout of a mark track: `N` marks separated by `N + 1` flexible
/// gaps (before the first mark, between marks, and after the last).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackLayout {
    pub width: u16,
    pub mark_width: u16,
    /// Width of every gap, left to right. Always `marks + 1` entries.
    pub gaps: Vec<u16>,
    /// Left column of every mark, relative to the track.
    pub marks: Vec<u16>,
}

impl TrackLayout {
    pub fn compute(width: u16, marks: usize, mark_width: u16) -> Self {
        let gap_count = marks + 1;
        let used = (marks as u32).saturating_mul(mark_width as u32);
        let free = (width as u32).saturating_sub(used);

        let base = free / gap_count as u32;
        let mut remainder = free % gap_count as u32;
        let mut gaps = vec![base as u16; gap_count];

        // Leftover columns go to the middle gaps first so the track stays
        // as close to symmetric as integer columns allow.
        let mut order: Vec<usize> = (0..gap_count).collect();
        order.sort_by_key(|&i| (2 * i as i64 - marks as i64).abs());
        for i in order {
            if remainder == 0 {
                break;
            }
            gaps[i] += 1;
            remainder -= 1;
        }

        let mut positions = Vec::with_capacity(marks);
        let mut x: u32 = 0;
        for gap in gaps.iter().take(marks) {
            x += *gap as u32;
            positions.push(x.min(u16::MAX as u32) as u16);
            x += mark_width as u32;
        }

        Self {
            width,
            mark_width,
            gaps,
            marks: positions,
        }
    }

    pub fn free_columns(&self) -> u16 {
        self.gaps.iter().sum()
    }

    /// Horizontal centre of the track in columns.
    pub fn center(&self) -> f64 {
        self.width as f64 / 2.0
    }

    /// Index of the mark covering `column`, if any.
    pub fn mark_at(&self, column: u16) -> Option<usize> {
        self.marks
            .iter()
            .position(|&start| column >= start && column < start.saturating_add(self.mark_width))
    }

    /// Sizes as rendered, for the geometry calculator. The spacer is the
    /// mean gap, so uneven integer gaps still produce a symmetric result.
    pub fn measurement(&self, height: u16) -> RulerMeasurement {
        if self.width == 0 {
            return RulerMeasurement::default();
        }
        let spacer = self.free_columns() as f64 / self.gaps.len() as f64;
        RulerMeasurement::new(
            Size::new(spacer, height as f64),
            Size::new(self.width as f64, height as f64),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_distribution() {
        // 13 marks * 3 = 39 columns, 14 gaps * 3 = 42 columns
        let layout = TrackLayout::compute(81, 13, 3);
        assert!(layout.gaps.iter().all(|&g| g == 3));
        assert_eq!(layout.marks.len(), 13);
        assert_eq!(layout.marks[0], 3);
        assert_eq!(layout.marks[12], 3 + 12 * 6);
        let m = layout.measurement(2);
        assert_eq!(m.spacer.width, 3.0);
        assert_eq!(m.ruler.width, 81.0);
        assert_eq!(m.ruler.height, 2.0);
    }

    #[test]
    fn remainder_goes_to_middle() {
        let layout = TrackLayout::compute(81 + 2, 13, 3);
        assert_eq!(layout.gaps[6], 4);
        assert_eq!(layout.gaps[7], 4);
        assert_eq!(layout.gaps[0], 3);
        assert_eq!(layout.gaps[13], 3);
        assert_eq!(layout.free_columns(), 44);
    }

    #[test]
    fn symmetric_gaps_for_even_remainder() {
        let layout = TrackLayout::compute(61, 13, 1);
        let reversed: Vec<u16> = layout.gaps.iter().rev().copied().collect();
        assert_eq!(layout.gaps, reversed);
    }

    #[test]
    fn too_narrow_collapses_gaps() {
        let layout = TrackLayout::compute(20, 13, 3);
        assert!(layout.gaps.iter().all(|&g| g == 0));
        assert_eq!(layout.measurement(1).spacer.width, 0.0);
    }

    #[test]
    fn zero_width_is_unmeasured() {
        let layout = TrackLayout::compute(0, 13, 3);
        let m = layout.measurement(2);
        assert!(!m.is_measured());
        assert_eq!(m, RulerMeasurement::default());
    }

    #[test]
    fn mark_lookup() {
        let layout = TrackLayout::compute(81, 13, 3);
        assert_eq!(layout.mark_at(0), None);
        assert_eq!(layout.mark_at(3), Some(0));
        assert_eq!(layout.mark_at(5), Some(0));
        assert_eq!(layout.mark_at(6), None);
        assert_eq!(layout.mark_at(9), Some(1));
    }
}
