//! The ruler gauge widget.
//!
//! Two layers of marks share one column layout. The base layer is drawn
//! everywhere except under the highlight window; the taller accent layer is
//! drawn only inside it. Clipping each column against the window gives the
//! same picture as masking one layer out and the other in.

use distind_core::geometry::{highlight_width, Offsets, RulerMeasurement, RulerSpec};
use distind_core::layout::TrackLayout;
use ratatui::prelude::*;

use crate::theme::Theme;

const CLOSE_LABEL: &str = "Too Close";
const FAR_LABEL: &str = "Too Far";
const MARK_SYMBOL: &str = "█";
const ARROW_SYMBOL: &str = "▲";

/// Layout facts the widget learned while drawing, read back by the app.
#[derive(Debug, Clone, Default)]
pub struct RulerState {
    measurement: RulerMeasurement,
    track: Option<Rect>,
}

impl RulerState {
    pub fn measurement(&self) -> RulerMeasurement {
        self.measurement
    }

    /// Screen area of the mark track from the last draw.
    pub fn track(&self) -> Option<Rect> {
        self.track
    }
}

pub struct RulerWidget<'a> {
    spec: &'a RulerSpec,
    theme: &'a Theme,
    offsets: Offsets,
    mark_rows: u16,
    highlight_rows: u16,
}

impl<'a> RulerWidget<'a> {
    pub fn new(spec: &'a RulerSpec, theme: &'a Theme) -> Self {
        Self {
            spec,
            theme,
            offsets: Offsets::ZERO,
            mark_rows: 2,
            highlight_rows: 3,
        }
    }

    pub fn offsets(mut self, offsets: Offsets) -> Self {
        self.offsets = offsets;
        self
    }

    pub fn rows(mut self, mark_rows: u16, highlight_rows: u16) -> Self {
        self.mark_rows = mark_rows.max(1);
        self.highlight_rows = highlight_rows.max(self.mark_rows);
        self
    }

    /// Rows needed: the tallest marks plus the arrow line.
    pub fn height(&self) -> u16 {
        self.highlight_rows.saturating_add(1)
    }

    fn mark_columns(&self) -> u16 {
        self.spec.mark_width.round().max(1.0) as u16
    }
}

impl StatefulWidget for RulerWidget<'_> {
    type State = RulerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut RulerState) {
        if area.is_empty() {
            state.measurement = RulerMeasurement::default();
            state.track = None;
            return;
        }

        let mark_cols = self.mark_columns();
        let marks = u16::try_from(self.spec.marks).unwrap_or(u16::MAX);
        let min_track = marks.saturating_mul(mark_cols);
        let close_w = CLOSE_LABEL.chars().count() as u16;
        let far_w = FAR_LABEL.chars().count() as u16;

        // drop the labels before squeezing the marks together
        let show_labels = area.width >= (close_w + far_w + 2).saturating_add(min_track);
        let (track_x, track_w) = if show_labels {
            (area.x + close_w + 1, area.width - close_w - far_w - 2)
        } else {
            (area.x, area.width)
        };

        let height = self.height().min(area.height);
        let top = area.y + (area.height - height) / 2;
        let track_rows = height.saturating_sub(1).max(1);
        let track = Rect::new(track_x, top, track_w, track_rows);

        let layout = TrackLayout::compute(track.width, self.spec.marks, mark_cols);
        state.measurement = layout.measurement(track.height);
        state.track = Some(track);

        let label_y = top + track_rows / 2;
        if show_labels {
            let style = Style::default().fg(self.theme.text_primary);
            buf.set_string(area.x, label_y, CLOSE_LABEL, style);
            buf.set_string(track.right() + 1, label_y, FAR_LABEL, style);
        }

        let window = highlight_width(state.measurement.spacer.width, self.spec.mark_width, self.spec.highlight_count);
        let window_center = layout.center() + self.offsets.highlight;
        let window_start = window_center - window / 2.0;
        let window_end = window_center + window / 2.0;

        let base_rows = self.mark_rows.min(track_rows);
        let lit_rows = self.highlight_rows.min(track_rows);
        let bottom = track.bottom();

        for col in 0..track.width {
            if layout.mark_at(col).is_none() {
                continue;
            }
            let mid = col as f64 + 0.5;
            let lit = mid >= window_start && mid < window_end;
            let (rows, color) = if lit {
                (lit_rows, self.theme.highlight)
            } else {
                (base_rows, self.theme.mark)
            };
            for row in 0..rows {
                buf[(track.x + col, bottom - 1 - row)]
                    .set_symbol(MARK_SYMBOL)
                    .set_fg(color);
            }
        }

        if height > track_rows {
            let arrow_x = (layout.center() + self.offsets.arrow).floor();
            if arrow_x >= 0.0 && arrow_x < track.width as f64 {
                buf[(track.x + arrow_x as u16, bottom)]
                    .set_symbol(ARROW_SYMBOL)
                    .set_fg(self.theme.arrow);
            }
        }
    }
}
