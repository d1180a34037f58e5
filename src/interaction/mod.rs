use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{AggregatedPoint, LinearScale};

/// A pointer farther than this from the nearest point (in pixels) hovers nothing.
pub const MIN_HOVER_DISTANCE_PX: f64 = 25.0;

/// Payload delivered to hover/click callbacks and tooltip formatters.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverData<S> {
    pub x: f64,
    pub y: f64,
    /// Source samples aggregated into this point.
    pub points: Vec<S>,
}

impl<S: Clone> HoverData<S> {
    #[must_use]
    pub fn from_point(point: &AggregatedPoint<S>) -> Self {
        Self {
            x: point.x,
            y: point.y,
            points: point.samples.clone(),
        }
    }
}

/// Overlay tooltip exposed to renderers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipState {
    pub visible: bool,
    pub left: f64,
    pub top: f64,
    /// Markup produced by the tooltip formatter for the hovered point.
    pub content: String,
}

/// Finds the point nearest to data-space `x`.
///
/// Points must be sorted by ascending x: the scan stops at the first point
/// farther away than its predecessor. Ties resolve to the later point.
/// Returns the index and the absolute data-space distance.
#[must_use]
pub fn nearest_point<S>(points: &[AggregatedPoint<S>], x: f64) -> Option<(usize, f64)> {
    if !x.is_finite() {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, point) in points.iter().enumerate() {
        let distance = (x - point.x).abs();
        if best.is_some_and(|(_, best_distance)| distance > best_distance) {
            break;
        }
        best = Some((index, distance));
    }
    best
}

/// Resolves a pointer pixel position to the index of the hovered point.
///
/// The winning data-space distance is measured back in pixels through
/// `x_scale`; anything beyond [`MIN_HOVER_DISTANCE_PX`] hovers nothing.
#[must_use]
pub fn lookup_hover<S>(
    points: &[AggregatedPoint<S>],
    x_scale: LinearScale,
    pointer_x: f64,
) -> Option<usize> {
    let data_x = x_scale.invert(pointer_x);
    let (index, distance) = nearest_point(points, data_x)?;
    let pixel_distance = (x_scale.apply(distance) - x_scale.apply(0.0)).abs();
    trace!(pointer_x, data_x, index, pixel_distance, "hover lookup");
    if pixel_distance > MIN_HOVER_DISTANCE_PX {
        return None;
    }
    Some(index)
}

/// Pointer-driven state of one chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    pointer: Option<(f64, f64)>,
    hovered: Option<usize>,
    tooltip: TooltipState,
}

impl InteractionState {
    #[must_use]
    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    /// Index of the hovered point in the current aggregation.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Some((x, y));
    }

    pub fn show_tooltip_at(&mut self, x: f64, y: f64) {
        self.tooltip.visible = true;
        self.tooltip.left = x;
        self.tooltip.top = y;
    }

    pub fn set_tooltip_content(&mut self, content: String) {
        self.tooltip.content = content;
    }

    /// Records the resolved point; returns `true` when it differs from the
    /// previous one.
    pub fn set_hovered(&mut self, hovered: Option<usize>) -> bool {
        let changed = self.hovered != hovered;
        self.hovered = hovered;
        changed
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
        self.hovered = None;
        self.tooltip.visible = false;
    }

    /// Forgets the hovered point without touching pointer or tooltip, used
    /// when the aggregation it indexes into is replaced.
    pub fn reset_hover(&mut self) {
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionState, nearest_point};
    use crate::core::AggregatedPoint;

    fn points(xs: &[f64]) -> Vec<AggregatedPoint<()>> {
        xs.iter()
            .map(|&x| AggregatedPoint {
                x,
                y: 1.0,
                samples: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn nearest_point_stops_once_distance_grows() {
        let data = points(&[0.0, 10.0, 20.0, 30.0]);
        assert_eq!(nearest_point(&data, 12.0), Some((1, 2.0)));
        assert_eq!(nearest_point(&data, 100.0), Some((3, 70.0)));
        assert_eq!(nearest_point(&data, -5.0), Some((0, 5.0)));
    }

    #[test]
    fn nearest_point_ties_pick_later_point() {
        let data = points(&[0.0, 10.0]);
        assert_eq!(nearest_point(&data, 5.0), Some((1, 5.0)));
    }

    #[test]
    fn nearest_point_handles_empty_and_non_finite() {
        assert_eq!(nearest_point(&points(&[]), 1.0), None);
        assert_eq!(nearest_point(&points(&[1.0]), f64::NAN), None);
    }

    #[test]
    fn set_hovered_reports_changes_only() {
        let mut state = InteractionState::default();
        assert!(state.set_hovered(Some(1)));
        assert!(!state.set_hovered(Some(1)));
        assert!(state.set_hovered(None));
        state.show_tooltip_at(3.0, 4.0);
        state.on_pointer_leave();
        assert!(!state.tooltip().visible);
    }
}
