use std::collections::BTreeMap;
use std::sync::Arc;

use ordered_float::OrderedFloat;
use tracing::trace;

use crate::core::primitives::canonical_key;

/// Extracts one numeric coordinate from a host sample.
pub type AccessorFn<S> = Arc<dyn Fn(&S) -> f64 + Send + Sync + 'static>;

/// Combines every y value sharing one x into a single value.
///
/// Reducers are only ever called with a non-empty slice.
pub type ReducerFn = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync + 'static>;

/// Built-in reducers usable as `Arc::new(reducers::mean)`.
pub mod reducers {
    #[must_use]
    pub fn sum(values: &[f64]) -> f64 {
        values.iter().sum()
    }

    #[must_use]
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        sum(values) / values.len() as f64
    }

    #[must_use]
    pub fn min(values: &[f64]) -> f64 {
        values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    #[must_use]
    pub fn max(values: &[f64]) -> f64 {
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    #[must_use]
    pub fn last(values: &[f64]) -> f64 {
        values.last().copied().unwrap_or(0.0)
    }
}

#[must_use]
pub fn default_reducer() -> ReducerFn {
    Arc::new(reducers::sum)
}

/// One distinct x value after grouping, with the samples that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedPoint<S> {
    pub x: f64,
    pub y: f64,
    pub samples: Vec<S>,
}

/// Output of one aggregation pass.
///
/// `points` is strictly ascending in x. `x_range` is the effective domain used
/// by the x-scale, which may be narrower than the kept points (see
/// [`aggregate`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation<S> {
    pub points: Vec<AggregatedPoint<S>>,
    pub x_range: (f64, f64),
}

impl<S> Aggregation<S> {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            x_range: (0.0, 1.0),
        }
    }

    /// Largest absolute aggregated y, floored at zero.
    #[must_use]
    pub fn max_abs_y(&self) -> f64 {
        self.points
            .iter()
            .map(|point| point.y.abs())
            .filter(|value| value.is_finite())
            .fold(0.0, f64::max)
    }
}

/// Groups samples by x, reduces each group's y values and clips to the x range.
///
/// When `x_min`/`x_max` are `None` the range follows the first/last grouped x
/// (or `[0, 1]` without data). Clipping keeps the closest data point at or
/// beyond each bound so the boundary segment is still drawn when a bound falls
/// between two samples.
pub fn aggregate<S: Clone>(
    data: &[S],
    x: &AccessorFn<S>,
    y: &AccessorFn<S>,
    reducer: &ReducerFn,
    x_min: Option<f64>,
    x_max: Option<f64>,
) -> Aggregation<S> {
    let mut groups: BTreeMap<OrderedFloat<f64>, (Vec<f64>, Vec<S>)> = BTreeMap::new();
    let mut skipped = 0usize;
    for sample in data {
        let key = x(sample);
        if !key.is_finite() {
            skipped += 1;
            continue;
        }
        let entry = groups
            .entry(OrderedFloat(canonical_key(key)))
            .or_insert_with(|| (Vec::new(), Vec::new()));
        entry.0.push(y(sample));
        entry.1.push(sample.clone());
    }
    if skipped > 0 {
        trace!(skipped, "skipped samples with non-finite x");
    }

    let points: Vec<AggregatedPoint<S>> = groups
        .into_iter()
        .map(|(key, (values, samples))| AggregatedPoint {
            x: key.0,
            y: reducer(&values),
            samples,
        })
        .collect();

    let range_min = x_min.unwrap_or_else(|| points.first().map_or(0.0, |point| point.x));
    let range_max = x_max.unwrap_or_else(|| points.last().map_or(1.0, |point| point.x));

    Aggregation {
        points: clip_to_anchors(points, range_min, range_max),
        x_range: (range_min, range_max),
    }
}

fn clip_to_anchors<S>(
    mut points: Vec<AggregatedPoint<S>>,
    start: f64,
    end: f64,
) -> Vec<AggregatedPoint<S>> {
    let (low, high) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    let below = points.partition_point(|point| point.x <= low);
    let lower_anchor = if below > 0 {
        points[below - 1].x
    } else {
        low
    };
    let above = points.partition_point(|point| point.x < high);
    let upper_anchor = points.get(above).map_or(high, |point| point.x);

    let keep_end = points.partition_point(|point| point.x <= upper_anchor);
    points.truncate(keep_end);
    let keep_start = points.partition_point(|point| point.x < lower_anchor);
    points.drain(..keep_start);
    points
}

#[cfg(test)]
mod tests {
    use super::{AggregatedPoint, clip_to_anchors, reducers};

    fn points(xs: &[f64]) -> Vec<AggregatedPoint<()>> {
        xs.iter()
            .map(|&x| AggregatedPoint {
                x,
                y: 0.0,
                samples: Vec::new(),
            })
            .collect()
    }

    fn xs(points: &[AggregatedPoint<()>]) -> Vec<f64> {
        points.iter().map(|point| point.x).collect()
    }

    #[test]
    fn clip_extends_to_closest_outer_points() {
        let kept = clip_to_anchors(points(&[0.0, 1.0, 2.0, 3.0, 4.0]), 1.5, 2.5);
        assert_eq!(xs(&kept), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn clip_on_exact_bounds_keeps_bounds_only() {
        let kept = clip_to_anchors(points(&[0.0, 1.0, 2.0, 3.0, 4.0]), 1.0, 3.0);
        assert_eq!(xs(&kept), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn clip_outside_data_keeps_nearest_edge_point() {
        let kept = clip_to_anchors(points(&[0.0, 1.0, 2.0]), 5.0, 8.0);
        assert_eq!(xs(&kept), vec![2.0]);
        let kept = clip_to_anchors(points(&[0.0, 1.0, 2.0]), -8.0, -5.0);
        assert_eq!(xs(&kept), vec![0.0]);
    }

    #[test]
    fn reducers_cover_common_aggregations() {
        let values = [1.0, 4.0, -2.0];
        assert_eq!(reducers::sum(&values), 3.0);
        assert_eq!(reducers::mean(&values), 1.0);
        assert_eq!(reducers::min(&values), -2.0);
        assert_eq!(reducers::max(&values), 4.0);
        assert_eq!(reducers::last(&values), -2.0);
    }
}
