use std::time::Duration;

use indexmap::IndexMap;
use tracing::trace;

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{
    AreaVertex, BandIndex, BandTransform, Color, CurveKind, Tween, area_path, diff_keys,
};
use crate::render::{Backend, BandPrimitive, RenderFrame};

/// Target state of one band for the current update cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandTarget {
    pub index: BandIndex,
    pub fill: Color,
    pub transform: BandTransform,
}

/// Everything the scene needs from one recompute.
///
/// `filled` is the full-height silhouette (`y1 = baseline - yScale(y)`),
/// shared by every band; per-band differences are only fill and transform.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneUpdate {
    pub targets: Vec<BandTarget>,
    /// Transform for bands leaving the chart, evaluated with the new layout.
    pub exit_transforms: IndexMap<BandIndex, BandTransform>,
    pub filled: Vec<AreaVertex>,
    pub width: f64,
    pub height: f64,
    pub curve: CurveKind,
    pub duration: Duration,
}

/// Per-band animation state.
///
/// Vector nodes animate their `shape` vertices; raster bands animate `size`
/// and rebuild their shape from the current silhouette every frame.
#[derive(Debug, Clone, PartialEq)]
struct BandNode {
    fill: Tween<Color>,
    transform: Tween<BandTransform>,
    size: Tween<f64>,
    shape: Tween<Vec<AreaVertex>>,
    exiting: bool,
}

impl BandNode {
    fn advance(&mut self, delta: Duration) {
        self.fill.advance(delta);
        self.transform.advance(delta);
        self.size.advance(delta);
        self.shape.advance(delta);
    }

    fn is_settled(&self) -> bool {
        self.fill.is_finished()
            && self.transform.is_finished()
            && self.size.is_finished()
            && self.shape.is_finished()
    }
}

/// Keyed band scene shared by both backends.
///
/// Bands are matched by index across updates: new bands grow in from the
/// baseline, retained bands retarget their attributes, removed bands collapse
/// back to the baseline and are dropped once their transition completes.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScene {
    backend: Backend,
    nodes: IndexMap<BandIndex, BandNode>,
    surface_width: Option<Tween<f64>>,
    surface_height: Option<Tween<f64>>,
    filled: Vec<AreaVertex>,
    curve: CurveKind,
}

impl BandScene {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            nodes: IndexMap::new(),
            surface_width: None,
            surface_height: None,
            filled: Vec::new(),
            curve: CurveKind::default(),
        }
    }

    #[must_use]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Band indices currently alive, including bands still exiting.
    #[must_use]
    pub fn live_indices(&self) -> Vec<BandIndex> {
        self.nodes.keys().copied().collect()
    }

    #[must_use]
    pub fn exiting_count(&self) -> usize {
        self.nodes.values().filter(|node| node.exiting).count()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.nodes.values().any(|node| !node.is_settled())
            || self
                .surface_width
                .iter()
                .chain(self.surface_height.iter())
                .any(|tween| !tween.is_finished())
    }

    pub fn apply(&mut self, update: SceneUpdate) {
        let SceneUpdate {
            targets,
            exit_transforms,
            filled,
            width,
            height,
            curve,
            duration,
        } = update;

        let desired: Vec<BandIndex> = targets.iter().map(|target| target.index).collect();
        let diff = diff_keys(self.nodes.keys().copied(), &desired);
        trace!(
            entered = diff.entered.len(),
            retained = diff.retained.len(),
            exited = diff.exited.len(),
            "reconcile bands"
        );

        let baseline = collapse(&filled);
        for target in &targets {
            match self.nodes.get_mut(&target.index) {
                Some(node) => {
                    node.exiting = false;
                    node.fill.retarget(target.fill, duration);
                    node.transform.retarget(target.transform, duration);
                    node.size.retarget(1.0, duration);
                    node.shape.retarget(filled.clone(), duration);
                }
                None => {
                    self.nodes.insert(
                        target.index,
                        BandNode {
                            fill: Tween::settled(target.fill),
                            transform: Tween::settled(target.transform),
                            size: Tween::between(0.0, 1.0, duration),
                            shape: Tween::between(baseline.clone(), filled.clone(), duration),
                            exiting: false,
                        },
                    );
                }
            }
        }

        for index in &diff.exited {
            if let Some(node) = self.nodes.get_mut(index) {
                node.exiting = true;
                if let Some(transform) = exit_transforms.get(index) {
                    node.transform.retarget(*transform, duration);
                }
                node.size.retarget(0.0, duration);
                let collapsed = collapse(&node.shape.value());
                node.shape.retarget(collapsed, duration);
            }
        }

        match (&mut self.surface_width, &mut self.surface_height) {
            (Some(w), Some(h)) => {
                w.retarget(width, duration);
                h.retarget(height, duration);
            }
            _ => {
                self.surface_width = Some(Tween::settled(width));
                self.surface_height = Some(Tween::settled(height));
            }
        }

        self.filled = filled;
        self.curve = curve;
        self.prune();
    }

    /// Steps every transition by `delta` and drops bands whose exit finished.
    pub fn advance(&mut self, delta: Duration) {
        for node in self.nodes.values_mut() {
            node.advance(delta);
        }
        for tween in self
            .surface_width
            .iter_mut()
            .chain(self.surface_height.iter_mut())
        {
            tween.advance(delta);
        }
        self.prune();
    }

    /// Materializes the current animation state into a draw list.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        let width = self.surface_width.as_ref().map_or(0.0, Tween::value);
        let height = self.surface_height.as_ref().map_or(0.0, Tween::value);
        let nodes: Vec<(&BandIndex, &BandNode)> = self.nodes.iter().collect();

        #[cfg(feature = "parallel-projection")]
        let bands: Vec<BandPrimitive> = nodes
            .par_iter()
            .map(|(index, node)| self.band_primitive(**index, node))
            .collect();

        #[cfg(not(feature = "parallel-projection"))]
        let bands: Vec<BandPrimitive> = nodes
            .iter()
            .map(|(index, node)| self.band_primitive(**index, node))
            .collect();

        RenderFrame {
            backend: self.backend,
            width,
            height,
            bands,
        }
    }

    fn band_primitive(&self, index: BandIndex, node: &BandNode) -> BandPrimitive {
        let vertices = match self.backend {
            Backend::Vector => node.shape.value(),
            Backend::Raster => scale_silhouette(&self.filled, node.size.value()),
        };
        BandPrimitive {
            index,
            fill: node.fill.value(),
            transform: node.transform.value(),
            path: area_path(&vertices, self.curve),
        }
    }

    fn prune(&mut self) {
        self.nodes
            .retain(|_, node| !(node.exiting && node.is_settled()));
    }
}

fn collapse(vertices: &[AreaVertex]) -> Vec<AreaVertex> {
    vertices
        .iter()
        .map(|vertex| AreaVertex {
            y1: vertex.y0,
            ..*vertex
        })
        .collect()
}

fn scale_silhouette(filled: &[AreaVertex], size: f64) -> Vec<AreaVertex> {
    filled
        .iter()
        .map(|vertex| AreaVertex {
            y1: vertex.y0 - (vertex.y0 - vertex.y1) * size,
            ..*vertex
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use indexmap::IndexMap;

    use super::{BandScene, BandTarget, SceneUpdate};
    use crate::core::{
        AreaVertex, BandIndex, BandTransform, Color, CurveKind, HorizonMode, band_indices,
    };
    use crate::render::Backend;

    fn update(bands: u32, duration_ms: u64) -> SceneUpdate {
        let targets = band_indices(bands)
            .into_iter()
            .map(|index| BandTarget {
                index,
                fill: Color::WHITE,
                transform: BandTransform::for_band(index, bands, 10.0, HorizonMode::Offset),
            })
            .collect();
        let exit_transforms: IndexMap<BandIndex, BandTransform> = band_indices(8)
            .into_iter()
            .map(|index| {
                (
                    index,
                    BandTransform::for_band(index, bands, 10.0, HorizonMode::Offset),
                )
            })
            .collect();
        SceneUpdate {
            targets,
            exit_transforms,
            filled: vec![
                AreaVertex {
                    x: 0.0,
                    y0: 40.0,
                    y1: 0.0,
                },
                AreaVertex {
                    x: 10.0,
                    y0: 40.0,
                    y1: 20.0,
                },
            ],
            width: 100.0,
            height: 10.0,
            curve: CurveKind::Linear,
            duration: Duration::from_millis(duration_ms),
        }
    }

    #[test]
    fn raster_bands_grow_from_zero_size() {
        let mut scene = BandScene::new(Backend::Raster);
        scene.apply(update(2, 100));
        let frame = scene.frame();
        assert_eq!(frame.bands.len(), 4);
        assert!(scene.is_animating());

        scene.advance(Duration::from_millis(50));
        let frame = scene.frame();
        assert_eq!(
            frame.bands[0].path[0],
            crate::core::PathCommand::MoveTo { x: 0.0, y: 20.0 }
        );

        scene.advance(Duration::from_millis(50));
        assert!(!scene.is_animating());
    }

    #[test]
    fn removed_bands_linger_until_exit_completes() {
        let mut scene = BandScene::new(Backend::Vector);
        scene.apply(update(3, 0));
        scene.apply(update(2, 100));
        assert_eq!(scene.live_indices().len(), 6);
        assert_eq!(scene.exiting_count(), 2);

        scene.advance(Duration::from_millis(100));
        assert_eq!(scene.live_indices().len(), 4);
        assert_eq!(scene.exiting_count(), 0);
    }

    #[test]
    fn zero_duration_removes_bands_immediately() {
        let mut scene = BandScene::new(Backend::Raster);
        scene.apply(update(3, 0));
        scene.apply(update(1, 0));
        let values: Vec<i32> = scene.live_indices().into_iter().map(BandIndex::get).collect();
        assert_eq!(values, vec![-1, 1]);
    }
}
