use serde::{Deserialize, Serialize};

use crate::core::{BandTransform, HorizonMode};
use crate::interaction::TooltipState;
use crate::render::{Backend, Color, Renderer};

use super::{HorizonChart, HorizonOptions};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSnapshot {
    pub x: f64,
    pub y: f64,
    pub sample_count: usize,
}

/// Target state of one band for the last update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSnapshot {
    pub index: i32,
    pub fill: Color,
    pub transform: BandTransform,
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonSnapshot {
    pub backend: Backend,
    pub options: HorizonOptions,
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
    pub y_exponent: f64,
    pub color_domain: Vec<f64>,
    pub points: Vec<PointSnapshot>,
    pub bands: Vec<BandSnapshot>,
    pub hovered: Option<usize>,
    pub tooltip: TooltipState,
    pub update_count: u64,
}

impl HorizonSnapshot {
    #[must_use]
    pub fn mode(&self) -> HorizonMode {
        self.options.mode
    }
}

impl<R: Renderer, S: Clone> HorizonChart<R, S> {
    #[must_use]
    pub fn snapshot(&self) -> HorizonSnapshot {
        let layout = &self.layout;
        HorizonSnapshot {
            backend: self.scene.backend(),
            options: self.options.clone(),
            x_domain: layout.x_scale.domain(),
            y_domain: layout.y_scale.domain(),
            y_exponent: layout.y_scale.exponent(),
            color_domain: layout.color_scale.domain().to_vec(),
            points: layout
                .aggregation
                .points
                .iter()
                .map(|point| PointSnapshot {
                    x: point.x,
                    y: point.y,
                    sample_count: point.samples.len(),
                })
                .collect(),
            bands: layout
                .band_targets(&self.options)
                .into_iter()
                .map(|target| BandSnapshot {
                    index: target.index.get(),
                    fill: target.fill,
                    transform: target.transform,
                })
                .collect(),
            hovered: self.interaction.hovered(),
            tooltip: self.interaction.tooltip().clone(),
            update_count: self.update_count,
        }
    }
}
