use std::fmt::Write as _;

use indexmap::IndexMap;
use tracing::trace;

use crate::core::{BandIndex, diff_keys, svg_path_data};
use crate::error::ChartResult;
use crate::interaction::TooltipState;
use crate::render::{Backend, RenderFrame, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub paths_created: usize,
    pub paths_updated: usize,
    pub paths_removed: usize,
}

/// Retained `<path>` element for one band.
///
/// `id` is assigned on creation and survives updates, so hosts can tell a
/// re-styled band from a replaced one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgPathNode {
    pub id: u64,
    pub d: String,
    pub transform: String,
    pub fill: String,
}

/// Retained-mode vector backend producing SVG markup.
///
/// Nodes are keyed by band index; every frame updates matching nodes in
/// place, appends new ones and removes the rest.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    width: f64,
    height: f64,
    nodes: IndexMap<BandIndex, SvgPathNode>,
    next_id: u64,
    tooltip: TooltipState,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "svg"
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn node(&self, index: BandIndex) -> Option<&SvgPathNode> {
        self.nodes.get(&index)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Standalone SVG document for the current nodes.
    #[must_use]
    pub fn document(&self) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" style=\"display: block;\">",
            self.width, self.height
        );
        for node in self.nodes.values() {
            let _ = write!(
                svg,
                "<path d=\"{}\" transform=\"{}\" style=\"fill: {};\"></path>",
                node.d, node.transform, node.fill
            );
        }
        svg.push_str("</svg>");
        svg
    }

    /// Container markup: the tooltip overlay followed by the SVG surface.
    #[must_use]
    pub fn container_markup(&self) -> String {
        let display = if self.tooltip.visible { "inline" } else { "none" };
        format!(
            "<div class=\"horizon-container\"><div class=\"horizon-tooltip\" style=\"display: {display}; left: {}px; top: {}px;\">{}</div>{}</div>",
            self.tooltip.left,
            self.tooltip.top,
            self.tooltip.content,
            self.document()
        )
    }
}

impl Renderer for SvgRenderer {
    fn backend(&self) -> Option<Backend> {
        Some(Backend::Vector)
    }

    fn mount(&mut self) -> ChartResult<()> {
        self.nodes.clear();
        self.width = 0.0;
        self.height = 0.0;
        self.tooltip = TooltipState::default();
        self.last_stats = SvgRenderStats::default();
        Ok(())
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let desired: Vec<BandIndex> = frame.bands.iter().map(|band| band.index).collect();
        let diff = diff_keys(self.nodes.keys().copied(), &desired);
        let mut stats = SvgRenderStats {
            paths_removed: diff.exited.len(),
            ..SvgRenderStats::default()
        };
        for index in &diff.exited {
            self.nodes.shift_remove(index);
        }

        for band in &frame.bands {
            let d = svg_path_data(&band.path);
            let transform = band.transform.to_svg();
            let fill = band.fill.to_css();
            match self.nodes.get_mut(&band.index) {
                Some(node) => {
                    node.d = d;
                    node.transform = transform;
                    node.fill = fill;
                    stats.paths_updated += 1;
                }
                None => {
                    self.next_id += 1;
                    self.nodes.insert(
                        band.index,
                        SvgPathNode {
                            id: self.next_id,
                            d,
                            transform,
                            fill,
                        },
                    );
                    stats.paths_created += 1;
                }
            }
        }

        self.width = frame.width;
        self.height = frame.height;
        self.last_stats = stats;
        trace!(
            created = stats.paths_created,
            updated = stats.paths_updated,
            removed = stats.paths_removed,
            "svg frame"
        );
        Ok(())
    }

    fn update_overlay(&mut self, tooltip: &TooltipState) -> ChartResult<()> {
        self.tooltip = tooltip.clone();
        Ok(())
    }
}
