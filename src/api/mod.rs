mod animation;
mod callbacks;
mod chart;
mod config_controller;
mod interaction_controller;
mod json_contract;
mod layout;
mod options;
mod snapshot;

pub use callbacks::{ClickCallbackFn, HoverCallbackFn, TooltipContentFn, default_tooltip_content};
pub use chart::HorizonChart;
pub use json_contract::{HORIZON_SNAPSHOT_JSON_SCHEMA_V1, HorizonSnapshotJsonContractV1};
pub use options::HorizonOptions;
pub use snapshot::{BandSnapshot, HorizonSnapshot, PointSnapshot};
