use std::sync::Arc;

use crate::interaction::HoverData;

/// Called with the newly hovered point, or `None` when hover is lost.
pub type HoverCallbackFn<S> = Arc<dyn Fn(Option<&HoverData<S>>) + Send + Sync + 'static>;

/// Called on click with the currently hovered point, if any.
pub type ClickCallbackFn<S> = Arc<dyn Fn(Option<&HoverData<S>>) + Send + Sync + 'static>;

/// Produces tooltip markup for a hovered point.
pub type TooltipContentFn<S> = Arc<dyn Fn(&HoverData<S>) -> String + Send + Sync + 'static>;

/// `<b>x</b>: y`
#[must_use]
pub fn default_tooltip_content<S>() -> TooltipContentFn<S> {
    Arc::new(|data: &HoverData<S>| format!("<b>{}</b>: {}", data.x, data.y))
}
