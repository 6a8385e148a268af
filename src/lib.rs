//! cardframe renders a rounded-rectangle "card" frame into a cached off-screen surface.
//!
//! The visual is a filled rounded rectangle with a one-pixel outline of the same path on
//! top. Pixels live in a single owned [`Surface`] that is reused across draw cycles:
//!
//! - [`CachedFrameSurface::render`] reallocates only when the draw bounds change and
//!   returns `None` for non-positive bounds.
//! - [`CachedFrameSurface::invalidate_style`] repaints in place when the fill or outline
//!   color of the bound [`StyleSource`] changes, then flags a redraw.
//! - [`ShapePainter`] is the stateless rasterization step, backed by `vello_cpu`.
//!
//! Surfaces store **premultiplied RGBA8**; [`Surface::to_rgba_image`] converts to straight
//! alpha for encoding.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod render;
mod style;

pub use crate::foundation::core::{CORNER_RADIUS_DP, Density, Rgba8, Rgba8Premul};
pub use crate::foundation::error::{CardError, CardResult};

pub use crate::render::cached::{CachedFrameSurface, SurfaceState};
pub use crate::render::painter::{
    STROKE_WIDTH_PX, ShapePainter, clamp_corner_radius, rounded_rect_path,
};
pub use crate::render::surface::{Surface, SurfaceLimits, SurfaceStats};
pub use crate::style::color::ColorDef;
pub use crate::style::config::CardStyleConfig;
pub use crate::style::source::{
    CardStyle, FrameStyle, PropertyChange, StyleSource, Subscription, SubscriptionId,
};
