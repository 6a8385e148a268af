use kurbo::{BezPath, Rect, RoundedRect, Shape as _};

use crate::{foundation::core::Rgba8, render::surface::Surface, style::source::FrameStyle};

/// Outline width in device pixels.
pub const STROKE_WIDTH_PX: f64 = 1.0;

/// Flattening tolerance for the corner arcs.
const PATH_TOLERANCE: f64 = 0.1;

/// Stateless painter for the card shape: a filled rounded rectangle with a stroked
/// outline of the same path on top.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapePainter;

impl ShapePainter {
    /// Paint the card over the full `width x height` region of `surface`.
    ///
    /// `width` and `height` must be positive and match the surface; callers check this.
    /// The corner radius is clamped to `[0, min(width, height) / 2]`.
    pub fn paint(surface: &mut Surface, width: u32, height: u32, style: &FrameStyle) {
        debug_assert_eq!(surface.size(), (width, height));

        let rect = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
        let radius = clamp_corner_radius(style.corner_radius_px, width, height);
        let path = path_to_cpu(&rounded_rect_path(rect, radius));

        let pixmap = surface.pixmap_mut();
        let mut ctx = vello_cpu::RenderContext::new(pixmap.width(), pixmap.height());

        ctx.set_paint(color_to_cpu(style.fill));
        ctx.fill_path(&path);

        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(STROKE_WIDTH_PX));
        ctx.set_paint(color_to_cpu(style.stroke));
        ctx.stroke_path(&path);

        ctx.flush();
        ctx.render_to_pixmap(pixmap);
    }
}

/// Clamp a corner radius so opposite arcs never overlap.
pub fn clamp_corner_radius(radius_px: f32, width: u32, height: u32) -> f64 {
    let max = f64::from(width.min(height)) / 2.0;
    let r = f64::from(radius_px);
    if r.is_nan() {
        return 0.0;
    }
    r.clamp(0.0, max)
}

/// Rounded rectangle outline for `rect`, wound clockwise in y-down space.
///
/// A zero radius yields a plain rectangle.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    RoundedRect::from_rect(rect, radius).to_path(PATH_TOLERANCE)
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn path_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        out.push(el);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
