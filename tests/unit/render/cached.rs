use super::*;
use crate::{
    foundation::core::{Density, Rgba8},
    style::source::CardStyle,
};

fn style() -> Rc<CardStyle> {
    Rc::new(CardStyle::new(
        Rgba8::opaque(0, 0, 255),
        Rgba8::opaque(255, 0, 0),
        Density::IDENTITY,
    ))
}

#[test]
fn empty_bounds_on_empty_cache_is_noop() {
    let mut c = CachedFrameSurface::new(style());
    assert!(c.render(0, 10).unwrap().is_none());
    assert!(c.render(10, -1).unwrap().is_none());
    assert_eq!(c.state(), SurfaceState::Empty);
    assert_eq!(c.stats(), SurfaceStats::default());
}

#[test]
fn first_positive_render_allocates_and_paints() {
    let mut c = CachedFrameSurface::new(style());
    let s = c.render(12, 8).unwrap().unwrap();
    assert_eq!(s.size(), (12, 8));
    assert_eq!(c.state(), SurfaceState::Ready);

    let st = c.stats();
    assert_eq!(st.allocations, 1);
    assert_eq!(st.repaints, 1);
}

#[test]
fn invalidate_on_empty_is_deferred() {
    let src = style();
    let mut c = CachedFrameSurface::new(src.clone());
    assert!(!c.invalidate_style());
    assert!(!c.take_redraw_request());

    src.set_fill_color(Rgba8::opaque(0, 255, 0));
    let s = c.render(20, 20).unwrap().unwrap();
    assert_eq!(s.pixel(10, 10).unwrap(), Rgba8::opaque(0, 255, 0).to_premul());
    assert_eq!(c.stats().repaints, 1);
}

#[test]
fn invalidate_requests_redraw_once() {
    let mut c = CachedFrameSurface::new(style());
    c.render(10, 10).unwrap();
    assert!(!c.take_redraw_request());

    assert!(c.invalidate_style());
    assert!(c.take_redraw_request());
    assert!(!c.take_redraw_request());
}

#[test]
fn other_property_changes_are_ignored() {
    let mut c = CachedFrameSurface::new(style());
    c.render(10, 10).unwrap();
    assert!(!c.on_property_changed(PropertyChange::Other));
    assert!(c.on_property_changed(PropertyChange::StrokeColorChanged));
    assert_eq!(c.stats().repaints, 2);
}

#[test]
fn pump_coalesces_queued_changes_into_one_repaint() {
    let src = style();
    let mut c = CachedFrameSurface::new(src.clone());
    c.render(10, 10).unwrap();

    src.set_fill_color(Rgba8::opaque(1, 1, 1));
    src.set_stroke_color(Rgba8::opaque(2, 2, 2));
    src.notify(PropertyChange::Other);

    assert!(c.pump_style_events());
    assert!(!c.pump_style_events());
    assert_eq!(c.stats().repaints, 2);
    assert_eq!(c.stats().allocations, 1);
}

#[test]
fn render_applies_pending_changes_before_reuse() {
    let src = style();
    let mut c = CachedFrameSurface::new(src.clone());
    c.render(10, 10).unwrap();

    src.set_fill_color(Rgba8::opaque(0, 255, 0));
    let s = c.render(10, 10).unwrap().unwrap();
    assert_eq!(s.pixel(5, 5).unwrap(), Rgba8::opaque(0, 255, 0).to_premul());

    let st = c.stats();
    assert_eq!(st.allocations, 1);
    assert_eq!(st.repaints, 2);
}

#[test]
fn only_other_changes_keep_cache_hit() {
    let src = style();
    let mut c = CachedFrameSurface::new(src.clone());
    c.render(10, 10).unwrap();
    src.notify(PropertyChange::Other);
    c.render(10, 10).unwrap();
    assert_eq!(c.stats().repaints, 1);
}

#[test]
fn allocation_failure_leaves_cache_empty() {
    let limits = SurfaceLimits {
        max_side: 64,
        max_bytes: usize::MAX,
    };
    let mut c = CachedFrameSurface::with_limits(style(), limits);
    c.render(32, 32).unwrap();

    let err = c.render(65, 10).unwrap_err();
    assert!(matches!(err, CardError::Allocation { width: 65, height: 10, .. }));
    assert_eq!(c.state(), SurfaceState::Empty);
    assert!(c.surface().is_none());
    assert_eq!(c.stats().live, 0);

    // The host retries naturally on the next draw cycle.
    assert!(c.render(32, 32).unwrap().is_some());
    assert_eq!(c.state(), SurfaceState::Ready);
}

#[test]
fn teardown_unsubscribes_and_releases() {
    let src = style();
    let mut c = CachedFrameSurface::new(src.clone());
    assert_eq!(src.subscriber_count(), 1);
    c.render(10, 10).unwrap();

    c.teardown();
    assert_eq!(c.state(), SurfaceState::TornDown);
    assert_eq!(src.subscriber_count(), 0);
    assert!(c.surface().is_none());
    assert!(!c.invalidate_style());
    assert!(matches!(c.render(10, 10), Err(CardError::TornDown)));

    c.teardown();
    assert_eq!(c.stats().releases, 1);
}

#[test]
fn drop_tears_down() {
    let src = style();
    {
        let mut c = CachedFrameSurface::new(src.clone());
        c.render(4, 4).unwrap();
    }
    assert_eq!(src.subscriber_count(), 0);
}

#[test]
fn reports_translucent_and_stateless() {
    let c = CachedFrameSurface::new(style());
    assert!(!c.is_opaque());
    assert!(!c.is_stateful());
    assert_eq!(c.limits(), SurfaceLimits::default());
}

#[test]
fn direct_callback_consumes_queued_change() {
    let src = style();
    let mut c = CachedFrameSurface::new(src.clone());
    c.render(10, 10).unwrap();

    src.set_fill_color(Rgba8::opaque(0, 255, 0));
    assert!(c.on_property_changed(PropertyChange::FillColorChanged));
    assert_eq!(c.stats().repaints, 2);

    c.render(10, 10).unwrap();
    assert_eq!(c.stats().repaints, 2);
    assert!(!c.pump_style_events());
}

#[test]
fn render_repaint_does_not_request_redraw() {
    let src = style();
    let mut c = CachedFrameSurface::new(src.clone());
    c.render(10, 10).unwrap();

    src.set_stroke_color(Rgba8::opaque(0, 255, 0));
    c.render(10, 10).unwrap();
    assert_eq!(c.stats().repaints, 2);
    assert!(!c.take_redraw_request());
}
