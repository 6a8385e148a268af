use std::rc::Rc;

use crate::{
    foundation::error::{CardError, CardResult},
    render::{
        painter::ShapePainter,
        surface::{Surface, SurfaceLimits, SurfaceSlot, SurfaceStats},
    },
    style::source::{PropertyChange, StyleSource, Subscription},
};

/// Lifecycle state of a [`CachedFrameSurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceState {
    /// No surface is allocated.
    Empty,
    /// A painted surface matching the last positive bounds is cached.
    Ready,
    /// The owner was torn down; the surface is released and notifications are detached.
    TornDown,
}

/// Off-screen cache for the card frame visual.
///
/// Owns at most one [`Surface`] sized to the last positive draw bounds. The surface is
/// reallocated only when the bounds change and repainted in place when a tracked style
/// property changes. All methods must be called from the thread that owns the visual.
pub struct CachedFrameSurface {
    source: Rc<dyn StyleSource>,
    subscription: Option<Subscription>,
    slot: SurfaceSlot,
    limits: SurfaceLimits,
    redraw_requested: bool,
    torn_down: bool,
}

impl std::fmt::Debug for CachedFrameSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedFrameSurface")
            .field("state", &self.state())
            .field("size", &self.slot.size())
            .field("redraw_requested", &self.redraw_requested)
            .finish()
    }
}

impl CachedFrameSurface {
    /// Bind to `source` with default [`SurfaceLimits`], subscribing to its change notifications.
    pub fn new(source: Rc<dyn StyleSource>) -> Self {
        Self::with_limits(source, SurfaceLimits::default())
    }

    /// Bind to `source` with explicit allocation limits.
    pub fn with_limits(source: Rc<dyn StyleSource>, limits: SurfaceLimits) -> Self {
        let subscription = source.subscribe();
        Self {
            source,
            subscription: Some(subscription),
            slot: SurfaceSlot::default(),
            limits,
            redraw_requested: false,
            torn_down: false,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SurfaceState {
        if self.torn_down {
            SurfaceState::TornDown
        } else if self.slot.get().is_some() {
            SurfaceState::Ready
        } else {
            SurfaceState::Empty
        }
    }

    /// Cached surface, if any, without touching it.
    pub fn surface(&self) -> Option<&Surface> {
        self.slot.get()
    }

    /// Allocation and repaint counters.
    pub fn stats(&self) -> SurfaceStats {
        self.slot.stats()
    }

    /// Limits applied to every allocation.
    pub fn limits(&self) -> SurfaceLimits {
        self.limits
    }

    /// The rounded corners leave transparent pixels, so the visual is never opaque.
    pub fn is_opaque(&self) -> bool {
        false
    }

    /// The card has no pressed/focused variants.
    pub fn is_stateful(&self) -> bool {
        false
    }

    /// Produce the surface to blit at the origin for the given device-pixel bounds.
    ///
    /// Returns `Ok(None)` when there is nothing to draw (non-positive bounds). Unchanged
    /// bounds reuse the cached pixels without repainting, unless a queued style change
    /// is pending. A repaint done here does not raise the redraw request, since the caller
    /// is already drawing. On allocation failure the cache is left empty and the error
    /// returned.
    #[tracing::instrument(skip(self))]
    pub fn render(&mut self, width: i32, height: i32) -> CardResult<Option<&Surface>> {
        if self.torn_down {
            return Err(CardError::TornDown);
        }

        let style_dirty = self.drain_style_events();

        if width <= 0 || height <= 0 {
            if self.slot.release() {
                tracing::debug!("released surface for empty bounds");
            }
            return Ok(None);
        }
        let (w, h) = (width.unsigned_abs(), height.unsigned_abs());

        if self.slot.size() == Some((w, h)) {
            if style_dirty {
                self.repaint_in_place();
            } else {
                tracing::trace!("reusing cached surface");
            }
            return Ok(self.slot.get());
        }

        let style = self.source.frame_style();
        let surface = match self.slot.replace(w, h, &self.limits) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "surface allocation failed");
                return Err(e);
            }
        };
        ShapePainter::paint(surface, w, h, &style);
        self.slot.note_repaint();
        tracing::debug!(w, h, "allocated and painted surface");

        Ok(self.slot.get())
    }

    /// Repaint the existing surface with the current style, keeping its size.
    ///
    /// No-op (returns `false`) when nothing is cached yet or after teardown; the next
    /// successful [`render`](Self::render) paints with the latest style anyway.
    #[tracing::instrument(skip(self))]
    pub fn invalidate_style(&mut self) -> bool {
        if self.torn_down || self.slot.get().is_none() {
            return false;
        }
        // Queued notifications are satisfied by this repaint.
        self.drain_style_events();
        self.repaint_in_place();
        self.redraw_requested = true;
        true
    }

    /// Direct notification callback from the style source.
    pub fn on_property_changed(&mut self, change: PropertyChange) -> bool {
        if !change.affects_frame() {
            tracing::debug!(?change, "ignoring property change");
            return false;
        }
        self.invalidate_style()
    }

    /// Drain queued notifications, repainting at most once if any tracked property changed.
    pub fn pump_style_events(&mut self) -> bool {
        if self.drain_style_events() {
            self.invalidate_style()
        } else {
            false
        }
    }

    /// Return and clear the pending "needs re-display" signal.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Detach from the style source and release the surface. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        if let Some(sub) = self.subscription.take() {
            self.source.unsubscribe(sub.id());
        }
        self.slot.release();
        self.redraw_requested = false;
        self.torn_down = true;
        tracing::debug!("torn down");
    }

    fn drain_style_events(&self) -> bool {
        let Some(sub) = self.subscription.as_ref() else {
            return false;
        };
        sub.drain()
            .fold(false, |dirty, change| dirty | change.affects_frame())
    }

    fn repaint_in_place(&mut self) {
        let style = self.source.frame_style();
        let Some(surface) = self.slot.get_mut() else {
            return;
        };
        let (w, h) = surface.size();
        surface.clear();
        ShapePainter::paint(surface, w, h, &style);
        self.slot.note_repaint();
        tracing::debug!(w, h, "repainted surface in place");
    }
}

impl Drop for CachedFrameSurface {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cached.rs"]
mod tests;
