use std::{
    cell::{Cell, RefCell},
    sync::mpsc,
};

use crate::foundation::core::{CORNER_RADIUS_DP, Density, Rgba8};

/// Immutable style snapshot read at each repaint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStyle {
    /// Background fill color (straight alpha).
    pub fill: Rgba8,
    /// Outline color (straight alpha).
    pub stroke: Rgba8,
    /// Corner radius in device pixels.
    pub corner_radius_px: f32,
}

/// Identifies which tracked property of a style source changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyChange {
    /// The background fill color changed.
    FillColorChanged,
    /// The outline color changed.
    StrokeColorChanged,
    /// Any property the card frame does not depend on.
    Other,
}

impl PropertyChange {
    /// Return `true` when the change affects painted pixels.
    pub fn affects_frame(self) -> bool {
        matches!(self, Self::FillColorChanged | Self::StrokeColorChanged)
    }
}

/// Handle identifying one subscriber of a [`StyleSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Receiving end of a style change subscription.
///
/// Notifications are queued by the source and drained on the owning thread.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    rx: mpsc::Receiver<PropertyChange>,
}

impl Subscription {
    /// Pair a receiver with the id the source registered it under.
    pub fn new(id: SubscriptionId, rx: mpsc::Receiver<PropertyChange>) -> Self {
        Self { id, rx }
    }

    /// Identifier to pass back to [`StyleSource::unsubscribe`].
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Drain every queued notification without blocking.
    pub fn drain(&self) -> impl Iterator<Item = PropertyChange> + '_ {
        self.rx.try_iter()
    }
}

/// External collaborator that owns the frame's style properties.
pub trait StyleSource {
    /// Current style snapshot, with the corner radius already in device pixels.
    fn frame_style(&self) -> FrameStyle;

    /// Register for change notifications.
    fn subscribe(&self) -> Subscription;

    /// Stop delivering notifications to `id`. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Single-threaded style source holding fill/outline colors and a display density.
///
/// Setters broadcast a [`PropertyChange`] to every live subscriber; subscribers whose
/// receiver was dropped are pruned on the next broadcast.
#[derive(Debug)]
pub struct CardStyle {
    fill: Cell<Rgba8>,
    stroke: Cell<Rgba8>,
    density: Density,
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(SubscriptionId, mpsc::Sender<PropertyChange>)>>,
}

impl CardStyle {
    /// Create a style source with the fixed corner radius policy.
    pub fn new(fill: Rgba8, stroke: Rgba8, density: Density) -> Self {
        Self {
            fill: Cell::new(fill),
            stroke: Cell::new(stroke),
            density,
            next_id: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Current background fill color.
    pub fn fill_color(&self) -> Rgba8 {
        self.fill.get()
    }

    /// Current outline color.
    pub fn stroke_color(&self) -> Rgba8 {
        self.stroke.get()
    }

    /// Display density used for the corner radius.
    pub fn density(&self) -> Density {
        self.density
    }

    /// Update the fill color, notifying subscribers when it actually changes.
    pub fn set_fill_color(&self, color: Rgba8) {
        if self.fill.replace(color) != color {
            self.notify(PropertyChange::FillColorChanged);
        }
    }

    /// Update the outline color, notifying subscribers when it actually changes.
    pub fn set_stroke_color(&self, color: Rgba8) {
        if self.stroke.replace(color) != color {
            self.notify(PropertyChange::StrokeColorChanged);
        }
    }

    /// Broadcast an arbitrary property change.
    pub fn notify(&self, change: PropertyChange) {
        self.subscribers
            .borrow_mut()
            .retain(|(_, tx)| tx.send(change).is_ok());
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl StyleSource for CardStyle {
    fn frame_style(&self) -> FrameStyle {
        FrameStyle {
            fill: self.fill.get(),
            stroke: self.stroke.get(),
            corner_radius_px: self.density.to_pixels(CORNER_RADIUS_DP),
        }
    }

    fn subscribe(&self) -> Subscription {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let (tx, rx) = mpsc::channel();
        self.subscribers.borrow_mut().push((id, tx));
        Subscription::new(id, rx)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/source.rs"]
mod tests;
