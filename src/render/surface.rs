use vello_cpu::peniko::color::PremulRgba8;

use crate::foundation::{
    core::Rgba8Premul,
    error::{CardError, CardResult},
};

/// Upper bounds applied before a surface is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceLimits {
    /// Maximum width or height in pixels. Values above `u16::MAX` are never allocatable.
    pub max_side: u32,
    /// Maximum size of one surface in bytes.
    pub max_bytes: usize,
}

impl Default for SurfaceLimits {
    fn default() -> Self {
        Self {
            max_side: 16_384,
            max_bytes: 256 * 1024 * 1024,
        }
    }
}

/// Owned premultiplied RGBA8 pixel buffer with fixed dimensions.
pub struct Surface {
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Surface {
    /// Allocate a transparent surface under the default [`SurfaceLimits`].
    pub fn new(width: u32, height: u32) -> CardResult<Self> {
        Self::allocate(width, height, &SurfaceLimits::default())
    }

    /// Allocate a transparent surface. Both dimensions must be non-zero.
    pub fn allocate(width: u32, height: u32, limits: &SurfaceLimits) -> CardResult<Self> {
        if width == 0 || height == 0 {
            return Err(CardError::allocation(width, height, "zero-area surface"));
        }
        if width > limits.max_side || height > limits.max_side {
            return Err(CardError::allocation(
                width,
                height,
                format!("side exceeds limit of {} px", limits.max_side),
            ));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| CardError::allocation(width, height, "width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| CardError::allocation(width, height, "height exceeds u16"))?;

        let len = usize::from(w) * usize::from(h);
        let bytes = len.saturating_mul(4);
        if bytes > limits.max_bytes {
            return Err(CardError::allocation(
                width,
                height,
                format!("{bytes} bytes exceeds limit of {}", limits.max_bytes),
            ));
        }

        let mut pixels = Vec::<PremulRgba8>::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|e| CardError::allocation(width, height, e.to_string()))?;
        pixels.resize(len, PremulRgba8::from_u8_array([0, 0, 0, 0]));

        Ok(Self {
            pixmap: vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.pixmap.width())
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.pixmap.height())
    }

    /// `(width, height)` in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Premultiplied pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let i = ((y as usize) * (self.width() as usize) + (x as usize)) * 4;
        let px = &self.data()[i..i + 4];
        Some(Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }

    /// Copy out as a straight-alpha image for encoding or host blitting.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut bytes = self.data().to_vec();
        for px in bytes.chunks_exact_mut(4) {
            let c = Rgba8Premul {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
            .to_straight();
            px.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        image::RgbaImage::from_raw(self.width(), self.height(), bytes)
            .unwrap_or_else(|| image::RgbaImage::new(self.width(), self.height()))
    }

    /// Reset every pixel to transparent black.
    pub(crate) fn clear(&mut self) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        &mut self.pixmap
    }
}

/// Allocation counters for a [`SurfaceSlot`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SurfaceStats {
    /// Surfaces allocated over the slot's lifetime.
    pub allocations: u64,
    /// Surfaces released over the slot's lifetime.
    pub releases: u64,
    /// Full repaints of the surface contents.
    pub repaints: u64,
    /// Surfaces currently alive (0 or 1).
    pub live: usize,
    /// Highest number of simultaneously live surfaces observed.
    pub peak_live: usize,
}

/// Single-slot owner of at most one [`Surface`].
///
/// Replacing releases the previous surface before the new one is allocated, so two
/// buffers are never alive at once. Releasing an empty slot is a no-op.
#[derive(Debug, Default)]
pub(crate) struct SurfaceSlot {
    current: Option<Surface>,
    stats: SurfaceStats,
}

impl SurfaceSlot {
    pub(crate) fn get(&self) -> Option<&Surface> {
        self.current.as_ref()
    }

    pub(crate) fn get_mut(&mut self) -> Option<&mut Surface> {
        self.current.as_mut()
    }

    pub(crate) fn size(&self) -> Option<(u32, u32)> {
        self.current.as_ref().map(Surface::size)
    }

    pub(crate) fn stats(&self) -> SurfaceStats {
        self.stats.clone()
    }

    pub(crate) fn note_repaint(&mut self) {
        self.stats.repaints = self.stats.repaints.saturating_add(1);
    }

    /// Drop the current surface. Returns `false` when the slot was already empty.
    pub(crate) fn release(&mut self) -> bool {
        let Some(old) = self.current.take() else {
            return false;
        };
        drop(old);
        self.stats.releases = self.stats.releases.saturating_add(1);
        self.stats.live = self.stats.live.saturating_sub(1);
        true
    }

    /// Release the current surface (if any), then allocate a fresh one.
    ///
    /// On allocation failure the slot is left empty.
    pub(crate) fn replace(
        &mut self,
        width: u32,
        height: u32,
        limits: &SurfaceLimits,
    ) -> CardResult<&mut Surface> {
        self.release();
        let surface = Surface::allocate(width, height, limits)?;
        self.stats.allocations = self.stats.allocations.saturating_add(1);
        self.stats.live = self.stats.live.saturating_add(1);
        self.stats.peak_live = self.stats.peak_live.max(self.stats.live);
        Ok(self.current.insert(surface))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
