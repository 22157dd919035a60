use crate::assets::decode::PreparedFrame;
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{ScrubError, ScrubResult};
use crate::render::fit::Placement;

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// The canvas a sequence paints onto.
///
/// Holds only what is currently shown; there is no history.
pub trait Surface {
    /// Current pixel size.
    fn size(&self) -> SurfaceSize;
    /// Change the pixel size. Contents after a resize are unspecified until the next clear.
    fn resize(&mut self, size: SurfaceSize);
    /// Reset every pixel to the surface's clear color.
    fn clear(&mut self);
    /// Paint `frame` into `placement.dest`.
    fn draw_frame(&mut self, frame: &PreparedFrame, placement: &Placement) -> ScrubResult<()>;
}

/// A read-back of surface pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy suitable for image encoders.
    pub fn into_straight(mut self) -> Self {
        if self.premultiplied {
            for px in self.data.chunks_exact_mut(4) {
                let a = u32::from(px[3]);
                if a == 0 || a == 255 {
                    continue;
                }
                for c in &mut px[..3] {
                    *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
                }
            }
            self.premultiplied = false;
        }
        self
    }
}

#[derive(Clone)]
struct ImageLayer {
    paint: vello_cpu::Image,
    transform: vello_cpu::kurbo::Affine,
    width: f64,
    height: f64,
}

/// Software raster surface backed by a `vello_cpu` pixmap (premultiplied RGBA8).
///
/// The canvas is rebuilt from its clear color plus the frames drawn since the last clear, so
/// every read reflects exactly what a browser canvas would show.
pub struct CpuSurface {
    size: SurfaceSize,
    clear_rgba: [u8; 4],
    pixmap: Option<vello_cpu::Pixmap>,
    layers: Vec<ImageLayer>,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("size", &self.size)
            .field("clear_rgba", &self.clear_rgba)
            .field("layers", &self.layers.len())
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Surface of `size`, cleared to straight-alpha `clear_rgba`.
    pub fn new(size: SurfaceSize, clear_rgba: [u8; 4]) -> Self {
        let mut s = Self {
            size,
            clear_rgba,
            pixmap: None,
            layers: Vec::new(),
        };
        s.resize(size);
        s
    }

    /// Raw premultiplied bytes. Empty when the surface has no backing pixmap.
    pub fn pixels(&self) -> &[u8] {
        self.pixmap
            .as_ref()
            .map(|p| p.data_as_u8_slice())
            .unwrap_or_default()
    }

    /// Premultiplied pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        let px = self.pixels().get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy the pixels out.
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.size.width,
            height: self.size.height,
            data: self.pixels().to_vec(),
            premultiplied: true,
        }
    }

    fn rasterize(&mut self) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let (w, h) = (pixmap.width(), pixmap.height());
        pixmap.data_as_u8_slice_mut().fill(0);

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        let [r, g, b, a] = self.clear_rgba;
        if a != 0 {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(w),
                f64::from(h),
            ));
        }
        for layer in &self.layers {
            ctx.set_transform(layer.transform);
            ctx.set_paint(layer.paint.clone());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                layer.width,
                layer.height,
            ));
        }
        ctx.flush();
        ctx.render_to_pixmap(pixmap);
    }
}

fn pixmap_for(size: SurfaceSize) -> Option<vello_cpu::Pixmap> {
    if size.is_empty() {
        return None;
    }
    let w = u16::try_from(size.width).ok()?;
    let h = u16::try_from(size.height).ok()?;
    Some(vello_cpu::Pixmap::new(w, h))
}

impl Surface for CpuSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        // Resizing a canvas resets its contents.
        self.pixmap = pixmap_for(size);
        if self.pixmap.is_none() && !size.is_empty() {
            tracing::warn!(
                width = size.width,
                height = size.height,
                "surface exceeds the raster limit; drawing disabled"
            );
        }
        self.clear();
    }

    fn clear(&mut self) {
        self.layers.clear();
        self.rasterize();
    }

    fn draw_frame(&mut self, frame: &PreparedFrame, placement: &Placement) -> ScrubResult<()> {
        if self.pixmap.is_none() {
            if self.size.is_empty() {
                return Ok(());
            }
            return Err(ScrubError::render(format!(
                "cannot draw onto a {}x{} surface; each side is limited to {}",
                self.size.width,
                self.size.height,
                u16::MAX
            )));
        }
        if placement.ratio <= 0.0 || placement.dest.area() <= 0.0 {
            return Ok(());
        }
        let transform = vello_cpu::kurbo::Affine::translate((placement.dx(), placement.dy()))
            * vello_cpu::kurbo::Affine::scale(placement.ratio);
        self.layers.push(ImageLayer {
            paint: frame.paint(),
            transform,
            width: f64::from(frame.width),
            height: f64::from(frame.height),
        });
        self.rasterize();
        Ok(())
    }
}

/// Operation captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// Surface resized.
    Resize(SurfaceSize),
    /// Surface cleared at the given size.
    Clear(SurfaceSize),
    /// Frame drawn.
    Draw {
        /// Surface size at draw time.
        surface: SurfaceSize,
        /// Intrinsic size of the drawn frame.
        frame: (u32, u32),
        /// Where it was drawn.
        placement: Placement,
    },
}

/// Surface that records calls instead of rasterizing. For tests and debugging.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    size: SurfaceSize,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    /// Recording surface starting at `size`.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    /// Captured operations in call order.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Only the draw operations.
    pub fn draws(&self) -> impl Iterator<Item = &SurfaceOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Draw { .. }))
    }

    /// Forget captured operations.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.ops.push(SurfaceOp::Resize(size));
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear(self.size));
    }

    fn draw_frame(&mut self, frame: &PreparedFrame, placement: &Placement) -> ScrubResult<()> {
        self.ops.push(SurfaceOp::Draw {
            surface: self.size,
            frame: (frame.width, frame.height),
            placement: *placement,
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
