use crate::error::{TextcardError, TextcardResult};

/// Mutable raster target owned by the renderer.
///
/// Pixels are premultiplied RGBA8, row-major. Resizing always clears prior
/// content, matching canvas semantics; the surface starts zero-sized until
/// the first render.
pub struct Surface {
    pixmap: vello_cpu::Pixmap,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    /// Create an empty (zero-area) surface.
    pub fn new() -> Self {
        Self {
            pixmap: vello_cpu::Pixmap::new(0, 0),
        }
    }

    /// Width in physical pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.pixmap.width())
    }

    /// Height in physical pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.pixmap.height())
    }

    /// Resize to `width`×`height`, clearing all content.
    pub fn resize(&mut self, width: u32, height: u32) -> TextcardResult<()> {
        let w: u16 = width.try_into().map_err(|_| {
            TextcardError::missing_surface(format!("surface width {width} exceeds u16"))
        })?;
        let h: u16 = height.try_into().map_err(|_| {
            TextcardError::missing_surface(format!("surface height {height} exceeds u16"))
        })?;
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        Ok(())
    }

    /// Borrow the pixel bytes (premultiplied RGBA8, row-major).
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        &mut self.pixmap
    }
}
