use std::io::Cursor;

use crate::assets::unpremultiply_rgba8_in_place;
use crate::error::{TextcardError, TextcardResult};
use crate::surface::Surface;

/// Maximum output dimension in physical pixels (longer side), for downstream
/// platform compatibility.
pub const MAX_EXPORT_DIM: u32 = 900;

/// Encode the surface as a lossless PNG, downscaling uniformly when either
/// dimension exceeds [`MAX_EXPORT_DIM`].
///
/// Fails with [`TextcardError::DegenerateSurface`] on a zero-area surface
/// (the caller should re-render first) and with [`TextcardError::Encode`]
/// when the encoder yields no data. Downscaling is a resample, never a crop.
pub fn encode_png(surface: &Surface) -> TextcardResult<Vec<u8>> {
    let (width, height) = (surface.width(), surface.height());
    if width == 0 || height == 0 {
        return Err(TextcardError::degenerate_surface(format!(
            "cannot export a {width}x{height} surface"
        )));
    }

    // PNG is straight-alpha; the surface stores premultiplied pixels.
    let mut rgba = surface.data().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);

    let img = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| TextcardError::encode("surface byte length mismatch"))?;

    let img = match export_dimensions(width, height) {
        Some((tw, th)) => image::imageops::resize(&img, tw, th, image::imageops::FilterType::Triangle),
        None => img,
    };

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| TextcardError::encode(format!("png encode: {e}")))?;
    if buf.is_empty() {
        return Err(TextcardError::encode("png encoder produced no data"));
    }
    Ok(buf)
}

/// Downscaled output size, or `None` when the surface already fits.
///
/// Uniform ratio `min(max/w, max/h)` so the longer side lands exactly on
/// [`MAX_EXPORT_DIM`].
fn export_dimensions(width: u32, height: u32) -> Option<(u32, u32)> {
    if width <= MAX_EXPORT_DIM && height <= MAX_EXPORT_DIM {
        return None;
    }
    let ratio = f64::min(
        f64::from(MAX_EXPORT_DIM) / f64::from(width),
        f64::from(MAX_EXPORT_DIM) / f64::from(height),
    );
    let tw = (f64::from(width) * ratio).round().max(1.0) as u32;
    let th = (f64::from(height) * ratio).round().max(1.0) as u32;
    Some((tw, th))
}
