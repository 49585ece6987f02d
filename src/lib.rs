//! Textcard renders styled, line-wrapped text into shareable PNG images.
//!
//! The pipeline is deliberately small:
//!
//! - the layout engine wraps arbitrary Unicode text per character against a
//!   measured width limit ([`layout`]),
//! - the compositor paints a background (transparent, flat color, or
//!   cover-fit image with a frosted-glass overlay) and then each line as a
//!   stroke pass under a fill pass,
//! - the exporter encodes the surface as PNG, downscaling so the longer side
//!   never exceeds [`export::MAX_EXPORT_DIM`].
//!
//! A [`Renderer`] owns the raster surface and re-renders it in place from an
//! explicit [`RenderConfig`] value each call; rendering twice with the same
//! config produces bit-identical surfaces.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Background image decoding into premultiplied RGBA8.
pub mod assets;
/// Straight-alpha RGBA colors and tolerant hex parsing.
pub mod color;
/// Per-render configuration values.
pub mod config;
/// Error taxonomy and result alias.
pub mod error;
/// PNG export with maximum-dimension downscaling.
pub mod export;
/// Measurement-driven per-character line wrapping.
pub mod layout;

mod compositor;
mod renderer;
mod surface;
mod text_engine;

pub use crate::assets::{DecodedImage, decode_image};
pub use crate::color::Rgba8;
pub use crate::config::{RenderConfig, TextAlign};
pub use crate::error::{TextcardError, TextcardResult};
pub use crate::export::{MAX_EXPORT_DIM, encode_png};
pub use crate::layout::{LineBreakResult, MAX_SURFACE_HEIGHT, TextMeasurer};
pub use crate::renderer::{PendingRender, Renderer};
pub use crate::surface::Surface;
pub use crate::text_engine::{FontSpec, TextEngine};
