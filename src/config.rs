use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::color::Rgba8;

/// Horizontal anchoring of painted lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Anchor line starts at the left padding edge.
    #[default]
    Left,
    /// Center each line on the surface midline.
    Center,
    /// Anchor line ends at the right padding edge.
    Right,
}

/// Immutable per-render styling and content configuration.
///
/// Sizes are in logical pixels; all layout math happens in physical pixels
/// (logical × [`scale_factor`](Self::scale_factor)). The external preferences
/// layer persists this as JSON; the renderer only consumes the value.
///
/// When [`bg_image`](Self::bg_image) is set it takes priority over
/// [`use_bg`](Self::use_bg); exactly one background path executes per render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Raw content; may contain `\n`.
    pub text: String,
    /// Substituted when `text` is empty or whitespace-only.
    pub placeholder: String,
    /// Font size in logical pixels.
    pub font_size: f64,
    /// Outline width in logical pixels; `0` disables the stroke pass.
    pub stroke_width: f64,
    /// Preferred font family name; a generic sans-serif chain is appended.
    pub font_family: String,
    /// Numeric font weight (variable-font axis value).
    pub font_weight: f32,
    /// Glyph fill color.
    pub text_color: Rgba8,
    /// Glyph outline color.
    pub stroke_color: Rgba8,
    /// Horizontal line anchoring.
    pub text_align: TextAlign,
    /// Paint a flat background color when no background image is set.
    pub use_bg: bool,
    /// Flat background color.
    pub bg_color: Rgba8,
    /// Flat background opacity in `[0, 1]`.
    pub bg_alpha: f64,
    /// Encoded background image bytes (PNG/JPEG/...), typically decoded from
    /// a data URI by the host. Not persisted with the rest of the config.
    #[serde(skip)]
    pub bg_image: Option<Arc<Vec<u8>>>,
    /// Strength of the white glass overlay composited atop a background
    /// image, in `[0, 1]`.
    pub bg_opacity: f64,
    /// Logical canvas width before scaling.
    pub base_width: f64,
    /// Device/export scale multiplier.
    pub scale_factor: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            placeholder: "Type your text here...".to_owned(),
            font_size: 60.0,
            stroke_width: 8.0,
            font_family: "Arial".to_owned(),
            font_weight: 800.0,
            text_color: Rgba8::WHITE,
            stroke_color: Rgba8::BLACK,
            text_align: TextAlign::Left,
            use_bg: false,
            bg_color: Rgba8::BLACK,
            bg_alpha: 1.0,
            bg_image: None,
            bg_opacity: 0.5,
            base_width: 1200.0,
            scale_factor: 2.0,
        }
    }
}

impl RenderConfig {
    /// Content to lay out: the placeholder when `text` trims to empty.
    pub fn resolved_text(&self) -> &str {
        if self.text.trim().is_empty() {
            &self.placeholder
        } else {
            &self.text
        }
    }
}
