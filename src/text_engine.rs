use std::borrow::Cow;

use crate::error::{TextcardError, TextcardResult};
use crate::layout::TextMeasurer;

/// Resolved font styling for one render, in physical pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// Preferred family name.
    pub family: String,
    /// Numeric weight (variable-font axis value).
    pub weight: f32,
    /// Font size in physical pixels.
    pub size_px: f32,
}

impl FontSpec {
    /// CSS-style source list: the preferred family plus a fixed generic
    /// sans-serif fallback chain for portability across registered fonts.
    fn stack_source(&self) -> String {
        format!("\"{}\", Roboto, Noto Sans, sans-serif", self.family)
    }
}

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrush {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

struct LoadedFont {
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// Stateful helper for shaping, measuring and laying out single lines.
///
/// Fonts are registered from raw bytes; the engine keeps the matching paint
/// font for each registered family so the compositor can draw glyph runs
/// against the same data Parley shaped with.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    fonts: Vec<LoadedFont>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    /// Construct a new engine with fresh Parley contexts and no fonts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            fonts: Vec::new(),
        }
    }

    /// Register a font from raw bytes and return its family name.
    pub fn register_font_bytes(&mut self, font_bytes: &[u8]) -> TextcardResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| TextcardError::validation("font bytes contain no usable family"))?;

        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TextcardError::validation("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
            0,
        );
        self.fonts.push(LoadedFont {
            family: family.clone(),
            font,
        });
        Ok(family)
    }

    /// Paint font for `family`, falling back to the first registered font.
    pub(crate) fn paint_font(&self, family: &str) -> Option<&vello_cpu::peniko::FontData> {
        self.fonts
            .iter()
            .find(|f| f.family.eq_ignore_ascii_case(family))
            .or_else(|| self.fonts.first())
            .map(|f| &f.font)
    }

    /// Shape and lay out one line of text without wrapping.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &FontSpec,
        brush: TextBrush,
    ) -> parley::Layout<TextBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font.stack_source())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(font.weight),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextMeasurer for TextEngine {
    fn measure_width(&mut self, text: &str, font: &FontSpec) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        // Advance width including trailing whitespace, matching how canvas
        // text measurement treats candidate lines.
        let layout = self.layout_line(text, font, TextBrush::default());
        layout.full_width() as f64
    }
}
