use crate::config::RenderConfig;
use crate::error::{TextcardError, TextcardResult};
use crate::text_engine::FontSpec;

/// Hard ceiling on surface height in physical pixels.
pub const MAX_SURFACE_HEIGHT: f64 = 4096.0;

/// Canvas padding in logical pixels (applied on all four sides).
pub const PADDING_LOGICAL: f64 = 60.0;

/// Line advance as a multiple of the physical font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.3;

/// Text-measurement capability the layout engine depends on.
///
/// Any graphics backend that can report the advance width of a string under a
/// given font satisfies this; tests substitute a deterministic fake.
pub trait TextMeasurer {
    /// Advance width of `text` in physical pixels under `font`.
    fn measure_width(&mut self, text: &str, font: &FontSpec) -> f64;
}

/// Physical-pixel layout parameters derived from a [`RenderConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    /// Surface width in physical pixels.
    pub width: u32,
    /// Font size in physical pixels.
    pub font_size: f32,
    /// Stroke width in physical pixels.
    pub stroke_width: f64,
    /// Padding in physical pixels.
    pub padding: f64,
    /// Vertical advance per line in physical pixels.
    pub line_height: f64,
    /// Wrap limit: surface width minus both paddings.
    pub max_text_width: f64,
}

impl LayoutMetrics {
    /// Validate the config and derive physical-pixel parameters.
    pub fn from_config(cfg: &RenderConfig) -> TextcardResult<Self> {
        let scale = cfg.scale_factor;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(TextcardError::validation(
                "scale_factor must be finite and > 0",
            ));
        }
        if !cfg.base_width.is_finite() || cfg.base_width <= 0.0 {
            return Err(TextcardError::validation(
                "base_width must be finite and > 0",
            ));
        }
        if !cfg.font_size.is_finite() || cfg.font_size <= 0.0 {
            return Err(TextcardError::validation(
                "font_size must be finite and > 0",
            ));
        }
        if !cfg.stroke_width.is_finite() || cfg.stroke_width < 0.0 {
            return Err(TextcardError::validation(
                "stroke_width must be finite and >= 0",
            ));
        }

        let width_px = (cfg.base_width * scale).round();
        if width_px > f64::from(u16::MAX) {
            return Err(TextcardError::validation(format!(
                "surface width {width_px} exceeds the maximum raster dimension"
            )));
        }
        let width = width_px as u32;
        let font_size = (cfg.font_size * scale) as f32;
        let padding = PADDING_LOGICAL * scale;

        Ok(Self {
            width,
            font_size,
            stroke_width: cfg.stroke_width * scale,
            padding,
            line_height: f64::from(font_size) * LINE_HEIGHT_FACTOR,
            max_text_width: f64::from(width) - padding * 2.0,
        })
    }

    /// Font spec for this render.
    pub fn font_spec(&self, cfg: &RenderConfig) -> FontSpec {
        FontSpec {
            family: cfg.font_family.clone(),
            weight: cfg.font_weight,
            size_px: self.font_size,
        }
    }
}

/// Ordered committed lines plus the overflow verdict for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct LineBreakResult {
    /// Committed line strings in vertical reading order.
    pub lines: Vec<String>,
    /// `true` when the unclamped height exceeds [`MAX_SURFACE_HEIGHT`].
    pub clipped: bool,
    /// Unclamped height the lines would require, in physical pixels.
    pub required_height: f64,
}

impl LineBreakResult {
    /// Surface height to allocate: the required height, clamped to the ceiling.
    pub fn surface_height(&self) -> f64 {
        self.required_height.min(MAX_SURFACE_HEIGHT)
    }
}

/// Greedy per-character wrap of `text` into lines no wider than
/// `metrics.max_text_width`.
///
/// Characters accumulate into the current line; a candidate that would exceed
/// the limit commits the line first, unless the line is still empty (a single
/// over-wide character is allowed to overflow). `\n` always forces a break
/// and never appears in a committed line; the final line is always committed,
/// so trailing newlines yield a trailing empty line.
///
/// Breaks land mid-word. Every committed line with more than one character
/// fits the width limit, including in scripts without word delimiters.
pub fn break_lines(
    text: &str,
    font: &FontSpec,
    metrics: &LayoutMetrics,
    measurer: &mut dyn TextMeasurer,
) -> LineBreakResult {
    let mut lines = Vec::new();
    let mut line = String::new();

    for ch in text.chars() {
        if ch == '\n' {
            lines.push(std::mem::take(&mut line));
            continue;
        }
        let mut candidate = line.clone();
        candidate.push(ch);
        if !line.is_empty() && measurer.measure_width(&candidate, font) > metrics.max_text_width {
            lines.push(std::mem::take(&mut line));
            line.push(ch);
        } else {
            line = candidate;
        }
    }
    lines.push(line);

    let required_height = (lines.len() as f64) * metrics.line_height + metrics.padding * 2.0;
    LineBreakResult {
        lines,
        clipped: required_height > MAX_SURFACE_HEIGHT,
        required_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;

    /// Deterministic measurer: every char is `char_width` px wide.
    struct FakeMeasurer {
        char_width: f64,
    }

    impl TextMeasurer for FakeMeasurer {
        fn measure_width(&mut self, text: &str, _font: &FontSpec) -> f64 {
            text.chars().count() as f64 * self.char_width
        }
    }

    fn metrics_with(max_text_width: f64) -> LayoutMetrics {
        LayoutMetrics {
            width: (max_text_width + 2.0 * 120.0) as u32,
            font_size: 120.0,
            stroke_width: 16.0,
            padding: 120.0,
            line_height: 156.0,
            max_text_width,
        }
    }

    fn font() -> FontSpec {
        FontSpec {
            family: "Test".to_owned(),
            weight: 800.0,
            size_px: 120.0,
        }
    }

    #[test]
    fn wraps_at_max_width_per_character() {
        let mut m = FakeMeasurer { char_width: 10.0 };
        // 35px limit: 3 chars fit, the 4th starts a new line.
        let r = break_lines("abcdefgh", &font(), &metrics_with(35.0), &mut m);
        assert_eq!(r.lines, vec!["abc", "def", "gh"]);
        assert!(!r.clipped);
        for line in &r.lines {
            assert!(line.chars().count() as f64 * 10.0 <= 35.0);
        }
    }

    #[test]
    fn newline_always_breaks_and_is_never_committed() {
        let mut m = FakeMeasurer { char_width: 1.0 };
        let r = break_lines("ab\ncd", &font(), &metrics_with(1000.0), &mut m);
        assert_eq!(r.lines, vec!["ab", "cd"]);

        let r = break_lines("ab\n", &font(), &metrics_with(1000.0), &mut m);
        assert_eq!(r.lines, vec!["ab", ""]);

        let r = break_lines("\n\n", &font(), &metrics_with(1000.0), &mut m);
        assert_eq!(r.lines, vec!["", "", ""]);
    }

    #[test]
    fn single_overwide_character_is_allowed_to_overflow() {
        let mut m = FakeMeasurer { char_width: 50.0 };
        let r = break_lines("xy", &font(), &metrics_with(35.0), &mut m);
        // Each char alone exceeds the limit, but a line is never left empty.
        assert_eq!(r.lines, vec!["x", "y"]);
    }

    #[test]
    fn required_height_counts_lines_and_padding() {
        let mut m = FakeMeasurer { char_width: 1.0 };
        let metrics = metrics_with(1000.0);
        let r = break_lines("a\nb\nc", &font(), &metrics, &mut m);
        assert_eq!(r.lines.len(), 3);
        assert_eq!(r.required_height, 3.0 * 156.0 + 240.0);
        assert_eq!(r.surface_height(), r.required_height);
    }

    #[test]
    fn overflow_past_ceiling_sets_clipped_and_clamps_height() {
        let mut m = FakeMeasurer { char_width: 1.0 };
        let metrics = metrics_with(1000.0);
        // 26 lines x 156 + 240 = 4296 > 4096.
        let text = vec!["a"; 26].join("\n");
        let r = break_lines(&text, &font(), &metrics, &mut m);
        assert!(r.clipped);
        assert!(r.required_height > MAX_SURFACE_HEIGHT);
        assert_eq!(r.surface_height(), MAX_SURFACE_HEIGHT);
    }

    #[test]
    fn metrics_scale_logical_values() {
        let cfg = RenderConfig::default();
        let m = LayoutMetrics::from_config(&cfg).unwrap();
        assert_eq!(m.width, 2400);
        assert_eq!(m.font_size, 120.0);
        assert_eq!(m.padding, 120.0);
        assert_eq!(m.stroke_width, 16.0);
        assert_eq!(m.line_height, 156.0);
        assert_eq!(m.max_text_width, 2400.0 - 240.0);
    }

    #[test]
    fn metrics_reject_degenerate_config() {
        let mut cfg = RenderConfig::default();
        cfg.scale_factor = 0.0;
        assert!(LayoutMetrics::from_config(&cfg).is_err());

        let mut cfg = RenderConfig::default();
        cfg.font_size = f64::NAN;
        assert!(LayoutMetrics::from_config(&cfg).is_err());

        let mut cfg = RenderConfig::default();
        cfg.base_width = 100_000.0;
        assert!(LayoutMetrics::from_config(&cfg).is_err());
    }
}
