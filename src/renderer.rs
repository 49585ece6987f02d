use crate::assets::decode_image;
use crate::compositor::{BackgroundPlan, Compositor};
use crate::config::RenderConfig;
use crate::error::TextcardResult;
use crate::export;
use crate::layout::{self, LayoutMetrics, LineBreakResult};
use crate::surface::Surface;
use crate::text_engine::TextEngine;

/// A laid-out render waiting to be painted.
///
/// Produced by [`Renderer::begin`], which captures a generation token along
/// with the layout and any decoded background image. Committing a pending
/// render that has been superseded by a newer `begin` is a no-op, so a slow
/// image decode can never paint over a more recent render.
pub struct PendingRender {
    config: RenderConfig,
    metrics: LayoutMetrics,
    wrap: LineBreakResult,
    background: BackgroundPlan,
    generation: u64,
}

impl PendingRender {
    /// The line-break result this render will paint.
    pub fn line_breaks(&self) -> &LineBreakResult {
        &self.wrap
    }
}

/// Owns the raster surface and renders [`RenderConfig`] values onto it.
///
/// The surface persists across renders and is resized in place each call.
/// One logical writer is assumed; overlapping renders are serialized through
/// the [`begin`](Self::begin)/[`commit`](Self::commit) generation check.
pub struct Renderer {
    surface: Surface,
    engine: TextEngine,
    compositor: Compositor,
    generation: u64,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer with an empty surface and no registered fonts.
    pub fn new() -> Self {
        Self {
            surface: Surface::new(),
            engine: TextEngine::new(),
            compositor: Compositor::new(),
            generation: 0,
        }
    }

    /// Register a font from raw bytes; returns the family name for use in
    /// [`RenderConfig::font_family`].
    pub fn register_font_bytes(&mut self, font_bytes: &[u8]) -> TextcardResult<String> {
        self.engine.register_font_bytes(font_bytes)
    }

    /// Lay out `config` and prepare its background, superseding any earlier
    /// pending render.
    ///
    /// Background-image decode failures are non-fatal: they log a warning and
    /// fall back to the flat color (when `use_bg`) or a cleared background.
    #[tracing::instrument(skip_all)]
    pub fn begin(&mut self, config: &RenderConfig) -> TextcardResult<PendingRender> {
        self.generation += 1;
        let generation = self.generation;

        let metrics = LayoutMetrics::from_config(config)?;
        let font = metrics.font_spec(config);
        let wrap = layout::break_lines(config.resolved_text(), &font, &metrics, &mut self.engine);

        let fallback = |cfg: &RenderConfig| {
            if cfg.use_bg {
                BackgroundPlan::Flat {
                    color: cfg.bg_color.with_alpha(cfg.bg_alpha),
                }
            } else {
                BackgroundPlan::Clear
            }
        };

        // A set background image takes priority over the flat-color flag.
        let background = match &config.bg_image {
            Some(bytes) => match decode_image(bytes) {
                Ok(image) => BackgroundPlan::Image {
                    image,
                    overlay: config.bg_opacity,
                },
                Err(e) => {
                    tracing::warn!(error = %e, "background image decode failed; falling back");
                    fallback(config)
                }
            },
            None => fallback(config),
        };

        Ok(PendingRender {
            config: config.clone(),
            metrics,
            wrap,
            background,
            generation,
        })
    }

    /// Paint a pending render onto the surface.
    ///
    /// Returns `Ok(false)` without painting when `pending` was superseded by
    /// a newer [`begin`](Self::begin).
    pub fn commit(&mut self, pending: PendingRender) -> TextcardResult<bool> {
        if pending.generation != self.generation {
            return Ok(false);
        }
        self.compositor.paint(
            &mut self.surface,
            &mut self.engine,
            &pending.config,
            &pending.metrics,
            &pending.wrap,
            &pending.background,
        )?;
        Ok(true)
    }

    /// Lay out and paint `config` in one step.
    pub fn render(&mut self, config: &RenderConfig) -> TextcardResult<LineBreakResult> {
        let pending = self.begin(config)?;
        let wrap = pending.wrap.clone();
        self.commit(pending)?;
        Ok(wrap)
    }

    /// Borrow the painted surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Export the painted surface as PNG bytes (see [`export::encode_png`]).
    pub fn export_png(&self) -> TextcardResult<Vec<u8>> {
        export::encode_png(&self.surface)
    }
}
