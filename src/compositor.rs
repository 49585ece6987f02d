use kurbo::{Affine, Join, Rect, Stroke};

use crate::assets::DecodedImage;
use crate::color::Rgba8;
use crate::config::{RenderConfig, TextAlign};
use crate::error::TextcardResult;
use crate::layout::{LayoutMetrics, LineBreakResult};
use crate::surface::Surface;
use crate::text_engine::{TextBrush, TextEngine};

/// Truncation indicator bar height in physical pixels.
const CLIP_BAR_HEIGHT: f64 = 20.0;

/// Truncation indicator color: translucent red.
const CLIP_BAR_COLOR: Rgba8 = Rgba8 {
    r: 255,
    g: 50,
    b: 50,
    a: 204,
};

/// Background to paint before the text pass. Exactly one per render.
#[derive(Clone, Debug)]
pub(crate) enum BackgroundPlan {
    /// Transparent surface.
    Clear,
    /// Full-surface flat fill; alpha already reflects the configured opacity.
    Flat { color: Rgba8 },
    /// Cover-fit image with a white glass overlay at `overlay` strength.
    Image { image: DecodedImage, overlay: f64 },
}

/// Paints backgrounds and text onto the surface, reusing one render context
/// across calls.
pub(crate) struct Compositor {
    ctx: Option<vello_cpu::RenderContext>,
}

impl Compositor {
    pub(crate) fn new() -> Self {
        Self { ctx: None }
    }

    /// Paint one render: resize (clearing), background pass, text pass, and
    /// the truncation bar when the layout was clipped.
    pub(crate) fn paint(
        &mut self,
        surface: &mut Surface,
        engine: &mut TextEngine,
        cfg: &RenderConfig,
        metrics: &LayoutMetrics,
        wrap: &LineBreakResult,
        background: &BackgroundPlan,
    ) -> TextcardResult<()> {
        let width = metrics.width;
        let height = wrap.surface_height().round() as u32;
        surface.resize(width, height)?;

        let w = f64::from(width);
        let h = f64::from(height);

        let mut ctx = match self.ctx.take() {
            Some(ctx) if u32::from(ctx.width()) == width && u32::from(ctx.height()) == height => {
                ctx
            }
            _ => vello_cpu::RenderContext::new(width as u16, height as u16),
        };
        ctx.reset();
        ctx.set_paint_transform(Affine::IDENTITY);

        paint_background(&mut ctx, background, w, h)?;
        paint_text(&mut ctx, engine, cfg, metrics, wrap, w, h);

        if wrap.clipped {
            ctx.set_transform(Affine::IDENTITY);
            ctx.set_paint(CLIP_BAR_COLOR.to_paint());
            ctx.fill_rect(&Rect::new(0.0, h - CLIP_BAR_HEIGHT, w, h));
        }

        ctx.flush();
        ctx.render_to_pixmap(surface.pixmap_mut());
        self.ctx = Some(ctx);
        Ok(())
    }
}

fn paint_background(
    ctx: &mut vello_cpu::RenderContext,
    background: &BackgroundPlan,
    w: f64,
    h: f64,
) -> TextcardResult<()> {
    match background {
        // A fresh context renders fully transparent; nothing to paint.
        BackgroundPlan::Clear => {}
        BackgroundPlan::Flat { color } => {
            ctx.set_transform(Affine::IDENTITY);
            ctx.set_paint(color.to_paint());
            ctx.fill_rect(&Rect::new(0.0, 0.0, w, h));
        }
        BackgroundPlan::Image { image, overlay } => {
            let paint = image.to_paint()?;
            let iw = f64::from(image.width);
            let ih = f64::from(image.height);
            let (draw_w, draw_h, ox, oy) = cover_fit(iw, ih, w, h);

            ctx.set_transform(
                Affine::translate((ox, oy)) * Affine::scale_non_uniform(draw_w / iw, draw_h / ih),
            );
            ctx.set_paint(paint);
            ctx.fill_rect(&Rect::new(0.0, 0.0, iw, ih));

            // Glass effect: translucent white layer over the whole image.
            ctx.set_transform(Affine::IDENTITY);
            ctx.set_paint(Rgba8::WHITE.with_alpha(*overlay).to_paint());
            ctx.fill_rect(&Rect::new(0.0, 0.0, w, h));
        }
    }
    Ok(())
}

fn paint_text(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextEngine,
    cfg: &RenderConfig,
    metrics: &LayoutMetrics,
    wrap: &LineBreakResult,
    w: f64,
    h: f64,
) {
    let font = metrics.font_spec(cfg);
    let Some(paint_font) = engine.paint_font(&font.family).cloned() else {
        // No registered fonts: shaping yields no glyphs either way.
        return;
    };
    let brush = TextBrush {
        r: cfg.text_color.r,
        g: cfg.text_color.g,
        b: cfg.text_color.b,
        a: cfg.text_color.a,
    };
    let stroke = (metrics.stroke_width > 0.0).then(|| {
        Stroke::new(metrics.stroke_width)
            .with_join(Join::Round)
            .with_miter_limit(2.0)
    });

    let mut y = metrics.padding;
    for text in &wrap.lines {
        if y + metrics.line_height > h {
            break;
        }

        let layout = engine.layout_line(text, &font, brush);
        let line_width = f64::from(layout.full_width());
        let x = line_anchor_x(cfg.text_align, w, metrics.padding, line_width);

        // Layout origin is the top of the glyph box, so translating to
        // (x, y) anchors the line exactly like a top baseline.
        ctx.set_transform(Affine::translate((x, y)));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs: Vec<vello_cpu::Glyph> = run
                    .glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();

                // Outline first so the fill sits on top of it.
                if let Some(stroke) = &stroke {
                    ctx.set_stroke(stroke.clone());
                    ctx.set_paint(cfg.stroke_color.to_paint());
                    ctx.glyph_run(&paint_font)
                        .font_size(run.run().font_size())
                        .hint(true)
                        .stroke_glyphs(glyphs.iter().copied());
                }

                let fill = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    fill.r, fill.g, fill.b, fill.a,
                ));
                ctx.glyph_run(&paint_font)
                    .font_size(run.run().font_size())
                    .hint(true)
                    .fill_glyphs(glyphs.iter().copied());
            }
        }

        y += metrics.line_height;
    }
}

/// Left edge of a painted line: left lines hug the left padding edge, right
/// lines end at the right padding edge, centered lines straddle the midline.
fn line_anchor_x(align: TextAlign, surface_w: f64, padding: f64, line_w: f64) -> f64 {
    match align {
        TextAlign::Left => padding,
        TextAlign::Center => (surface_w - line_w) / 2.0,
        TextAlign::Right => surface_w - padding - line_w,
    }
}

/// Cover fit: scale an image to fill `dst_w`×`dst_h` preserving aspect ratio,
/// centered, cropping overflow. Returns `(draw_w, draw_h, offset_x, offset_y)`.
fn cover_fit(img_w: f64, img_h: f64, dst_w: f64, dst_h: f64) -> (f64, f64, f64, f64) {
    let img_ratio = img_w / img_h;
    let dst_ratio = dst_w / dst_h;

    if img_ratio > dst_ratio {
        // Image is wider than the target: height fits, width overflows.
        let draw_h = dst_h;
        let draw_w = img_w * (dst_h / img_h);
        (draw_w, draw_h, (dst_w - draw_w) / 2.0, 0.0)
    } else {
        let draw_w = dst_w;
        let draw_h = img_h * (dst_w / img_w);
        (draw_w, draw_h, 0.0, (dst_h - draw_h) / 2.0)
    }
}
