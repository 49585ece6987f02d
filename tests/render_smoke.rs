use std::io::Cursor;
use std::sync::Arc;

use textcard::{MAX_SURFACE_HEIGHT, RenderConfig, Renderer, Rgba8, TextcardError};

/// Small config so test surfaces stay cheap: 200 px wide at scale 1.
fn small_config() -> RenderConfig {
    RenderConfig {
        text: "hello world".to_owned(),
        base_width: 200.0,
        scale_factor: 1.0,
        ..RenderConfig::default()
    }
}

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn pixel(r: &Renderer, x: u32, y: u32) -> [u8; 4] {
    let idx = ((y * r.surface().width() + x) * 4) as usize;
    let d = r.surface().data();
    [d[idx], d[idx + 1], d[idx + 2], d[idx + 3]]
}

#[test]
fn rendering_twice_is_bit_identical() {
    let mut renderer = Renderer::new();
    let mut cfg = small_config();
    cfg.use_bg = true;
    cfg.bg_color = Rgba8::rgb(20, 40, 80);

    renderer.render(&cfg).unwrap();
    let first = renderer.surface().data().to_vec();
    renderer.render(&cfg).unwrap();
    assert_eq!(first, renderer.surface().data());
}

#[test]
fn empty_text_renders_the_placeholder_lines() {
    let mut renderer = Renderer::new();

    let mut empty = small_config();
    empty.text = String::new();
    let from_empty = renderer.render(&empty).unwrap();

    let mut explicit = small_config();
    explicit.text = empty.placeholder.clone();
    let from_placeholder = renderer.render(&explicit).unwrap();

    assert_eq!(from_empty, from_placeholder);
    assert!(!from_empty.lines.is_empty());
}

#[test]
fn newlines_force_line_boundaries() {
    let mut renderer = Renderer::new();
    let mut cfg = small_config();
    cfg.text = "one\ntwo\nthree".to_owned();

    let wrap = renderer.render(&cfg).unwrap();
    assert_eq!(wrap.lines, vec!["one", "two", "three"]);
    assert!(!wrap.clipped);
}

#[test]
fn flat_background_respects_color_and_alpha() {
    let mut renderer = Renderer::new();
    let mut cfg = small_config();
    cfg.use_bg = true;
    cfg.bg_color = Rgba8::rgb(0, 0, 255);
    cfg.bg_alpha = 1.0;

    renderer.render(&cfg).unwrap();
    assert_eq!(pixel(&renderer, 3, 3), [0, 0, 255, 255]);
}

#[test]
fn image_background_takes_priority_over_flat_flag() {
    let bg = Arc::new(png_bytes(2, 2, [255, 0, 0, 255]));

    let mut with_flag = small_config();
    with_flag.bg_image = Some(bg.clone());
    with_flag.use_bg = true;
    with_flag.bg_color = Rgba8::rgb(0, 0, 255);
    with_flag.bg_opacity = 0.0;

    let mut without_flag = with_flag.clone();
    without_flag.use_bg = false;

    let mut renderer = Renderer::new();
    renderer.render(&with_flag).unwrap();
    let a = renderer.surface().data().to_vec();
    renderer.render(&without_flag).unwrap();
    let b = renderer.surface().data().to_vec();
    assert_eq!(a, b, "image path must win bit-for-bit over the flat path");

    // And it really is the image, not the blue flat fill.
    let w = renderer.surface().width();
    let h = renderer.surface().height();
    let center = pixel(&renderer, w / 2, h / 2);
    assert!(center[0] > 200 && center[2] < 50, "expected red: {center:?}");
}

#[test]
fn glass_overlay_at_full_strength_whitens_the_image() {
    let mut cfg = small_config();
    cfg.bg_image = Some(Arc::new(png_bytes(2, 2, [255, 0, 0, 255])));
    cfg.bg_opacity = 1.0;

    let mut renderer = Renderer::new();
    renderer.render(&cfg).unwrap();
    let w = renderer.surface().width();
    let h = renderer.surface().height();
    assert_eq!(pixel(&renderer, w / 2, h / 2), [255, 255, 255, 255]);
}

#[test]
fn undecodable_background_falls_back_to_flat_color() {
    let mut broken = small_config();
    broken.bg_image = Some(Arc::new(b"not an image at all".to_vec()));
    broken.use_bg = true;
    broken.bg_color = Rgba8::rgb(0, 128, 0);

    let mut flat = broken.clone();
    flat.bg_image = None;

    let mut renderer = Renderer::new();
    renderer.render(&broken).unwrap();
    let a = renderer.surface().data().to_vec();
    renderer.render(&flat).unwrap();
    assert_eq!(a, renderer.surface().data());
}

#[test]
fn overflowing_text_clips_and_paints_the_warning_bar() {
    let mut renderer = Renderer::new();
    let mut cfg = small_config();
    // 60 forced lines at line height 78 far exceeds the 4096 px ceiling.
    cfg.text = vec!["x"; 60].join("\n");

    let wrap = renderer.render(&cfg).unwrap();
    assert!(wrap.clipped);
    assert!(wrap.required_height > MAX_SURFACE_HEIGHT);
    assert_eq!(renderer.surface().height(), MAX_SURFACE_HEIGHT as u32);

    let w = renderer.surface().width();
    let h = renderer.surface().height();
    let bar = pixel(&renderer, w / 2, h - 5);
    assert!(bar[3] > 150, "bar should be visible: {bar:?}");
    assert!(bar[0] > bar[1], "bar should be red-dominant: {bar:?}");
}

#[test]
fn superseded_pending_render_never_paints() {
    let mut renderer = Renderer::new();
    let mut red = small_config();
    red.use_bg = true;
    red.bg_color = Rgba8::rgb(255, 0, 0);
    let mut blue = red.clone();
    blue.bg_color = Rgba8::rgb(0, 0, 255);

    let stale = renderer.begin(&red).unwrap();
    let fresh = renderer.begin(&blue).unwrap();

    assert!(!renderer.commit(stale).unwrap());
    // Nothing painted yet: the surface is still unrendered.
    assert_eq!(renderer.surface().width(), 0);

    assert!(renderer.commit(fresh).unwrap());
    assert_eq!(pixel(&renderer, 1, 1), [0, 0, 255, 255]);
}

#[test]
fn export_downscales_wide_renders_and_rejects_unrendered_surfaces() {
    let mut renderer = Renderer::new();
    assert!(matches!(
        renderer.export_png(),
        Err(TextcardError::DegenerateSurface(_))
    ));

    // Default config: 1200 logical x scale 2 = 2400 physical wide.
    let cfg = RenderConfig {
        text: "wide".to_owned(),
        ..RenderConfig::default()
    };
    renderer.render(&cfg).unwrap();
    assert_eq!(renderer.surface().width(), 2400);

    let png = renderer.export_png().unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!(img.width(), 900);
    let expected_h = (f64::from(renderer.surface().height()) * 900.0 / 2400.0).round() as u32;
    assert_eq!(img.height(), expected_h);
}
