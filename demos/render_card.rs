use textcard::{RenderConfig, Renderer, Rgba8, TextAlign};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut renderer = Renderer::new();
    if let Some(path) = std::env::args().nth(1) {
        let family = renderer.register_font_bytes(&std::fs::read(&path)?)?;
        println!("registered font family {family:?} from {path}");
    }

    let cfg = RenderConfig {
        text: "Hello from textcard!\nPass a .ttf path to draw real glyphs.".to_owned(),
        text_align: TextAlign::Center,
        use_bg: true,
        bg_color: Rgba8::rgb(24, 32, 56),
        ..RenderConfig::default()
    };

    let wrap = renderer.render(&cfg)?;
    println!(
        "rendered {} lines onto a {}x{} surface (clipped: {})",
        wrap.lines.len(),
        renderer.surface().width(),
        renderer.surface().height(),
        wrap.clipped
    );

    let png = renderer.export_png()?;
    std::fs::write("card.png", &png)?;
    println!("wrote card.png ({} bytes)", png.len());
    Ok(())
}
