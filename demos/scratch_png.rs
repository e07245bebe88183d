use std::f64::consts::TAU;

use veil::{
    HeadlessScratchHost, Point, PointerId, ScratchConfig, ScratchEvent, ScratchRevealCanvas,
    Vec2, Viewport,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Optional seed image: `cargo run --example scratch_png -- path/to/lemon.png`.
    let seed_path = std::env::args().nth(1);
    let vp = Viewport::new(960.0, 540.0);
    let mut host = HeadlessScratchHost::new(vp);
    let cfg = match &seed_path {
        Some(path) => {
            host = host.with_seed(path, std::fs::read(path)?);
            ScratchConfig::viewport_with_seed(path.clone())
        }
        None => ScratchConfig::default(),
    };
    let mut canvas = ScratchRevealCanvas::try_initialize(cfg, host)?;

    // A spiral gesture with sparse samples.
    let pointer = PointerId(1);
    let center = Point::new(vp.width * 0.5, vp.height * 0.5);
    let sample = |i: u32| {
        let t = f64::from(i) / 24.0;
        let r = 40.0 + 200.0 * t;
        center + Vec2::from_angle(t * 2.0 * TAU) * r
    };
    let first = sample(0);
    canvas.handle_event(ScratchEvent::PointerDown {
        pointer,
        pos: first,
        screen: first,
    });
    for i in 1..=24 {
        let p = sample(i);
        canvas.handle_event(ScratchEvent::PointerMove {
            pointer,
            pos: p,
            screen: p,
        });
    }
    let last = sample(24);
    canvas.handle_event(ScratchEvent::PointerUp {
        pointer,
        pos: last,
        screen: last,
    });

    let img = canvas
        .to_rgba_image()
        .ok_or_else(|| anyhow::anyhow!("scratch canvas is inert"))?;
    let out_dir = std::path::Path::new("target");
    std::fs::create_dir_all(out_dir)?;
    let out_path = out_dir.join("scratch.png");
    image::save_buffer_with_format(
        &out_path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )?;

    println!("revealed: {:.1}%", canvas.revealed_fraction() * 100.0);
    eprintln!("wrote {}", out_path.display());
    Ok(())
}
