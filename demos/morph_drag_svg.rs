use std::fmt::Write as _;

use veil::{
    Affine, HeadlessMorphHost, MorphConfig, MorphFrame, MorphSession, PointerId,
    PolygonMaskMorpher, Viewport,
};

fn parse_viewport() -> Viewport {
    let mut args = std::env::args().skip(1);
    let w = args.next().and_then(|s| s.parse().ok()).unwrap_or(1920.0);
    let h = args.next().and_then(|s| s.parse().ok()).unwrap_or(1080.0);
    Viewport::new(w, h)
}

fn to_svg(cfg: &MorphConfig, frame: &MorphFrame) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" preserveAspectRatio="xMidYMid slice">"#,
        cfg.logical_width, cfg.logical_height
    );
    for id in &frame.polygon_ids {
        let _ = writeln!(
            out,
            r##"  <polygon id="{id}" points="{}" fill="#111"/>"##,
            frame.points_attr
        );
    }
    let _ = writeln!(out, r#"  <g id="{}">"#, cfg.anchors.handles_container_id);
    for h in &frame.handles {
        let _ = writeln!(
            out,
            r#"    <circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            h.center.x, h.center.y, h.radius, h.fill, h.stroke, h.stroke_width
        );
    }
    out.push_str("  </g>\n</svg>\n");
    out
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let vp = parse_viewport();
    let cfg = MorphConfig::hero();
    let s = (vp.width / cfg.logical_width).max(vp.height / cfg.logical_height);
    let ctm = Affine::translate((
        (vp.width - cfg.logical_width * s) * 0.5,
        (vp.height - cfg.logical_height * s) * 0.5,
    )) * Affine::scale(s);

    let host = HeadlessMorphHost::new(vp).with_ctm(Some(ctm));
    let mut morpher = PolygonMaskMorpher::try_initialize(cfg.clone(), host)?;

    // Pull every group a different distance along its axis.
    let pointer = PointerId(1);
    for (group, share) in [(0usize, 1.0), (1, 0.6), (2, 0.3), (3, 0.0)] {
        let i = group * 3 + 1;
        let core = morpher.core().ok_or_else(|| anyhow::anyhow!("morpher is inert"))?;
        let axis = MorphSession::drag_axis(
            core.start_shape()[i],
            core.end_shape()[i],
            cfg.logical_center(),
        );
        let from = morpher.points()[i];
        let to = from + axis * (cfg.drag_sensitivity * share);
        morpher.on_pointer_down(pointer, i, ctm * from);
        for step in 1..=8 {
            let t = f64::from(step) / 8.0;
            morpher.on_pointer_move(pointer, ctm * from.lerp(to, t));
        }
        morpher.on_animation_frame();
        morpher.on_pointer_up(pointer);
        morpher.on_animation_frame();
    }

    let frame = morpher
        .frame()
        .ok_or_else(|| anyhow::anyhow!("morpher is inert"))?;
    let out_dir = std::path::Path::new("target");
    std::fs::create_dir_all(out_dir)?;
    let out_path = out_dir.join("morph_drag.svg");
    std::fs::write(&out_path, to_svg(&cfg, &frame))?;

    println!("commits: {}", morpher.host().commits.len());
    println!("mean progress: {:.3}", morpher.progress(None));
    println!("points: {}", morpher.points_string());
    eprintln!("wrote {}", out_path.display());
    Ok(())
}
