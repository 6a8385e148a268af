use std::{path::PathBuf, rc::Rc};

use anyhow::Context as _;
use cardframe::{CachedFrameSurface, CardStyleConfig, Rgba8};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => CardStyleConfig::from_path(&path)?,
        None => CardStyleConfig::default(),
    };
    let style = Rc::new(cfg.into_style()?);
    let mut cache = CachedFrameSurface::new(style.clone());

    let out_dir = PathBuf::from("target/cardframe-demo");
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    // Simulated draw cycles: first layout, a repeat frame, a rotation, a style change.
    for (i, (w, h)) in [(320, 180), (320, 180), (180, 320)].into_iter().enumerate() {
        let Some(surface) = cache.render(w, h)? else {
            continue;
        };
        let out = out_dir.join(format!("card_{i}.png"));
        surface
            .to_rgba_image()
            .save(&out)
            .with_context(|| format!("write png '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }

    style.set_fill_color(Rgba8::opaque(255, 236, 179));
    if cache.pump_style_events()
        && cache.take_redraw_request()
        && let Some(surface) = cache.surface()
    {
        let out = out_dir.join("card_restyled.png");
        surface
            .to_rgba_image()
            .save(&out)
            .with_context(|| format!("write png '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }

    eprintln!("{:?}", cache.stats());
    cache.teardown();
    Ok(())
}
