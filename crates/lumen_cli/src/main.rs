use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use lumen_renderer::{render, Bvh, Hittable};

mod cli;
mod logger;
mod output;
mod scene;

use cli::Args;
use logger::init_logger;
use output::save_image;
use scene::{builtin_scene, SceneFile};

fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.log_level.into());

    info!("Lumen {}", env!("CARGO_PKG_VERSION"));

    let mut loaded = match &args.scene {
        Some(path) => SceneFile::load(path)
            .and_then(SceneFile::build)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => {
            info!("Using built-in scene {:?}", args.builtin);
            builtin_scene(args.builtin, args.scene_seed)
        }
    };

    args.apply_overrides(&mut loaded.render);
    let camera = loaded.finalize().context("invalid render settings")?;

    let world: Box<dyn Hittable> = if args.bvh {
        Box::new(Bvh::from_scene(loaded.world))
    } else {
        Box::new(loaded.world)
    };

    let image = render(&camera, world.as_ref(), &loaded.render);

    save_image(&image, &args.output)
        .with_context(|| format!("failed to save {}", args.output.display()))?;

    Ok(())
}
