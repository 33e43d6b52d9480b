//! Minimal use of the renderer as a library.
//!
//! Renders three spheres of different materials and saves the result as `output.ppm`.

use lumen_renderer::{
    render, Camera, CameraConfig, Color, ImageBuffer, Material, RenderConfig, Scene, Sphere, Vec3,
};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> std::io::Result<()> {
    println!("Lumen - Simple Example");
    println!("======================");

    let world = build_scene();
    println!("Scene has {} spheres", world.len());

    let config = RenderConfig {
        samples_per_pixel: 32,
        max_depth: 10,
        seed: Some(1),
        ..RenderConfig::from_aspect_ratio(400, 16.0 / 9.0)
    };

    let camera = Camera::new(
        &CameraConfig::default()
            .with_position(Vec3::new(-2.0, 2.0, 1.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(40.0, 0.0, 1.0)
            .with_aspect_ratio(config.aspect_ratio()),
    );

    println!(
        "Rendering {}x{} @ {} spp...",
        config.width, config.height, config.samples_per_pixel
    );
    let start = std::time::Instant::now();
    let image = render(&camera, &world, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> Scene {
    let mut world = Scene::new();

    world.add(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        Material::lambertian(Color::new(0.8, 0.8, 0.0)),
    ));
    world.add(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Material::lambertian(Color::new(0.1, 0.2, 0.5)),
    ));
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, Material::dielectric(1.5)));
    world.add(Sphere::new(
        Vec3::new(1.0, 0.0, -1.0),
        0.5,
        Material::metal(Color::new(0.8, 0.6, 0.2), 0.0),
    ));

    world
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(filename)?);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for row in image.rows() {
        for rgb in row {
            writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
        }
    }

    writer.flush()
}
