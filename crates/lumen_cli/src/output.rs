//! Image output.
//!
//! `.ppm` files are written as plain-text P3; every other extension is encoded by
//! the `image` crate, which picks the format from the extension.

use anyhow::{anyhow, Context, Result};
use lumen_renderer::ImageBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Save `image` to `path`, choosing the format from the file extension.
pub fn save_image(image: &ImageBuffer, path: &Path) -> Result<()> {
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_ppm(image, &mut writer)?;
        writer.flush()?;
    } else {
        save_encoded(image, path)?;
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}

/// Write `image` as plain-text PPM (P3), top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for row in image.rows() {
        for rgb in row {
            writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
        }
    }

    Ok(())
}

fn save_encoded(image: &ImageBuffer, path: &Path) -> Result<()> {
    let buffer = image::RgbImage::from_raw(image.width, image.height, image.to_bytes())
        .ok_or_else(|| anyhow!("pixel data does not match {}x{}", image.width, image.height))?;

    buffer
        .save(path)
        .with_context(|| format!("failed to encode {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> ImageBuffer {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, [255, 0, 0]);
        image.set(1, 0, [0, 255, 0]);
        image.set(0, 1, [0, 0, 255]);
        image.set(1, 1, [10, 20, 30]);
        image
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("lumen_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_write_ppm() {
        let mut out = Vec::new();
        write_ppm(&checker(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["P3", "2 2", "255", "255 0 0", "0 255 0", "0 0 255", "10 20 30"]
        );
    }

    #[test]
    fn test_save_ppm_file() {
        let path = temp_path("out.PPM");
        save_image(&checker(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("P3\n2 2\n255\n255 0 0\n"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_png_round_trip() {
        let path = temp_path("out.png");
        save_image(&checker(), &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 255, 0]);
        assert_eq!(decoded.get_pixel(0, 1).0, [0, 0, 255]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unknown_extension_fails() {
        let path = temp_path("out.nonsense");
        assert!(save_image(&checker(), &path).is_err());
    }
}
