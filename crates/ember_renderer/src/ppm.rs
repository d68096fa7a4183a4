//! Plain-text PPM (P3) output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{RenderError, RenderResult};
use crate::ImageBuffer;

/// Write an image as ASCII PPM: a `P3 / width height / 255` header, then
/// one `r g b` line per pixel, top row first.
pub fn write_ppm<W: Write>(writer: &mut W, image: &ImageBuffer) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in &image.pixels {
        writeln!(writer, "{r} {g} {b}")?;
    }

    Ok(())
}

/// Save an image to a PPM file, replacing any existing file.
pub fn save_ppm(path: impl AsRef<Path>, image: &ImageBuffer) -> RenderResult<()> {
    let path = path.as_ref();
    let output_error = |source| RenderError::Output {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(output_error)?;
    let mut writer = BufWriter::new(file);
    write_ppm(&mut writer, image).map_err(output_error)?;
    writer.flush().map_err(output_error)?;

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
