//! PNG export of assembled images for debugging

use crate::analysis::patterns::ScanReport;
use crate::io::configuration::{ACTIVE_COLOR, INACTIVE_COLOR, OTHER_SYMBOL_COLOR, PATTERN_COLOR};
use crate::io::error::{PuzzleError, Result};
use crate::spatial::grid::AssembledImage;
use crate::spatial::tiles::Pixel;
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

/// Colour of a single pixel, with covered cells taking precedence
pub const fn pixel_color(pixel: Pixel, covered: bool) -> [u8; 4] {
    if covered {
        PATTERN_COLOR
    } else if pixel.is_active() {
        ACTIVE_COLOR
    } else if pixel.symbol() == Pixel::INACTIVE.symbol() {
        INACTIVE_COLOR
    } else {
        OTHER_SYMBOL_COLOR
    }
}

/// Render an image, highlighting the cells covered by a scan
///
/// With a scan report the image is drawn in the orientation where the
/// pattern was found, so the highlighted cells line up with the matches.
pub fn render_image(image: &AssembledImage, scan: Option<&ScanReport>) -> RgbaImage {
    let oriented = scan.map_or_else(
        || image.clone(),
        |report| image.oriented(report.orientation),
    );
    let (rows, cols) = oriented.pixels().dim();

    ImageBuffer::from_fn(cols as u32, rows as u32, |x, y| {
        let (row, col) = (y as usize, x as usize);
        let pixel = oriented
            .pixels()
            .get((row, col))
            .copied()
            .unwrap_or_default();
        let covered = scan.is_some_and(|report| report.covered.contains(row, col));
        Rgba(pixel_color(pixel, covered))
    })
}

/// Export an assembled image as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - The image has no pixels
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_image_as_png(
    image: &AssembledImage,
    scan: Option<&ScanReport>,
    output_path: &Path,
) -> Result<()> {
    if image.pixels().is_empty() {
        return Err(PuzzleError::InvalidParameter {
            parameter: "image",
            value: output_path.display().to_string(),
            reason: "cannot export an image without pixels".to_string(),
        });
    }

    let rendered = render_image(image, scan);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PuzzleError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    rendered
        .save(output_path)
        .map_err(|e| PuzzleError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    log::info!("exported image to {}", output_path.display());
    Ok(())
}
