//! Raster and vector output for finished symbols
//!
//! Both QR matrices and linear bar rows are reduced to a grid of dark/light
//! cells first; rasterizing and SVG drawing work on that grid.

use crate::encoder::config::RenderOptions;
use crate::error::{Error, Result};
use crate::linear::Barcode;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Dark/light cells plus the pixel size of one cell
struct Grid {
    rows: Vec<Vec<bool>>,
    cell_width: u32,
    cell_height: u32,
}

impl Grid {
    fn new(barcode: &Barcode, options: &RenderOptions) -> Self {
        let scale = options.module_scale.max(1);
        match barcode {
            Barcode::Matrix(qr) => Self {
                rows: qr.to_bits(options.quiet_zone),
                cell_width: scale,
                cell_height: scale,
            },
            Barcode::Linear(bars) => Self {
                rows: vec![bars.clone()],
                cell_width: scale,
                cell_height: options.bar_height.max(1),
            },
        }
    }

    fn columns(&self) -> u32 {
        self.rows.first().map_or(0, |row| row.len() as u32)
    }

    fn pixel_size(&self) -> (u32, u32) {
        (
            self.columns() * self.cell_width,
            self.rows.len() as u32 * self.cell_height,
        )
    }
}

/// Rasterize to an 8-bit grayscale image, black on white
pub fn to_image(barcode: &Barcode, options: &RenderOptions) -> GrayImage {
    let grid = Grid::new(barcode, options);
    let (width, height) = grid.pixel_size();
    GrayImage::from_fn(width, height, |x, y| {
        let row = (y / grid.cell_height) as usize;
        let col = (x / grid.cell_width) as usize;
        if grid.rows[row][col] { DARK } else { LIGHT }
    })
}

/// Draw as an SVG document; horizontal runs of dark cells share one rect
pub fn to_svg_string(barcode: &Barcode, options: &RenderOptions) -> String {
    let grid = Grid::new(barcode, options);
    let (width, height) = grid.pixel_size();
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{width}" height="{height}">"#
    );
    let _ = writeln!(
        svg,
        r##"  <rect x="0" y="0" width="{width}" height="{height}" fill="#fff" />"##
    );
    for (y, row) in grid.rows.iter().enumerate() {
        let mut x = 0;
        while x < row.len() {
            if !row[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < row.len() && row[x] {
                x += 1;
            }
            let _ = writeln!(
                svg,
                r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#000" />"##,
                start as u32 * grid.cell_width,
                y as u32 * grid.cell_height,
                (x - start) as u32 * grid.cell_width,
                grid.cell_height
            );
        }
    }
    svg.push_str("</svg>\n");
    svg
}

/// Write the symbol to `path`; the extension picks svg, png, bmp or gif
pub fn save<P: AsRef<Path>>(barcode: &Barcode, path: P, options: &RenderOptions) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    debug!(path = %path.display(), format = %extension, "saving barcode");

    match extension.as_str() {
        "svg" => std::fs::write(path, to_svg_string(barcode, options))?,
        "png" => to_image(barcode, options).save_with_format(path, ImageFormat::Png)?,
        "bmp" => to_image(barcode, options).save_with_format(path, ImageFormat::Bmp)?,
        "gif" => DynamicImage::ImageLuma8(to_image(barcode, options))
            .to_rgba8()
            .save_with_format(path, ImageFormat::Gif)?,
        other => {
            return Err(Error::InvalidInput(format!(
                "unsupported output format {:?}",
                other
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ECLevel, QrCode};

    fn options() -> RenderOptions {
        RenderOptions::default()
            .module_scale(3)
            .quiet_zone(4)
            .bar_height(20)
    }

    #[test]
    fn test_qr_image_size() {
        let qr = QrCode::encode_text("HELLO", ECLevel::L).unwrap();
        let img = to_image(&Barcode::Matrix(qr), &options());
        assert_eq!(img.dimensions(), ((21 + 8) * 3, (21 + 8) * 3));
        // quiet zone is light, finder corner is dark
        assert_eq!(img.get_pixel(0, 0), &LIGHT);
        assert_eq!(img.get_pixel(12, 12), &DARK);
    }

    #[test]
    fn test_linear_image_size() {
        let bars = vec![false, true, true, false];
        let img = to_image(&Barcode::Linear(bars), &options());
        assert_eq!(img.dimensions(), (12, 20));
        assert_eq!(img.get_pixel(2, 0), &LIGHT);
        assert_eq!(img.get_pixel(3, 19), &DARK);
    }

    #[test]
    fn test_svg_merges_runs() {
        let bars = vec![true, true, false, true];
        let svg = to_svg_string(&Barcode::Linear(bars), &options());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r##"<rect x="0" y="0" width="6" height="20" fill="#000" />"##));
        assert!(svg.contains(r##"<rect x="9" y="0" width="3" height="20" fill="#000" />"##));
        assert_eq!(svg.matches("fill=\"#000\"").count(), 2);
    }

    #[test]
    fn test_unknown_extension() {
        let err = save(&Barcode::Linear(vec![true]), "out.tiff", &options()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
