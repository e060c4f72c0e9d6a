//! Grayscale bitmap rendering and PNG encoding.

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};

use super::{QrMatrix, RenderError};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Rasterizes `matrix` into a `size`×`size` bitmap.
///
/// Each pixel takes the color of the module it falls in, so module edges
/// land on whole pixels even when `size` is not a multiple of the width.
pub fn to_bitmap(matrix: &QrMatrix, size: u32) -> Result<GrayImage, RenderError> {
    let n = matrix.width();
    if (size as usize) < n {
        return Err(RenderError::RasterTooSmall { size, modules: n });
    }
    let scale = |p: u32| (p as usize * n) / size as usize;
    Ok(GrayImage::from_fn(size, size, |x, y| {
        if matrix.is_dark(scale(x), scale(y)) {
            DARK
        } else {
            LIGHT
        }
    }))
}

/// Encodes a bitmap as PNG bytes.
pub fn encode_png(bitmap: &GrayImage) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    bitmap.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}
