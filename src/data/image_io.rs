use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageError, ImageReader};

use super::model::PixelMatrix;
use crate::error::{DatasetError, Result};

/// Decode `path` as RGB and bring it to exactly `rows x cols`.
///
/// The format is sniffed from the file contents, so a mislabelled PNG still
/// loads. Greyscale and palette images are expanded to three channels. An
/// image that already has the target size is returned without resampling.
pub fn load_and_resize(path: &Path, rows: u32, cols: u32) -> Result<PixelMatrix> {
    if rows == 0 || cols == 0 {
        return Err(DatasetError::Validation(format!(
            "target size must be positive, got {rows}x{cols}"
        )));
    }

    let decode_err = |source: ImageError| DatasetError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| decode_err(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)?
        .to_rgb8();

    if img.height() == rows && img.width() == cols {
        return Ok(PixelMatrix::from(img));
    }

    log::trace!(
        "resizing {} from {}x{} to {rows}x{cols}",
        path.display(),
        img.height(),
        img.width()
    );
    let resized = imageops::resize(&img, cols, rows, FilterType::Triangle);
    Ok(PixelMatrix::from(resized))
}
