use std::fmt;
use std::path::PathBuf;

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// PixelMatrix – one decoded, resized image
// ---------------------------------------------------------------------------

/// A 3-channel image stored row-major, one `[r, g, b]` triple per pixel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelMatrix {
    pub rows: u32,
    pub cols: u32,
    pub pixels: Vec<u8>,
}

impl PixelMatrix {
    /// Number of bytes a `rows x cols` RGB buffer must hold.
    pub fn expected_len(rows: u32, cols: u32) -> usize {
        rows as usize * cols as usize * 3
    }

    /// Whether the pixel buffer agrees with the declared dimensions.
    pub fn is_consistent(&self) -> bool {
        self.pixels.len() == Self::expected_len(self.rows, self.cols)
    }

    /// The `[r, g, b]` value at (`row`, `col`), if in bounds.
    pub fn pixel(&self, row: u32, col: u32) -> Option<[u8; 3]> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let i = (row as usize * self.cols as usize + col as usize) * 3;
        let px = self.pixels.get(i..i + 3)?;
        Some([px[0], px[1], px[2]])
    }
}

impl From<RgbImage> for PixelMatrix {
    fn from(img: RgbImage) -> Self {
        let (cols, rows) = img.dimensions();
        PixelMatrix {
            rows,
            cols,
            pixels: img.into_raw(),
        }
    }
}

impl TryFrom<PixelMatrix> for RgbImage {
    type Error = DatasetError;

    fn try_from(m: PixelMatrix) -> Result<Self> {
        let (rows, cols) = (m.rows, m.cols);
        RgbImage::from_raw(cols, rows, m.pixels).ok_or_else(|| {
            DatasetError::Format(format!("pixel buffer does not fit {rows}x{cols}"))
        })
    }
}

impl fmt::Display for PixelMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} rgb", self.rows, self.cols)
    }
}

// ---------------------------------------------------------------------------
// ImageRecord – one file found by the scanner
// ---------------------------------------------------------------------------

/// A labelled image file found while scanning the class directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub path: PathBuf,
    /// Class description, e.g. `"cat"` for directory `n001_cat`.
    pub label: String,
    /// Rank of the class directory in sorted order.
    pub numeric_label: u64,
}

// ---------------------------------------------------------------------------
// Dataset – three aligned sequences
// ---------------------------------------------------------------------------

/// Images with their textual and numeric labels. Index `i` of each vector
/// refers to the same sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub images: Vec<PixelMatrix>,
    pub labels: Vec<String>,
    pub numeric_labels: Vec<u64>,
}

impl Dataset {
    pub fn with_capacity(n: usize) -> Self {
        Dataset {
            images: Vec::with_capacity(n),
            labels: Vec::with_capacity(n),
            numeric_labels: Vec::with_capacity(n),
        }
    }

    /// Append one sample to all three sequences.
    pub fn push(&mut self, image: PixelMatrix, label: String, numeric_label: u64) {
        self.images.push(image);
        self.labels.push(label);
        self.numeric_labels.push(numeric_label);
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Check that the three sequences line up.
    pub fn validate(&self) -> Result<()> {
        let (n, l, k) = (
            self.images.len(),
            self.labels.len(),
            self.numeric_labels.len(),
        );
        if n != l || n != k {
            return Err(DatasetError::Format(format!(
                "section lengths disagree: {n} images, {l} labels, {k} numeric labels"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SplitDataset – result of a random train/test partition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitDataset {
    pub train: Dataset,
    pub test: Dataset,
}

impl SplitDataset {
    pub fn train_numeric_labels(&self) -> &[u64] {
        &self.train.numeric_labels
    }

    pub fn test_numeric_labels(&self) -> &[u64] {
        &self.test.numeric_labels
    }
}
