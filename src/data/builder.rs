use std::path::Path;

use super::codec::write_dataset;
use super::image_io::load_and_resize;
use super::model::{Dataset, ImageRecord};
use super::scanner::scan_class_directories;
use crate::cancel::CancellationToken;
use crate::error::{DatasetError, Result};

const PROGRESS_EVERY: usize = 1000;

/// Target resolution for packed images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub rows: u32,
    pub cols: u32,
}

impl BuildOptions {
    /// Square images of `size x size`.
    pub fn square(size: u32) -> Self {
        BuildOptions {
            rows: size,
            cols: size,
        }
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::square(224)
    }
}

/// What happened during one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Records produced by the scan.
    pub found: usize,
    /// Images decoded and stored.
    pub loaded: usize,
    /// Images skipped because they could not be decoded.
    pub failed: usize,
    /// Whether the run stopped early on request.
    pub cancelled: bool,
}

pub struct DatasetBuilder {
    options: BuildOptions,
    cancel: CancellationToken,
}

impl DatasetBuilder {
    pub fn new(options: BuildOptions, cancel: CancellationToken) -> Self {
        DatasetBuilder { options, cancel }
    }

    /// Scan `images_root`, load every image and write the dataset to `output`.
    ///
    /// Fails before writing anything if the scan finds no images. If the
    /// token is cancelled mid-run, the images collected so far are still
    /// written.
    pub fn build(&self, images_root: &Path, output: &Path) -> Result<BuildReport> {
        self.build_with(images_root, output, |_, _| {})
    }

    /// [`build`](Self::build), calling `after_record` with the index and
    /// record once each image has been loaded or skipped.
    pub fn build_with<F>(&self, images_root: &Path, output: &Path, after_record: F) -> Result<BuildReport>
    where
        F: FnMut(usize, &ImageRecord),
    {
        if self.options.rows == 0 || self.options.cols == 0 {
            return Err(DatasetError::Validation(format!(
                "image size must be positive, got {}x{}",
                self.options.rows, self.options.cols
            )));
        }

        log::info!("Scanning image directory {}...", images_root.display());
        let records = scan_class_directories(images_root)?;
        log::info!("Total images found: {}", records.len());

        if records.is_empty() {
            return Err(DatasetError::Configuration(format!(
                "no images found in directory: {}",
                images_root.display()
            )));
        }

        log::info!("Loading and processing images...");
        let (dataset, report) = self.collect_with(&records, after_record);

        log::info!("Saving dataset to: {}", output.display());
        write_dataset(output, &dataset)?;
        log::info!(
            "Dataset saved: {} images ({} skipped{})",
            report.loaded,
            report.failed,
            if report.cancelled { ", interrupted" } else { "" }
        );

        Ok(report)
    }

    /// Load `records` in order into a dataset, skipping unreadable images.
    pub fn collect(&self, records: &[ImageRecord]) -> (Dataset, BuildReport) {
        self.collect_with(records, |_, _| {})
    }

    /// [`collect`](Self::collect), calling `after_record` once each record is handled.
    pub fn collect_with<F>(&self, records: &[ImageRecord], mut after_record: F) -> (Dataset, BuildReport)
    where
        F: FnMut(usize, &ImageRecord),
    {
        let total = records.len();
        let mut dataset = Dataset::with_capacity(total);
        let mut report = BuildReport {
            found: total,
            ..BuildReport::default()
        };

        for (i, record) in records.iter().enumerate() {
            if self.cancel.is_cancelled() {
                log::warn!("Stopped after {i}/{total} images");
                report.cancelled = true;
                break;
            }

            match load_and_resize(&record.path, self.options.rows, self.options.cols) {
                Ok(image) => {
                    dataset.push(image, record.label.clone(), record.numeric_label);
                    report.loaded += 1;
                }
                Err(e) => {
                    log::error!("Error processing image {}: {e}", record.path.display());
                    report.failed += 1;
                }
            }

            if (i + 1) % PROGRESS_EVERY == 0 || i + 1 == total {
                log::info!(
                    "Progress: {}/{total} images processed ({} loaded)",
                    i + 1,
                    report.loaded
                );
            }
            after_record(i, record);
        }

        (dataset, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_jpeg(path: &Path, shade: u8) {
        RgbImage::from_pixel(10, 6, Rgb([shade, 255 - shade, 128]))
            .save(path)
            .unwrap();
    }

    fn record(path: PathBuf, label: &str, numeric_label: u64) -> ImageRecord {
        ImageRecord {
            path,
            label: label.to_string(),
            numeric_label,
        }
    }

    #[test]
    fn collect_skips_broken_images() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("good.jpg");
        let bad = tmp.path().join("bad.jpg");
        write_jpeg(&good, 10);
        fs::write(&bad, b"garbage").unwrap();

        let builder = DatasetBuilder::new(BuildOptions::square(4), CancellationToken::new());
        let (ds, report) = builder.collect(&[
            record(bad, "cat", 0),
            record(good, "dog", 1),
        ]);

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.labels, vec!["dog"]);
        assert_eq!(ds.numeric_labels, vec![1]);
        assert_eq!((ds.images[0].rows, ds.images[0].cols), (4, 4));
        assert_eq!(
            report,
            BuildReport {
                found: 2,
                loaded: 1,
                failed: 1,
                cancelled: false
            }
        );
    }

    #[test]
    fn cancelled_token_stops_before_next_image() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.jpg");
        write_jpeg(&path, 40);

        let token = CancellationToken::new();
        token.cancel();
        let builder = DatasetBuilder::new(BuildOptions::square(4), token);
        let (ds, report) = builder.collect(&[record(path, "cat", 0)]);

        assert!(ds.is_empty());
        assert!(report.cancelled);
        assert_eq!(report.loaded, 0);
    }

    #[test]
    fn cancel_mid_run_keeps_images_loaded_so_far() {
        let tmp = TempDir::new().unwrap();
        let records: Vec<ImageRecord> = (0..5u8)
            .map(|i| {
                let path = tmp.path().join(format!("{i}.jpg"));
                write_jpeg(&path, i * 40);
                record(path, if i < 3 { "cat" } else { "dog" }, u64::from(i >= 3))
            })
            .collect();

        let token = CancellationToken::new();
        let builder = DatasetBuilder::new(BuildOptions::square(4), token.clone());
        let (ds, report) = builder.collect_with(&records, |i, _| {
            if i == 1 {
                token.cancel();
            }
        });

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.labels, vec!["cat", "cat"]);
        assert!(report.cancelled);
        assert_eq!((report.found, report.loaded, report.failed), (5, 2, 0));
    }

    #[test]
    fn build_cancelled_mid_run_writes_the_first_images() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("images");
        let cat = root.join("n001_cat");
        let dog = root.join("n002_dog");
        fs::create_dir_all(&cat).unwrap();
        fs::create_dir_all(&dog).unwrap();
        write_jpeg(&cat.join("a.jpg"), 10);
        write_jpeg(&cat.join("b.jpg"), 20);
        write_jpeg(&dog.join("c.jpg"), 30);
        write_jpeg(&dog.join("d.jpg"), 40);
        let output = tmp.path().join("out.dat");

        let token = CancellationToken::new();
        let builder = DatasetBuilder::new(BuildOptions::square(8), token.clone());
        let report = builder
            .build_with(&root, &output, |i, _| {
                if i == 2 {
                    token.cancel();
                }
            })
            .unwrap();

        assert!(report.cancelled);
        assert_eq!(report.loaded, 3);

        let ds = crate::data::codec::read_dataset(&output).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.labels, vec!["cat", "cat", "dog"]);
        assert_eq!(ds.numeric_labels, vec![0, 0, 1]);
        assert!(ds.images.iter().all(|m| (m.rows, m.cols) == (8, 8)));
    }

    #[test]
    fn empty_scan_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("images");
        fs::create_dir_all(root.join("n001_cat")).unwrap();
        let output = tmp.path().join("out.dat");

        let builder = DatasetBuilder::new(BuildOptions::square(8), CancellationToken::new());
        let err = builder.build(&root, &output).unwrap_err();

        assert!(matches!(err, DatasetError::Configuration(_)));
        assert!(!output.exists());
    }

    #[test]
    fn cancelled_build_still_writes_partial_dataset() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("images");
        let class = root.join("n001_cat");
        fs::create_dir_all(&class).unwrap();
        write_jpeg(&class.join("a.jpg"), 1);
        let output = tmp.path().join("out.dat");

        let token = CancellationToken::new();
        token.cancel();
        let report = DatasetBuilder::new(BuildOptions::square(8), token)
            .build(&root, &output)
            .unwrap();

        assert!(report.cancelled);
        assert!(output.exists());
        assert!(crate::data::codec::read_dataset(&output).unwrap().is_empty());
    }

    #[test]
    fn zero_size_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let builder = DatasetBuilder::new(BuildOptions::square(0), CancellationToken::new());
        let err = builder
            .build(tmp.path(), &tmp.path().join("out.dat"))
            .unwrap_err();
        assert!(matches!(err, DatasetError::Validation(_)));
    }
}
