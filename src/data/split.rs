use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use super::codec::read_dataset;
use super::model::{Dataset, SplitDataset};
use crate::error::{DatasetError, Result};

/// Share of samples held out for testing when none is given.
pub const DEFAULT_TEST_FRACTION: f64 = 0.05;

/// Index separating train from test in a shuffled set of `n` samples.
pub fn split_point(n: usize, test_fraction: f64) -> usize {
    (n as f64 * (1.0 - test_fraction)).floor() as usize
}

fn check_fraction(test_fraction: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&test_fraction) {
        return Err(DatasetError::Validation(format!(
            "test fraction must be within [0, 1], got {test_fraction}"
        )));
    }
    Ok(())
}

/// Shuffle `dataset` with `rng` and cut it into train and test halves.
///
/// The first `split_point` shuffled samples train, the rest test; both
/// halves keep the shuffled order.
pub fn split_dataset<R: Rng + ?Sized>(
    dataset: Dataset,
    test_fraction: f64,
    rng: &mut R,
) -> Result<SplitDataset> {
    check_fraction(test_fraction)?;
    dataset.validate()?;

    let n = dataset.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    let cut = split_point(n, test_fraction).min(n);
    let mut train = Dataset::with_capacity(cut);
    let mut test = Dataset::with_capacity(n - cut);

    // Move samples out by index without cloning pixel buffers.
    let mut slots: Vec<_> = dataset
        .images
        .into_iter()
        .zip(dataset.labels)
        .zip(dataset.numeric_labels)
        .map(Some)
        .collect();

    for (rank, idx) in order.into_iter().enumerate() {
        let Some(((image, label), numeric_label)) = slots[idx].take() else {
            continue;
        };
        let half = if rank < cut { &mut train } else { &mut test };
        half.push(image, label, numeric_label);
    }

    Ok(SplitDataset { train, test })
}

/// Read the dataset at `path` and split it with a freshly seeded RNG.
pub fn load_and_split(path: &Path, test_fraction: f64) -> Result<SplitDataset> {
    check_fraction(test_fraction)?;
    let dataset = read_dataset(path)?;
    log::debug!("loaded {} samples from {}", dataset.len(), path.display());
    split_dataset(dataset, test_fraction, &mut rand::thread_rng())
}
