use imagenet_packer::{Dataset, PixelMatrix, SplitDataset};

// ---------------------------------------------------------------------------
// Preview state
// ---------------------------------------------------------------------------

/// One sample picked for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSample {
    pub title: String,
    pub label: String,
    pub numeric_label: u64,
    pub image: PixelMatrix,
}

/// The samples shown by the preview, independent of rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewState {
    pub train_total: usize,
    pub test_total: usize,
    pub train: Vec<PreviewSample>,
    pub test: Vec<PreviewSample>,
}

impl PreviewState {
    /// Take the first `per_half` samples of each half of `split`.
    pub fn from_split(split: &SplitDataset, per_half: usize) -> Self {
        PreviewState {
            train_total: split.train.len(),
            test_total: split.test.len(),
            train: pick(&split.train, per_half, "Training"),
            test: pick(&split.test, per_half, "Testing"),
        }
    }
}

fn pick(dataset: &Dataset, n: usize, kind: &str) -> Vec<PreviewSample> {
    (0..n.min(dataset.len()))
        .map(|i| PreviewSample {
            title: format!("{kind} Image #{}", i + 1),
            label: dataset.labels[i].clone(),
            numeric_label: dataset.numeric_labels[i],
            image: dataset.images[i].clone(),
        })
        .collect()
}
