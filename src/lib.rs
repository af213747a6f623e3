//! Pack a tree of labelled JPEG images into one dataset file and split it
//! into training and test sets.

pub mod cancel;
pub mod data;
pub mod error;

pub use cancel::{register_interrupt_handler, CancellationToken};
pub use data::builder::{BuildOptions, BuildReport, DatasetBuilder};
pub use data::codec::{read_dataset, write_dataset};
pub use data::model::{Dataset, ImageRecord, PixelMatrix, SplitDataset};
pub use data::scanner::scan_class_directories;
pub use data::split::{load_and_split, split_dataset, DEFAULT_TEST_FRACTION};
pub use error::{DatasetError, Result};
