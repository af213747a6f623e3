/// Data layer: scanning, decoding, packing and splitting.
///
/// Architecture:
/// ```text
///  <root>/<id>_<description>/*.jpg
///        │
///        ▼
///   ┌──────────┐
///   │ scanner  │  class dirs → Vec<ImageRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ builder  │  image_io per record → Dataset → codec::write_dataset
///   └──────────┘
///        │  dataset file
///        ▼
///   ┌──────────┐
///   │  split   │  codec::read_dataset → shuffle → SplitDataset
///   └──────────┘
/// ```

pub mod builder;
pub mod codec;
pub mod image_io;
pub mod model;
pub mod scanner;
pub mod split;
