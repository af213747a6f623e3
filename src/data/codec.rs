//! On-disk dataset format.
//!
//! The file holds three bincode-encoded sections back to back:
//!
//! 1. `Vec<PixelMatrix>` – the images
//! 2. `Vec<String>`      – textual labels
//! 3. `Vec<u64>`         – numeric labels
//!
//! Every section carries its own length prefix, so the reader can tell a
//! truncated file from a complete one. No length prefix may claim more
//! bytes than the file holds, and nothing may follow the last section.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use bincode::Options;
use serde::de::DeserializeOwned;

use super::model::{Dataset, PixelMatrix};
use crate::error::{DatasetError, Result};

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_little_endian()
}

/// Write `dataset` to `path`.
///
/// The bytes go to a sibling `*.partial` file first and are renamed into
/// place once flushed, so `path` never holds a half-written dataset.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    dataset.validate()?;

    let partial = partial_path(path);
    let result = write_sections(&partial, dataset)
        .and_then(|()| fs::rename(&partial, path).map_err(|e| DatasetError::io(path, e)));
    if result.is_err() {
        let _ = fs::remove_file(&partial);
    }
    result
}

fn write_sections(path: &Path, dataset: &Dataset) -> Result<()> {
    let file = File::create(path).map_err(|e| DatasetError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    let encode_err = |e: bincode::Error| match *e {
        bincode::ErrorKind::Io(io) => DatasetError::io(path, io),
        other => DatasetError::Format(other.to_string()),
    };
    codec()
        .serialize_into(&mut writer, &dataset.images)
        .map_err(encode_err)?;
    codec()
        .serialize_into(&mut writer, &dataset.labels)
        .map_err(encode_err)?;
    codec()
        .serialize_into(&mut writer, &dataset.numeric_labels)
        .map_err(encode_err)?;

    writer.flush().map_err(|e| DatasetError::io(path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| DatasetError::io(path, e))
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

/// Read a dataset written by [`write_dataset`].
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
    let file_len = file
        .metadata()
        .map_err(|e| DatasetError::io(path, e))?
        .len();
    let mut reader = BufReader::new(file);

    let images: Vec<PixelMatrix> = read_section(&mut reader, file_len, "images")?;
    let labels: Vec<String> = read_section(&mut reader, file_len, "labels")?;
    let numeric_labels: Vec<u64> = read_section(&mut reader, file_len, "numeric labels")?;

    let trailing = reader.fill_buf().map_err(|e| DatasetError::io(path, e))?;
    if !trailing.is_empty() {
        return Err(DatasetError::Format(
            "unexpected bytes after numeric labels section".to_string(),
        ));
    }

    if let Some(i) = images.iter().position(|m| !m.is_consistent()) {
        return Err(DatasetError::Format(format!(
            "image {i} has {} bytes, expected {}",
            images[i].pixels.len(),
            PixelMatrix::expected_len(images[i].rows, images[i].cols)
        )));
    }

    let dataset = Dataset {
        images,
        labels,
        numeric_labels,
    };
    dataset.validate()?;
    Ok(dataset)
}

// The limit is checked before bincode allocates for a length prefix, so a
// corrupt prefix fails here instead of exhausting memory.
fn read_section<T: DeserializeOwned, R: Read>(
    reader: &mut R,
    limit: u64,
    section: &str,
) -> Result<T> {
    codec()
        .with_limit(limit)
        .deserialize_from(reader)
        .map_err(|e| DatasetError::Format(format!("reading {section} section: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn matrix(seed: u8) -> PixelMatrix {
        PixelMatrix {
            rows: 2,
            cols: 3,
            pixels: (0..18).map(|i| seed.wrapping_add(i)).collect(),
        }
    }

    fn sample() -> Dataset {
        let mut ds = Dataset::default();
        ds.push(matrix(0), "cat".into(), 0);
        ds.push(matrix(50), "cat".into(), 0);
        ds.push(matrix(100), "dog".into(), 1);
        ds
    }

    #[test]
    fn written_dataset_reads_back_identically() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("set.dat");
        let ds = sample();

        write_dataset(&path, &ds).unwrap();
        assert!(!partial_path(&path).exists());
        assert_eq!(read_dataset(&path).unwrap(), ds);
    }

    #[test]
    fn empty_dataset_is_valid() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.dat");
        write_dataset(&path, &Dataset::default()).unwrap();
        assert!(read_dataset(&path).unwrap().is_empty());
    }

    #[test]
    fn truncated_file_is_a_format_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("set.dat");
        write_dataset(&path, &sample()).unwrap();

        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() - 5]).unwrap();
        assert!(matches!(read_dataset(&path), Err(DatasetError::Format(_))));
    }

    #[test]
    fn mismatched_sections_are_a_format_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("skewed.dat");

        let mut file = File::create(&path).unwrap();
        codec().serialize_into(&mut file, &vec![matrix(1)]).unwrap();
        codec()
            .serialize_into(&mut file, &vec!["a".to_string(), "b".to_string()])
            .unwrap();
        codec().serialize_into(&mut file, &vec![0u64, 1]).unwrap();
        drop(file);

        assert!(matches!(read_dataset(&path), Err(DatasetError::Format(_))));
    }

    #[test]
    fn oversized_label_length_is_a_format_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("huge.dat");

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0u64.to_le_bytes());
        bytes.extend_from_slice(&1u64.to_le_bytes());
        bytes.extend_from_slice(&(1u64 << 40).to_le_bytes());
        bytes.extend_from_slice(b"abc");
        fs::write(&path, &bytes).unwrap();

        assert!(matches!(read_dataset(&path), Err(DatasetError::Format(_))));
    }

    #[test]
    fn oversized_image_count_is_a_format_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("many.dat");
        fs::write(&path, u64::MAX.to_le_bytes()).unwrap();

        assert!(matches!(read_dataset(&path), Err(DatasetError::Format(_))));
    }

    #[test]
    fn trailing_bytes_are_a_format_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("set.dat");
        write_dataset(&path, &sample()).unwrap();

        let mut bytes = fs::read(&path).unwrap();
        bytes.extend_from_slice(b"junk");
        fs::write(&path, &bytes).unwrap();
        assert!(matches!(read_dataset(&path), Err(DatasetError::Format(_))));
    }

    #[test]
    fn unwritable_destination_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("no").join("such").join("dir.dat");
        let err = write_dataset(&path, &sample()).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = read_dataset(&tmp.path().join("absent.dat")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
