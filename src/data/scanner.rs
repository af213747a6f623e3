use std::fs;
use std::path::{Path, PathBuf};

use super::model::ImageRecord;
use crate::error::{DatasetError, Result};

const IMAGE_SUFFIX: &str = ".jpg";

/// Class description from a directory named `<id>_<description>`.
///
/// Everything after the first `_` is kept, so `n02_golden_retriever`
/// becomes `golden_retriever`.
pub fn extract_class_description(dir_name: &str) -> Result<String> {
    match dir_name.split_once('_') {
        Some((_, desc)) => Ok(desc.to_string()),
        None => Err(DatasetError::Configuration(format!(
            "class directory '{dir_name}' is not named <id>_<description>"
        ))),
    }
}

/// Whether a file name carries the `.jpg` suffix (any case).
pub fn is_jpeg_name(name: &str) -> bool {
    name.len() > IMAGE_SUFFIX.len()
        && name
            .get(name.len() - IMAGE_SUFFIX.len()..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(IMAGE_SUFFIX))
}

/// List every `.jpg` under `root/<class>/`, labelled by class.
///
/// Class directories are ranked by name, so the numeric label of a class
/// is stable across runs over the same tree. A class with no images still
/// consumes its rank.
pub fn scan_class_directories(root: &Path) -> Result<Vec<ImageRecord>> {
    if !root.is_dir() {
        return Err(DatasetError::NotFound(root.to_path_buf()));
    }

    let mut class_dirs: Vec<(String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| DatasetError::io(root, e))? {
        let entry = entry.map_err(|e| DatasetError::io(root, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().into_string().map_err(|raw| {
            DatasetError::Configuration(format!(
                "class directory name {raw:?} is not valid UTF-8"
            ))
        })?;
        class_dirs.push((name, path));
    }
    class_dirs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut records = Vec::new();
    for (numeric_label, (name, dir)) in class_dirs.iter().enumerate() {
        let label = extract_class_description(name)?;
        let files = list_jpeg_files(dir)?;
        log::debug!("class {numeric_label} '{label}': {} images", files.len());

        records.extend(files.into_iter().map(|path| ImageRecord {
            path,
            label: label.clone(),
            numeric_label: numeric_label as u64,
        }));
    }

    Ok(records)
}

fn list_jpeg_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| DatasetError::io(dir, e))? {
        let entry = entry.map_err(|e| DatasetError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && is_jpeg_name(&entry.file_name().to_string_lossy()) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
