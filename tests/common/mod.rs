#![allow(dead_code)]
//! Fixture trees shared by the integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

pub fn write_jpeg(path: &Path, width: u32, height: u32, shade: u8) {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([shade, (x % 256) as u8, (y % 256) as u8])
    })
    .save(path)
    .unwrap();
}

/// `n001_cat` with three good images and one corrupt one, `n002_dog` with two.
pub fn cat_dog_tree(root: &Path) -> PathBuf {
    let images = root.join("images");
    let cat = images.join("n001_cat");
    let dog = images.join("n002_dog");
    fs::create_dir_all(&cat).unwrap();
    fs::create_dir_all(&dog).unwrap();

    write_jpeg(&cat.join("c1.jpg"), 80, 60, 10);
    write_jpeg(&cat.join("c2.JPG"), 64, 64, 20);
    write_jpeg(&cat.join("c3.jpg"), 100, 40, 30);
    fs::write(cat.join("c4.jpg"), b"\xff\xd8 truncated").unwrap();
    fs::write(cat.join("readme.txt"), b"not an image").unwrap();

    write_jpeg(&dog.join("d1.jpg"), 32, 32, 40);
    write_jpeg(&dog.join("d2.jpg"), 70, 90, 50);

    images
}
