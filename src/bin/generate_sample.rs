use std::f32::consts::TAU;
use std::fs;
use std::path::PathBuf;

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Base colour and stripe frequency of each synthetic class.
const CLASSES: [(&str, [f32; 3], f32); 3] = [
    ("n001_red_stripes", [220.0, 60.0, 50.0], 3.0),
    ("n002_green_waves", [60.0, 190.0, 80.0], 5.0),
    ("n003_blue_rings", [50.0, 90.0, 210.0], 8.0),
];
const IMAGES_PER_CLASS: usize = 12;

fn generate_image(base: [f32; 3], freq: f32, size: u32, rng: &mut StdRng) -> RgbImage {
    let phase: f32 = rng.gen_range(0.0..TAU);
    RgbImage::from_fn(size, size, |x, y| {
        let t = (x as f32 + y as f32 * 0.5) / size as f32;
        let wave = ((t * freq * TAU + phase).sin() + 1.0) * 0.5;
        let mut px = [0u8; 3];
        for (c, out) in px.iter_mut().enumerate() {
            let noise: f32 = rng.gen_range(-12.0..12.0);
            *out = (base[c] * (0.4 + 0.6 * wave) + noise).clamp(0.0, 255.0) as u8;
        }
        Rgb(px)
    })
}

fn main() -> anyhow::Result<()> {
    let root = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "sample_images".to_string()),
    );
    let mut rng = StdRng::seed_from_u64(42);

    let mut written = 0;
    for (class, base, freq) in CLASSES {
        let dir = root.join(class);
        fs::create_dir_all(&dir)?;
        for i in 0..IMAGES_PER_CLASS {
            // Mixed sizes so the packer has something to resize.
            let size = 48 + 16 * (i as u32 % 4);
            let img = generate_image(base, freq, size, &mut rng);
            img.save(dir.join(format!("{i:04}.jpg")))?;
            written += 1;
        }
    }

    println!(
        "Wrote {written} images in {} classes to {}",
        CLASSES.len(),
        root.display()
    );
    Ok(())
}
