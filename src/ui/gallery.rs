use eframe::egui::{self, load::SizedTexture, ColorImage, RichText, TextureHandle, Ui};

use crate::state::{PreviewSample, PreviewState};

const THUMBNAIL_SIZE: f32 = 192.0;

/// GPU copies of the preview images, one per sample.
pub struct Textures {
    pub train: Vec<TextureHandle>,
    pub test: Vec<TextureHandle>,
}

impl Textures {
    pub fn upload(ctx: &egui::Context, state: &PreviewState) -> Self {
        Textures {
            train: upload_all(ctx, &state.train),
            test: upload_all(ctx, &state.test),
        }
    }
}

fn upload_all(ctx: &egui::Context, samples: &[PreviewSample]) -> Vec<TextureHandle> {
    samples
        .iter()
        .map(|s| {
            let size = [s.image.cols as usize, s.image.rows as usize];
            let image = ColorImage::from_rgb(size, &s.image.pixels);
            ctx.load_texture(&s.title, image, egui::TextureOptions::NEAREST)
        })
        .collect()
}

/// Render the one-line summary of the split.
pub fn summary_bar(ui: &mut Ui, state: &PreviewState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("Training set: {} images", state.train_total));
        ui.separator();
        ui.label(format!("Testing set: {} images", state.test_total));
    });
}

/// Render a heading and a row of labelled thumbnails.
pub fn sample_row(ui: &mut Ui, heading: &str, samples: &[PreviewSample], textures: &[TextureHandle]) {
    ui.heading(heading);
    if samples.is_empty() {
        ui.label("No images.");
        return;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (sample, texture) in samples.iter().zip(textures) {
            ui.vertical(|ui: &mut Ui| {
                ui.add(
                    egui::Image::new(SizedTexture::from_handle(texture))
                        .fit_to_exact_size(egui::vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE)),
                );
                ui.label(RichText::new(&sample.title).strong());
                ui.label(format!("Label: {} ({})", sample.numeric_label, sample.label));
            });
        }
    });
}
