use eframe::egui;

use crate::state::PreviewState;
use crate::ui::gallery;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PreviewApp {
    pub state: PreviewState,
    textures: Option<gallery::Textures>,
}

impl PreviewApp {
    pub fn new(state: PreviewState) -> Self {
        Self {
            state,
            textures: None,
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Textures are uploaded once, on the first frame.
        let textures = self
            .textures
            .get_or_insert_with(|| gallery::Textures::upload(ctx, &self.state));

        // ---- Top panel: split summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            gallery::summary_bar(ui, &self.state);
        });

        // ---- Central panel: sample grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                gallery::sample_row(ui, "Training set", &self.state.train, &textures.train);
                ui.separator();
                gallery::sample_row(ui, "Testing set", &self.state.test, &textures.test);
            });
        });
    }
}
