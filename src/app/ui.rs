use super::{ClassifierApp, PreviewState, SubmissionState};
use crate::upload::Classification;
use eframe::egui::{self, Align, Color32, RichText};
use rfd::FileDialog;

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
const LABEL: Color32 = Color32::from_rgb(147, 197, 253);
const SCORE: Color32 = Color32::from_rgb(134, 239, 172);
const PREVIEW_MAX_HEIGHT: f32 = 256.0;

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "tiff"];

impl ClassifierApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let footer_height = 40.0;
            let footer_margin = 15.0;
            let content_height = ui.available_height() - footer_height - footer_margin;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Image Classifier");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Upload an image to get a prediction from the classifier")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);
                    self.render_file_picker(ui);

                    ui.add_space(10.0);
                    self.render_preview(ui, ctx);

                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        let submitting = self.controller.submission().is_submitting();
                        let label = if submitting {
                            "⏳ Classifying..."
                        } else {
                            "🔍 Classify"
                        };
                        let button = egui::Button::new(label).min_size(egui::vec2(200.0, 40.0));
                        if ui.add(button).clicked() {
                            self.controller.submit();
                        }
                    });

                    ui.add_space(20.0);
                    self.render_result(ui);
                    ui.add_space(20.0);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(footer_margin);
                self.render_footer(ui);
            });
        });
    }

    fn render_file_picker(&mut self, ui: &mut egui::Ui) {
        let mut selection_changed = None;

        ui.group(|ui| {
            ui.horizontal(|ui| {
                if ui.button("📁 Select Image").clicked() {
                    if let Some(path) = FileDialog::new()
                        .add_filter("Images", &IMAGE_EXTENSIONS)
                        .pick_file()
                    {
                        selection_changed = Some(Some(path));
                    }
                }

                if let Some(file) = self.controller.selected() {
                    ui.label(format!("Selected: {}", file.describe()));
                    if ui.small_button("✖ Clear").clicked() {
                        selection_changed = Some(None);
                    }
                } else {
                    ui.label(RichText::new("No file selected").weak());
                }
            });

            if let Some(message) = self.controller.preview().message() {
                ui.colored_label(ERROR, message);
            }
        });

        if let Some(path) = selection_changed {
            self.controller.select_file(path);
        }
    }

    fn render_preview(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let loading = match self.controller.preview() {
            PreviewState::Hidden | PreviewState::Failed => return,
            PreviewState::Loading => true,
            PreviewState::Ready(_) => false,
        };
        if loading {
            ui.vertical_centered(|ui| {
                ui.spinner();
            });
            return;
        }

        let available_width = ui.available_width();
        match self.preview_texture(ctx) {
            Some(texture) => {
                let size = fit_preview(texture.size_vec2(), available_width);
                let image = egui::load::SizedTexture::new(texture.id(), size);
                ui.vertical_centered(|ui| {
                    ui.image(image);
                });
            }
            None => {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Preview unavailable for this file").weak());
                });
            }
        }
    }

    fn render_result(&self, ui: &mut egui::Ui) {
        let submission = self.controller.submission();
        let Some(text) = submission.result_text() else {
            return;
        };

        ui.group(|ui| {
            ui.set_width(ui.available_width());
            match submission {
                SubmissionState::Finished(Ok(classification)) => {
                    render_classification(ui, classification);
                }
                SubmissionState::Submitting => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(text);
                    });
                }
                _ if submission.is_error() => {
                    ui.colored_label(ERROR, text);
                }
                _ => {
                    ui.label(text);
                }
            }
        });
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.horizontal_centered(|ui| {
                ui.label(RichText::new("Endpoint:").weak());
                ui.colored_label(ACCENT, &self.endpoint);
            });
        });
    }
}

fn render_classification(ui: &mut egui::Ui, classification: &Classification) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Prediction:").strong().size(18.0));
        ui.label(
            RichText::new(classification.label())
                .color(LABEL)
                .strong()
                .size(18.0),
        );
    });
    ui.horizontal(|ui| {
        ui.label(RichText::new("Confidence:").strong());
        ui.colored_label(SCORE, classification.confidence_text());
    });
}

/// Scales `size` down to fit the preview box, never up.
fn fit_preview(size: egui::Vec2, max_width: f32) -> egui::Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (max_width / size.x).min(PREVIEW_MAX_HEIGHT / size.y).min(1.0);
    size * scale
}
