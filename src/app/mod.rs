mod controller;
mod state;
mod ui;

use crate::config::Settings;
use crate::upload::{ClassifyBackend, HttpBackend};
use controller::UploadController;
use eframe::{egui, App};
use state::{PreviewState, SubmissionState};
use std::sync::Arc;
use std::time::Duration;

pub struct ClassifierApp {
    endpoint: String,
    controller: UploadController,
    /// Texture for the preview, tagged with the selection it was built from.
    preview_texture: Option<(u64, egui::TextureHandle)>,
}

impl ClassifierApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: &Settings) -> Self {
        tracing::info!(endpoint = %settings.endpoint, "initializing image classifier client");
        let backend = HttpBackend::new(settings.endpoint.clone());
        Self::with_backend(backend.endpoint().to_string(), Arc::new(backend))
    }

    pub fn with_backend(endpoint: String, backend: Arc<dyn ClassifyBackend>) -> Self {
        Self {
            endpoint,
            controller: UploadController::new(backend),
            preview_texture: None,
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.controller.poll() {
            ctx.request_repaint();
        }

        match self.controller.preview() {
            PreviewState::Ready(_) => {}
            _ => self.preview_texture = None,
        }

        if self.controller.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }

    fn preview_texture(&mut self, ctx: &egui::Context) -> Option<&egui::TextureHandle> {
        let token = self.controller.preview_token();
        let stale = !matches!(&self.preview_texture, Some((t, _)) if *t == token);
        if stale {
            let image = self.controller.preview().image()?.image.clone()?;
            let texture = ctx.load_texture(
                format!("preview:{token}"),
                image,
                egui::TextureOptions::LINEAR,
            );
            self.preview_texture = Some((token, texture));
        }
        self.preview_texture.as_ref().map(|(_, texture)| texture)
    }
}

impl App for ClassifierApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
