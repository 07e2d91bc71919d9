use super::state::{PreviewState, SubmissionState};
use crate::upload::{
    ClassifyBackend, PreviewError, PreviewImage, SelectedFile, SubmitError, SubmitOutcome, Upload,
};
use std::path::PathBuf;
use std::sync::mpsc::{self as std_mpsc, Receiver, Sender};
use std::sync::Arc;

enum ControllerEvent {
    PreviewLoaded {
        selection: u64,
        result: Result<PreviewImage, PreviewError>,
    },
    Classified {
        token: u64,
        outcome: SubmitOutcome,
    },
}

/// Owns the current selection, its preview and the submission cycle.
///
/// Background work reports back through a channel drained by [`poll`]. Every
/// selection and every submission attempt gets a fresh token, and results
/// carrying an older token are dropped, so only the latest outcome is shown.
///
/// [`poll`]: UploadController::poll
pub struct UploadController {
    backend: Arc<dyn ClassifyBackend>,
    selected: Option<SelectedFile>,
    selection_token: u64,
    submission_token: u64,
    preview: PreviewState,
    submission: SubmissionState,
    event_sender: Sender<ControllerEvent>,
    event_receiver: Receiver<ControllerEvent>,
}

impl UploadController {
    pub fn new(backend: Arc<dyn ClassifyBackend>) -> Self {
        let (event_sender, event_receiver) = std_mpsc::channel();
        Self {
            backend,
            selected: None,
            selection_token: 0,
            submission_token: 0,
            preview: PreviewState::Hidden,
            submission: SubmissionState::Idle,
            event_sender,
            event_receiver,
        }
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn preview_token(&self) -> u64 {
        self.selection_token
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn result_text(&self) -> Option<String> {
        self.submission.result_text()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.preview, PreviewState::Loading) || self.submission.is_submitting()
    }

    /// Replaces the selection. `None` clears it and hides the preview.
    pub fn select_file(&mut self, path: Option<PathBuf>) {
        self.selection_token += 1;
        let selection = self.selection_token;

        let Some(path) = path else {
            tracing::info!("selection cleared");
            self.selected = None;
            self.preview = PreviewState::Hidden;
            return;
        };

        let file = SelectedFile::from_path(&path);
        tracing::info!(file = %file.name, mime = %file.mime, size = file.size, "file selected");
        self.selected = Some(file.clone());
        self.preview = PreviewState::Loading;

        let sender = self.event_sender.clone();
        std::thread::spawn(move || {
            let result = PreviewImage::load(&file);
            sender
                .send(ControllerEvent::PreviewLoaded { selection, result })
                .unwrap_or_default();
        });
    }

    /// Starts one submission cycle for the current selection.
    pub fn submit(&mut self) {
        self.submission_token += 1;
        let token = self.submission_token;

        let Some(file) = self.selected.clone() else {
            tracing::info!("submit rejected: no file selected");
            self.submission = SubmissionState::Rejected(SubmitError::NoFileSelected);
            return;
        };

        tracing::info!(token, file = %file.name, "submitting image for classification");
        self.submission = SubmissionState::Submitting;

        let backend = Arc::clone(&self.backend);
        let sender = self.event_sender.clone();
        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(Self::classify(backend, file)),
                Err(e) => {
                    tracing::error!("failed to start async runtime: {}", e);
                    Err(SubmitError::Connection)
                }
            };
            sender
                .send(ControllerEvent::Classified { token, outcome })
                .unwrap_or_default();
        });
    }

    async fn classify(backend: Arc<dyn ClassifyBackend>, file: SelectedFile) -> SubmitOutcome {
        let bytes = match tokio::fs::read(&file.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("failed to read {} for upload: {}", file.path.display(), e);
                return Err(SubmitError::Connection);
            }
        };

        backend
            .classify(Upload {
                file_name: file.name,
                mime: file.mime,
                bytes,
            })
            .await
    }

    /// Applies finished background work. Returns true when anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                ControllerEvent::PreviewLoaded { selection, result } => {
                    if selection != self.selection_token {
                        tracing::debug!(selection, "discarding stale preview");
                        continue;
                    }
                    self.preview = match result {
                        Ok(preview) => PreviewState::Ready(preview),
                        Err(e) => {
                            tracing::warn!("preview failed: {}", e);
                            PreviewState::Failed
                        }
                    };
                    changed = true;
                }
                ControllerEvent::Classified { token, outcome } => {
                    if token != self.submission_token {
                        tracing::debug!(
                            token,
                            latest = self.submission_token,
                            "discarding stale response"
                        );
                        continue;
                    }
                    match &outcome {
                        Ok(c) => tracing::info!(
                            token,
                            prediction = %c.prediction,
                            confidence = ?c.confidence,
                            "classified"
                        ),
                        Err(e) => tracing::info!(token, "classification failed: {}", e),
                    }
                    self.submission = SubmissionState::Finished(outcome);
                    changed = true;
                }
            }
        }

        changed
    }
}
