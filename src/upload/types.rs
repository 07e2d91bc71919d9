use crate::utils::file_size::format_size;
use crate::utils::label::{capitalize_words, format_confidence};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A file chosen in the picker. Content is read on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Self {
            path: path.to_path_buf(),
            name,
            size,
            mime,
        }
    }

    pub fn describe(&self) -> String {
        format!("{} ({})", self.name, format_size(self.size))
    }
}

/// The bytes sent as the `file` part of the multipart body.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub prediction: String,
    /// Expected in [0,1]; `None` when the backend omitted it.
    pub confidence: Option<f64>,
}

impl Classification {
    pub fn label(&self) -> String {
        capitalize_words(&self.prediction)
    }

    pub fn confidence_text(&self) -> String {
        format_confidence(self.confidence)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Prediction: {}\nConfidence: {}",
            self.label(),
            self.confidence_text()
        )
    }
}

/// Terminal failures of a submission. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please select an image.")]
    NoFileSelected,
    #[error("Invalid response from backend.")]
    InvalidResponse,
    #[error("Error: {0}")]
    Backend(String),
    #[error("Could not classify the image.")]
    Unclassified,
    #[error("Error connecting to backend.")]
    Connection,
}

pub type SubmitOutcome = Result<Classification, SubmitError>;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn submit_errors_render_user_facing_text() {
        assert_eq!(
            SubmitError::NoFileSelected.to_string(),
            "Please select an image."
        );
        assert_eq!(
            SubmitError::Backend("unsupported format".into()).to_string(),
            "Error: unsupported format"
        );
        assert_eq!(
            SubmitError::Connection.to_string(),
            "Error connecting to backend."
        );
    }

    #[test]
    fn classification_display_combines_label_and_percentage() {
        let result = Classification {
            prediction: "cat".into(),
            confidence: Some(0.8734),
        };
        let text = result.to_string();
        assert!(text.contains("Cat"), "{text}");
        assert!(text.contains("87.34%"), "{text}");
    }

    #[test]
    fn selected_file_guesses_mime_and_size() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&[0u8; 2048]).unwrap();

        let selected = SelectedFile::from_path(file.path());
        assert_eq!(selected.mime, "image/png");
        assert_eq!(selected.size, 2048);
        assert!(selected.describe().ends_with("(2.00 KB)"));
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        let selected = SelectedFile::from_path(Path::new("/nonexistent/blob.zzz"));
        assert_eq!(selected.mime, "application/octet-stream");
        assert_eq!(selected.name, "blob.zzz");
        assert_eq!(selected.size, 0);
    }
}
