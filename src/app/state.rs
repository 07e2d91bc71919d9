use crate::upload::{PreviewImage, SubmitError, SubmitOutcome};

pub const CLASSIFYING_TEXT: &str = "Classifying...";
pub const PREVIEW_READ_FAILED_TEXT: &str = "Could not read the selected file.";

#[derive(Debug, Clone, Default)]
pub enum PreviewState {
    #[default]
    Hidden,
    Loading,
    Ready(PreviewImage),
    Failed,
}

impl PreviewState {
    pub fn is_visible(&self) -> bool {
        matches!(self, PreviewState::Ready(_))
    }

    pub fn image(&self) -> Option<&PreviewImage> {
        match self {
            PreviewState::Ready(preview) => Some(preview),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            PreviewState::Failed => Some(PREVIEW_READ_FAILED_TEXT),
            _ => None,
        }
    }
}

/// Where the current submission cycle stands.
#[derive(Debug, Clone, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// Local validation failed; no request was made.
    Rejected(SubmitError),
    Submitting,
    Finished(SubmitOutcome),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// Text for the shared result area; `None` keeps the area hidden.
    pub fn result_text(&self) -> Option<String> {
        match self {
            SubmissionState::Idle => None,
            SubmissionState::Rejected(err) => Some(err.to_string()),
            SubmissionState::Submitting => Some(CLASSIFYING_TEXT.to_string()),
            SubmissionState::Finished(Ok(classification)) => Some(classification.to_string()),
            SubmissionState::Finished(Err(err)) => Some(err.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            SubmissionState::Rejected(_) | SubmissionState::Finished(Err(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::Classification;

    #[test]
    fn idle_hides_the_result_area() {
        assert_eq!(SubmissionState::Idle.result_text(), None);
    }

    #[test]
    fn each_terminal_state_has_its_own_text() {
        let cases = [
            (
                SubmissionState::Rejected(SubmitError::NoFileSelected),
                "Please select an image.",
            ),
            (SubmissionState::Submitting, "Classifying..."),
            (
                SubmissionState::Finished(Err(SubmitError::InvalidResponse)),
                "Invalid response from backend.",
            ),
            (
                SubmissionState::Finished(Err(SubmitError::Unclassified)),
                "Could not classify the image.",
            ),
            (
                SubmissionState::Finished(Err(SubmitError::Connection)),
                "Error connecting to backend.",
            ),
        ];
        for (state, expected) in cases {
            assert_eq!(state.result_text().as_deref(), Some(expected));
        }
    }

    #[test]
    fn success_renders_label_and_confidence() {
        let state = SubmissionState::Finished(Ok(Classification {
            prediction: "tumorous".into(),
            confidence: Some(0.5),
        }));
        assert_eq!(
            state.result_text().as_deref(),
            Some("Prediction: Tumorous\nConfidence: 50.00%")
        );
        assert!(!state.is_error());
    }
}
