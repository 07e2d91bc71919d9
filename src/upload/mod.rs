mod classify_request;
mod preview;
mod types;

pub use classify_request::{ClassifyBackend, HttpBackend};
pub use preview::PreviewImage;
pub use types::{
    Classification, PreviewError, SelectedFile, SubmitError, SubmitOutcome, Upload,
};
