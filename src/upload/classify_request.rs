use crate::upload::types::{Classification, SubmitError, SubmitOutcome, Upload};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;

/// Sends one image to a classification service.
#[async_trait]
pub trait ClassifyBackend: Send + Sync {
    async fn classify(&self, upload: Upload) -> SubmitOutcome;
}

/// Posts the image as multipart form data to a fixed endpoint.
#[derive(Clone)]
pub struct HttpBackend {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ClassifyBackend for HttpBackend {
    async fn classify(&self, upload: Upload) -> SubmitOutcome {
        let part = match Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime)
        {
            Ok(part) => part,
            Err(e) => {
                tracing::warn!("unusable mime type {:?}: {}", upload.mime, e);
                return Err(SubmitError::Connection);
            }
        };
        let form = Form::new().part("file", part);

        let response = match self.client.post(&self.endpoint).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("request to {} failed: {}", self.endpoint, e);
                return Err(SubmitError::Connection);
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("failed to read response body: {}", e);
                return Err(SubmitError::InvalidResponse);
            }
        };

        interpret_response(status, &body)
    }
}

/// Applies the response policy: parse failure wins over any status, then a
/// successful prediction, then a `detail` message, then the generic fallback.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> SubmitOutcome {
    let data: Value = match serde_json::from_slice(body) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("backend returned non-JSON body (status {}): {}", status, e);
            return Err(SubmitError::InvalidResponse);
        }
    };

    if status.is_success() {
        if let Some(prediction) = data.get("prediction").and_then(Value::as_str) {
            if !prediction.is_empty() {
                return Ok(Classification {
                    prediction: prediction.to_string(),
                    confidence: data.get("confidence").and_then(Value::as_f64),
                });
            }
        }
    }

    match data.get("detail") {
        Some(detail) if is_truthy(detail) => Err(SubmitError::Backend(detail_text(detail))),
        _ => Err(SubmitError::Unclassified),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn detail_text(detail: &Value) -> String {
    match detail {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
