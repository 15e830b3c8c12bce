//! Client for the remote digit classification endpoint.
//!
//! Speaks the endpoint's small HTTP contract: a multipart upload to
//! `{base}/predict` answered by `{"digit": .., "confidence": ..}`, plus a
//! `{base}/healthz` probe.

use pad_core::{EncodedImage, PadError, Prediction};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::ClientConfig;

/// Multipart field carrying the image.
pub const UPLOAD_FIELD: &str = "file";

/// File name sent with the image part.
pub const UPLOAD_FILE_NAME: &str = "digit.png";

/// Errors that can occur when talking to the classification service.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The configured base URL is invalid.
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed (connection, timeout, etc.).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("API error: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// The response body was not a prediction object.
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// The prediction was outside its documented range.
    #[error("{0}")]
    InvalidPrediction(String),
}

impl ClassifyError {
    /// HTTP status code, when the failure came from the service itself.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    ok: bool,
}

/// Asynchronous classification client.
#[derive(Debug, Clone)]
pub struct ClassifierClient {
    http: Client,
    predict_url: Url,
    health_url: Url,
}

impl ClassifierClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::InvalidUrl`] if the base URL is malformed or
    /// not http(s), and [`ClassifyError::Http`] if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClassifyError> {
        let base = Url::parse(config.base_url.trim())
            .map_err(|e| ClassifyError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(ClassifyError::InvalidUrl(format!(
                "{} is not an http(s) base URL",
                config.base_url
            )));
        }

        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            predict_url: endpoint(&base, "predict"),
            health_url: endpoint(&base, "healthz"),
        })
    }

    /// Full URL of the predict endpoint.
    #[must_use]
    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }

    /// Upload an image and return the service's prediction.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Status`] for non-success responses,
    /// [`ClassifyError::Http`] for transport failures, and
    /// [`ClassifyError::Decode`]/[`ClassifyError::InvalidPrediction`] for bad bodies.
    pub async fn predict(&self, image: &EncodedImage) -> Result<Prediction, ClassifyError> {
        let part = Part::bytes(image.bytes().to_vec())
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(image.content_type())?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        tracing::info!(
            "POST {} ({}x{}, {} bytes)",
            self.predict_url,
            image.width(),
            image.height(),
            image.len()
        );

        let response = self
            .http
            .post(self.predict_url.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Predict request returned {status}");
            return Err(ClassifyError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let prediction = Prediction::from_json(&body).map_err(|e| match e {
            PadError::Serialization(e) => ClassifyError::Decode(e.to_string()),
            other => ClassifyError::InvalidPrediction(other.to_string()),
        })?;

        tracing::debug!("Prediction received: {prediction}");
        Ok(prediction)
    }

    /// Probe the service health endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable, answers with a
    /// non-success status, or returns an unexpected body.
    pub async fn health(&self) -> Result<bool, ClassifyError> {
        let response = self.http.get(self.health_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        let health: HealthResponse =
            serde_json::from_str(&body).map_err(|e| ClassifyError::Decode(e.to_string()))?;
        Ok(health.ok)
    }
}

/// Append an endpoint name to the base URL's path.
fn endpoint(base: &Url, name: &str) -> Url {
    let mut url = base.clone();
    let path = format!("{}/{name}", base.path().trim_end_matches('/'));
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header_regex, method, path};
    use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

    struct BodyContains(&'static [u8]);

    impl Match for BodyContains {
        fn matches(&self, request: &Request) -> bool {
            request.body.windows(self.0.len()).any(|w| w == self.0)
        }
    }

    fn sample_image() -> EncodedImage {
        EncodedImage::png(vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A], 196, 196)
            .expect("non-empty")
    }

    fn client_for(base_url: String) -> ClassifierClient {
        ClassifierClient::new(&ClientConfig::default().with_base_url(base_url)).expect("client")
    }

    #[test]
    fn endpoint_appends_to_base_path() {
        let base = Url::parse("http://host:8000").unwrap();
        assert_eq!(endpoint(&base, "predict").as_str(), "http://host:8000/predict");

        let base = Url::parse("http://host/api/v1/?x=1").unwrap();
        assert_eq!(endpoint(&base, "predict").as_str(), "http://host/api/v1/predict");
    }

    #[test]
    fn rejects_invalid_base_url() {
        for url in ["not a url", "mailto:someone@example.com", "ftp://host/"] {
            let err = ClassifierClient::new(&ClientConfig::default().with_base_url(url))
                .unwrap_err();
            assert!(matches!(err, ClassifyError::InvalidUrl(_)), "{url}");
        }
    }

    #[test]
    fn status_error_message_includes_code() {
        let err = ClassifyError::Status { status: 503 };
        assert_eq!(err.to_string(), "API error: 503");
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn predict_uploads_multipart_png() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(header_regex("content-type", "^multipart/form-data; boundary="))
            .and(BodyContains(b"name=\"file\"; filename=\"digit.png\""))
            .and(BodyContains(b"image/png"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"digit": 7, "confidence": 0.93})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let prediction = client_for(server.uri())
            .predict(&sample_image())
            .await
            .expect("prediction");
        assert_eq!(prediction.digit, 7);
        assert!((prediction.confidence - 0.93).abs() < 1e-6);
    }

    #[tokio::test]
    async fn predict_honours_base_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/predict"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"digit": 1, "confidence": 0.5})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(format!("{}/api/", server.uri()));
        let prediction = client.predict(&sample_image()).await.expect("prediction");
        assert_eq!(prediction.digit, 1);
    }

    #[tokio::test]
    async fn predict_surfaces_status_code() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
            .mount(&server)
            .await;

        let err = client_for(server.uri())
            .predict(&sample_image())
            .await
            .unwrap_err();
        match err {
            ClassifyError::Status { status } => assert_eq!(status, 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn predict_rejects_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(server.uri())
            .predict(&sample_image())
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn predict_rejects_out_of_range_prediction() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"digit": 12, "confidence": 0.4})),
            )
            .mount(&server)
            .await;

        let err = client_for(server.uri())
            .predict(&sample_image())
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::InvalidPrediction(_)), "{err:?}");
    }

    #[tokio::test]
    async fn health_reports_ok_flag() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/healthz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        assert!(client_for(server.uri()).health().await.expect("health"));
    }

    #[tokio::test]
    async fn health_surfaces_unavailable_service() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/healthz"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(server.uri()).health().await.unwrap_err();
        assert_eq!(err.status(), Some(503));
    }
}
