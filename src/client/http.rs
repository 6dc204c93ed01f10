//! HTTP implementation of the execution and persistence seams

use reqwest::{Response, StatusCode};
use tracing::{debug, warn};

use super::ClientConfig;
use crate::experiment::{Experiment, ExperimentRequest, PerformanceMetrics};
use crate::store::{ExperimentRunner, ExperimentStore};
use crate::{Error, Result};

/// Client for the experiment backend's REST API.
///
/// | Operation | Request |
/// |-----------|---------|
/// | run sweep | `POST /api/experiment` |
/// | list | `GET /api/experiments` |
/// | fetch | `GET /api/experiment/{id}` |
/// | delete | `DELETE /api/experiment/{id}` |
/// | counters | `GET /api/performance` |
///
/// Non-success responses become [`Error::Backend`] carrying the body's
/// `detail` field (or the raw body) untouched; 404 on an id becomes
/// [`Error::NotFound`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpBackend {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid config, or [`Error::Http`]
    /// if the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.effective_base_url(),
            timeout_secs: config.request_timeout().as_secs(),
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the backend's cache/latency counters.
    ///
    /// # Errors
    ///
    /// Transport, status, or decoding failures.
    pub async fn performance(&self) -> Result<PerformanceMetrics> {
        let response = self.send(self.http.get(self.url("/api/performance"))).await?;
        let response = check(response, None).await?;
        Ok(response.json().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn experiment_url(&self, id: &str) -> String {
        self.url(&format!("/api/experiment/{id}"))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Backend(format!(
                    "Request timeout after {}s waiting for the experiment backend",
                    self.timeout_secs
                ))
            } else {
                Error::Http(e)
            }
        })
    }
}

/// Map non-success statuses onto crate errors.
async fn check(response: Response, id: Option<&str>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(Error::NotFound(id.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_detail(&body).unwrap_or_else(|| status.to_string());
    warn!(%status, %message, "backend request failed");
    Err(Error::Backend(message))
}

/// `detail` from a JSON error body, else the trimmed raw body.
fn error_detail(body: &str) -> Option<String> {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        match json.get("detail") {
            Some(serde_json::Value::String(detail)) => return Some(detail.clone()),
            Some(detail) if !detail.is_null() => return Some(detail.to_string()),
            _ => {}
        }
    }
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ExperimentRunner for HttpBackend {
    async fn create_experiment(&self, request: &ExperimentRequest) -> Result<Experiment> {
        debug!(
            name = request.experiment_name(),
            combinations = request.parameter_ranges().combination_count(),
            "submitting experiment"
        );
        let response = self
            .send(self.http.post(self.url("/api/experiment")).json(request))
            .await?;
        let response = check(response, None).await?;
        let experiment: Experiment = response.json().await?;
        debug!(
            id = experiment.experiment_id(),
            responses = experiment.responses().len(),
            "experiment completed"
        );
        Ok(experiment)
    }
}

impl ExperimentStore for HttpBackend {
    async fn list_experiments(&self) -> Result<Vec<Experiment>> {
        let response = self.send(self.http.get(self.url("/api/experiments"))).await?;
        let response = check(response, None).await?;
        Ok(response.json().await?)
    }

    async fn get_experiment(&self, id: &str) -> Result<Experiment> {
        let response = self.send(self.http.get(self.experiment_url(id))).await?;
        let response = check(response, Some(id)).await?;
        Ok(response.json().await?)
    }

    async fn delete_experiment(&self, id: &str) -> Result<()> {
        debug!(id, "deleting experiment");
        let response = self.send(self.http.delete(self.experiment_url(id))).await?;
        check(response, Some(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_prefers_json_detail() {
        assert_eq!(
            error_detail(r#"{"detail": "ANTHROPIC_API_KEY not set"}"#).as_deref(),
            Some("ANTHROPIC_API_KEY not set")
        );
    }

    #[test]
    fn test_error_detail_non_string_detail() {
        let detail = error_detail(r#"{"detail": [{"msg": "field required"}]}"#).unwrap();
        assert!(detail.contains("field required"));
    }

    #[test]
    fn test_error_detail_falls_back_to_body() {
        assert_eq!(error_detail("  upstream exploded \n").as_deref(), Some("upstream exploded"));
        assert_eq!(error_detail(""), None);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(HttpBackend::new(&ClientConfig::new("localhost:8000")).is_err());
    }
}
