//! Blocking HTTP client for the extraction service.

use std::time::{Duration, Instant};

use reqwest::blocking::{Client, multipart::Form};
use tracing::{debug, info};

use crate::config::ServiceConfig;
use crate::core::ExtractionOutput;

use super::error::ExtractionError;
use super::response::{error_from_body, parse_response};
use super::traits::{ExtractionService, HealthStatus, SourceFiles};

/// Extraction service reached over HTTP with a multipart upload.
pub struct HttpExtractionClient {
    base_url: String,
    process_url: String,
    health_url: String,
    plc_field: String,
    base_field: String,
    client: Client,
}

impl HttpExtractionClient {
    /// Build a client from the service configuration.
    ///
    /// A `timeout_secs` of 0 disables the request timeout.
    pub fn new(config: &ServiceConfig) -> Result<Self, ExtractionError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        let client = Client::builder().timeout(timeout).build().map_err(|e| ExtractionError::Transport {
            url: base_url.clone(),
            message: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(HttpExtractionClient {
            process_url: join_url(&base_url, &config.process_path),
            health_url: join_url(&base_url, &config.health_path),
            plc_field: config.plc_field.clone(),
            base_field: config.base_field.clone(),
            base_url,
            client,
        })
    }

    pub fn process_url(&self) -> &str {
        &self.process_url
    }

    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    fn transport(&self, err: reqwest::Error) -> ExtractionError {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("could not connect: {err}")
        } else {
            err.to_string()
        };
        ExtractionError::Transport {
            url: self.base_url.clone(),
            message,
        }
    }
}

impl ExtractionService for HttpExtractionClient {
    fn name(&self) -> &str {
        &self.base_url
    }

    fn extract(&self, files: &SourceFiles) -> Result<ExtractionOutput, ExtractionError> {
        let (plc, base) = files.validate()?;

        let form = Form::new()
            .file(self.plc_field.clone(), plc)
            .map_err(|e| ExtractionError::Validation(format!("cannot read {}: {e}", plc.display())))?
            .file(self.base_field.clone(), base)
            .map_err(|e| ExtractionError::Validation(format!("cannot read {}: {e}", base.display())))?;

        info!(url = %self.process_url, plc = %plc.display(), base = %base.display(), "submitting files for extraction");
        let start = Instant::now();
        let response = self
            .client
            .post(self.process_url.as_str())
            .multipart(form)
            .send()
            .map_err(|e| self.transport(e))?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| self.transport(e))?;
        debug!(status, bytes = body.len(), elapsed_ms = start.elapsed().as_millis() as u64, "extraction response received");

        let output = parse_response(status, &body)?;
        info!(rows = output.raw_records.len(), columns = output.columns.len(), "extraction succeeded");
        Ok(output)
    }

    fn health(&self) -> Result<HealthStatus, ExtractionError> {
        let response = self.client.get(self.health_url.as_str()).send().map_err(|e| self.transport(e))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| self.transport(e))?;
        if !(200..300).contains(&status) {
            return Err(error_from_body(Some(status), &body));
        }
        serde_json::from_str(&body)
            .map_err(|e| ExtractionError::Format(format!("unexpected health payload: {e}")))
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        base.to_string()
    } else if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h:5000", "/api/process"), "http://h:5000/api/process");
        assert_eq!(join_url("http://h:5000", "api/health"), "http://h:5000/api/health");
        assert_eq!(join_url("http://h:5000", ""), "http://h:5000");
    }

    #[test]
    fn test_client_urls_from_config() {
        let config = ServiceConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..ServiceConfig::default()
        };
        let client = HttpExtractionClient::new(&config).unwrap();
        assert_eq!(client.name(), "http://localhost:5000");
        assert_eq!(client.process_url(), "http://localhost:5000/api/process");
        assert_eq!(client.health_url(), "http://localhost:5000/api/health");
    }

    #[test]
    fn test_missing_files_fail_before_any_request() {
        // Nothing listens on this port; a validation error proves no request was attempted
        let config = ServiceConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..ServiceConfig::default()
        };
        let client = HttpExtractionClient::new(&config).unwrap();
        let err = client.extract(&SourceFiles::default()).unwrap_err();
        assert!(err.is_validation());
    }
}
