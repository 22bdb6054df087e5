use tracing::info;

use crate::client::{ExtractionService, HealthStatus, HttpExtractionClient};
use crate::config::AnalyzerConfig;
use crate::{AnalyzerError, AnalyzerResult};

pub fn run(config: &AnalyzerConfig) -> AnalyzerResult<HealthStatus> {
    let client = HttpExtractionClient::new(&config.service)?;
    run_with_service(&client)
}

/// Query `service` and print its status line; a non-ok status is an error.
pub fn run_with_service(service: &dyn ExtractionService) -> AnalyzerResult<HealthStatus> {
    let health = service.health()?;
    info!(service = service.name(), status = %health.status, "health check");

    if health.message.is_empty() {
        println!("{}: {}", service.name(), health.status);
    } else {
        println!("{}: {} ({})", service.name(), health.status, health.message);
    }

    if !health.is_ok() {
        return Err(AnalyzerError::Message(format!(
            "extraction service at {} reported status '{}'",
            service.name(),
            health.status
        )));
    }
    Ok(health)
}
