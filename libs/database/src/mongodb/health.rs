use mongodb::Client;
use std::time::Instant;

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the database is reachable
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
    /// Round-trip time in milliseconds
    pub response_time_ms: u64,
}

/// Check MongoDB reachability with a lightweight command.
pub async fn check_health(client: &Client) -> bool {
    client.list_database_names().await.is_ok()
}

/// Check MongoDB health with timing and error details.
///
/// # Example
/// ```ignore
/// use database::mongodb::{connect, check_health_detailed};
///
/// let client = connect("mongodb://localhost:27017").await?;
/// let status = check_health_detailed(&client).await;
/// if !status.healthy {
///     tracing::warn!("MongoDB unhealthy: {:?}", status.message);
/// }
/// ```
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();

    match client.list_database_names().await {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms: start.elapsed().as_millis() as u64,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms: start.elapsed().as_millis() as u64,
        },
    }
}
