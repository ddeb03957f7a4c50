//! Health check DTOs for API responses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Health check response structure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2024-10-01T12:00:00Z",
    "checks": {
        "storage": {
            "status": "healthy",
            "message": "postgres: connected",
            "responseTimeMs": 5
        }
    }
}))]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,
    /// Application version
    #[schema(example = "0.1.0")]
    pub version: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: jiff::Timestamp,
    /// Detailed checks for various components
    pub checks: BTreeMap<String, ComponentHealth>,
}

/// Health status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual component health information.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl HealthResponse {
    /// The worst component status wins.
    pub fn from_checks(version: &str, checks: BTreeMap<String, ComponentHealth>) -> Self {
        let status = checks
            .values()
            .map(|c| c.status)
            .fold(HealthStatus::Healthy, |acc, s| match (acc, s) {
                (HealthStatus::Unhealthy, _) | (_, HealthStatus::Unhealthy) => {
                    HealthStatus::Unhealthy
                }
                (HealthStatus::Degraded, _) | (_, HealthStatus::Degraded) => HealthStatus::Degraded,
                _ => HealthStatus::Healthy,
            });

        Self {
            status,
            version: version.to_string(),
            timestamp: jiff::Timestamp::now(),
            checks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(status: HealthStatus) -> ComponentHealth {
        ComponentHealth {
            status,
            message: None,
            response_time_ms: Some(1),
        }
    }

    #[test]
    fn test_worst_status_wins() {
        let mut checks = BTreeMap::new();
        checks.insert("a".to_string(), component(HealthStatus::Healthy));
        checks.insert("b".to_string(), component(HealthStatus::Degraded));
        assert_eq!(
            HealthResponse::from_checks("0.1.0", checks).status,
            HealthStatus::Degraded
        );

        let mut checks = BTreeMap::new();
        checks.insert("a".to_string(), component(HealthStatus::Unhealthy));
        checks.insert("b".to_string(), component(HealthStatus::Degraded));
        assert_eq!(
            HealthResponse::from_checks("0.1.0", checks).status,
            HealthStatus::Unhealthy
        );
    }

    #[test]
    fn test_component_serialization() {
        let json = serde_json::to_value(component(HealthStatus::Healthy)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "healthy", "responseTimeMs": 1}));
    }
}
