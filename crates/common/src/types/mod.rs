use serde::{Deserialize, Serialize};

/// Health report returned by the liveness/readiness probes.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub checks: Vec<HealthCheck>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub description: Option<String>,
    pub error: Option<String>,
}

impl Health {
    pub fn healthy() -> Self {
        Self { status: "Healthy".into(), checks: Vec::new() }
    }

    /// Aggregate status: healthy only when every check is.
    pub fn from_checks(checks: Vec<HealthCheck>) -> Self {
        let healthy = checks.iter().all(|c| c.status == "Healthy");
        Self { status: if healthy { "Healthy" } else { "Unhealthy" }.into(), checks }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "Healthy"
    }
}

impl HealthCheck {
    pub fn healthy(name: &str) -> Self {
        Self { name: name.into(), status: "Healthy".into(), description: None, error: None }
    }

    pub fn unhealthy(name: &str, error: String) -> Self {
        Self { name: name.into(), status: "Unhealthy".into(), description: None, error: Some(error) }
    }
}
