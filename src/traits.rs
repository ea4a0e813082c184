//! Monitor traits and the metric wrapper shared across telemetry domains.

use std::time::SystemTime;

use async_trait::async_trait;

use crate::error::Result;

/// A single metric measurement with its capture time.
#[derive(Debug, Clone)]
pub struct Metric<T> {
    /// The measured value
    pub value: T,
    /// When the value was captured
    pub timestamp: SystemTime,
}

impl<T> Metric<T> {
    /// Wrap a value captured now.
    pub fn new(value: T) -> Self {
        Self {
            value,
            timestamp: SystemTime::now(),
        }
    }
}

/// Trait for monitors exposing one side of the battery telemetry.
///
/// Implementors answer queries from the latest available snapshot and must
/// never block on hardware.
#[async_trait]
pub trait TelemetryMonitor: Send + Sync {
    /// The type of metric this monitor produces.
    type MetricType: Clone + Send + Sync + 'static;

    /// Get the current metric value.
    async fn get_metric(&self) -> Result<Metric<Self::MetricType>>;

    /// Get the name of the monitored component.
    async fn name(&self) -> Result<String>;

    /// Get the type of monitored hardware.
    async fn hardware_type(&self) -> Result<String>;

    /// Get the unique device identifier.
    async fn device_id(&self) -> Result<String>;
}
