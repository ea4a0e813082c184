use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::events::TelemetryHub;
use crate::traits::{Metric, TelemetryMonitor};

use super::status::{ChargeStatus, StatusReport};
use super::types::{
    AccessoryContext, BatteryReading, ChargeState, EfficiencyMode, PluggedSource, UsageType,
};

//=============================================================================
// Host Battery Monitor
//=============================================================================

/// Monitor for the host-side battery reading.
pub struct HostBatteryMonitor {
    hub: Arc<TelemetryHub>,
}

impl HostBatteryMonitor {
    /// Creates a new HostBatteryMonitor over the shared hub.
    pub fn new(hub: Arc<TelemetryHub>) -> Self {
        Self { hub }
    }

    /// Current host battery level percentage.
    pub async fn level_percent(&self) -> Result<i32> {
        let host = self.hub.snapshot().host;
        if host.is_level_valid() {
            Ok(host.level_percent)
        } else {
            Err(Error::not_available("host battery level not reported yet"))
        }
    }

    /// Current host charge state.
    pub async fn charge_state(&self) -> Result<ChargeState> {
        Ok(self.hub.snapshot().host.charge_state)
    }

    /// Power source the host is plugged into.
    pub async fn plugged(&self) -> Result<PluggedSource> {
        Ok(self.hub.snapshot().host.plugged)
    }

    /// Classification of the latest snapshot.
    pub async fn status(&self) -> Result<StatusReport> {
        Ok(self.hub.status())
    }
}

#[async_trait]
impl TelemetryMonitor for HostBatteryMonitor {
    type MetricType = BatteryReading;

    async fn get_metric(&self) -> Result<Metric<Self::MetricType>> {
        Ok(Metric::new(self.hub.snapshot().host))
    }

    async fn name(&self) -> Result<String> {
        Ok("Host Battery".to_string())
    }

    async fn hardware_type(&self) -> Result<String> {
        Ok("Battery".to_string())
    }

    async fn device_id(&self) -> Result<String> {
        Ok("battery_host".to_string())
    }
}

//=============================================================================
// Accessory Battery Monitor
//=============================================================================

/// Monitor for the accessory-side battery reading.
///
/// Queries answer `NotAvailable` while the latest snapshot classifies as
/// accessory absent, so callers never observe sentinel values as data.
pub struct AccessoryBatteryMonitor {
    hub: Arc<TelemetryHub>,
}

impl AccessoryBatteryMonitor {
    /// Creates a new AccessoryBatteryMonitor over the shared hub.
    pub fn new(hub: Arc<TelemetryHub>) -> Self {
        Self { hub }
    }

    fn current(&self) -> Result<(BatteryReading, AccessoryContext)> {
        let snapshot = self.hub.snapshot();
        if snapshot.classify().status == ChargeStatus::AccessoryAbsent {
            return Err(Error::not_available("accessory battery absent"));
        }
        Ok((snapshot.accessory, snapshot.context))
    }

    /// Current accessory battery level percentage.
    pub async fn level_percent(&self) -> Result<i32> {
        Ok(self.current()?.0.level_percent)
    }

    /// Current accessory charge state.
    pub async fn charge_state(&self) -> Result<ChargeState> {
        Ok(self.current()?.0.charge_state)
    }

    /// Full accessory battery capacity in mAh.
    pub async fn full_capacity_mah(&self) -> Result<i64> {
        Ok(self.current()?.0.full_capacity_mah)
    }

    /// Remaining stored energy in mAh.
    pub async fn stored_capacity_mah(&self) -> Result<i64> {
        let (reading, _) = self.current()?;
        reading
            .stored_capacity_mah()
            .ok_or_else(|| Error::invalid_data("accessory capacity not derivable"))
    }

    /// Declared role of the accessory battery.
    pub async fn usage_type(&self) -> Result<UsageType> {
        Ok(self.current()?.1.usage_type)
    }

    /// Charging policy toward the host.
    pub async fn efficiency_mode(&self) -> Result<EfficiencyMode> {
        Ok(self.current()?.1.efficiency_mode)
    }

    /// Recharge window as (resume below, stop at) host percentages.
    pub async fn recharge_window(&self) -> Result<(i32, i32)> {
        let (_, context) = self.current()?;
        Ok((context.recharge_start_soc, context.recharge_stop_soc))
    }
}

#[async_trait]
impl TelemetryMonitor for AccessoryBatteryMonitor {
    type MetricType = BatteryReading;

    async fn get_metric(&self) -> Result<Metric<Self::MetricType>> {
        Ok(Metric::new(self.hub.snapshot().accessory))
    }

    async fn name(&self) -> Result<String> {
        Ok("Accessory Battery".to_string())
    }

    async fn hardware_type(&self) -> Result<String> {
        Ok("Battery".to_string())
    }

    async fn device_id(&self) -> Result<String> {
        Ok("battery_accessory".to_string())
    }
}
