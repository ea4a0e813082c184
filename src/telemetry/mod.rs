//! Translation of raw platform battery events and accessory queries into
//! immutable telemetry snapshots.
//!
//! The aggregator is the only place raw codes are decoded. Accessory
//! failures are absorbed here: a missing accessory, a missing battery
//! protocol, or a query that fails mid-flight all yield the complete
//! invalid sentinel set in one piece, so a snapshot never carries a
//! partially updated accessory reading.

use tracing::{debug, warn};

use crate::accessory::{AccessoryPort, BatteryProperty, Protocol};
use crate::battery::constants::LEVEL_INVALID;
use crate::battery::types::{
    AccessoryContext, BatteryReading, ChargeState, EfficiencyMode, PluggedSource, StatusSnapshot,
    UsageType,
};
use crate::error::Result;

/// Raw host battery broadcast payload, as delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawBatteryEvent {
    /// Raw charge level, in `scale` units
    pub level: i32,
    /// Maximum value of `level`
    pub scale: i32,
    /// Raw charge-state code
    pub status: i32,
    /// Raw plug-source code
    pub plugged: i32,
}

/// Builds [`StatusSnapshot`] values from host battery events and accessory
/// queries.
pub struct TelemetryAggregator {
    port: Box<dyn AccessoryPort>,
}

impl TelemetryAggregator {
    /// Create an aggregator over the given accessory port.
    pub fn new(port: Box<dyn AccessoryPort>) -> Self {
        Self { port }
    }

    /// The underlying accessory port.
    pub fn port(&self) -> &dyn AccessoryPort {
        self.port.as_ref()
    }

    /// Decode a raw host battery event into a reading.
    ///
    /// The percentage is `level / scale` scaled to 100 and rounded; a
    /// non-positive scale or negative level yields the invalid sentinel.
    pub fn host_reading(event: &RawBatteryEvent) -> BatteryReading {
        BatteryReading {
            level_percent: scaled_level(event.level, event.scale),
            charge_state: ChargeState::from_code(event.status),
            plugged: PluggedSource::from_code(event.plugged),
            full_capacity_mah: 0,
        }
    }

    /// Query the accessory for a complete reading and context.
    ///
    /// Returns the sentinel set when no accessory is attached, the accessory
    /// does not declare the battery protocol, or it vanishes mid-query.
    pub fn accessory_reading(&self) -> (BatteryReading, AccessoryContext) {
        if !self.port.attached() || !self.port.declares(Protocol::Battery) {
            return (BatteryReading::invalid(), AccessoryContext::invalid());
        }

        match self.query_accessory() {
            Ok(pair) => pair,
            Err(err) => {
                warn!(error = %err, "accessory query failed, substituting sentinels");
                (BatteryReading::invalid(), AccessoryContext::invalid())
            },
        }
    }

    /// Build a fresh snapshot for a host battery broadcast.
    ///
    /// The accessory is re-queried on every event since its charging policy
    /// can change without an attach or detach.
    pub fn handle_battery_event(&self, event: &RawBatteryEvent) -> StatusSnapshot {
        let host = Self::host_reading(event);
        let (accessory, context) = self.accessory_reading();
        let snapshot = StatusSnapshot {
            host,
            accessory,
            context,
        };
        debug!(?snapshot, "rebuilt snapshot from battery event");
        snapshot
    }

    /// Build a fresh snapshot after an accessory attach, detach, or
    /// capability change. `host` is the most recent host reading.
    pub fn handle_accessory_changed(&self, host: BatteryReading) -> StatusSnapshot {
        let (accessory, context) = self.accessory_reading();
        let snapshot = StatusSnapshot {
            host,
            accessory,
            context,
        };
        debug!(?snapshot, "rebuilt snapshot from accessory change");
        snapshot
    }

    // Staged into locals so a failure at any point leaves nothing behind.
    fn query_accessory(&self) -> Result<(BatteryReading, AccessoryContext)> {
        let usage_type = UsageType::from_code(self.port.int_property(BatteryProperty::UsageType)?);
        let efficiency_mode =
            EfficiencyMode::from_code(self.port.int_property(BatteryProperty::EfficiencyMode)?);
        let recharge_start_soc = self.port.int_property(BatteryProperty::RechargeStartSoc)?;
        let recharge_stop_soc = self.port.int_property(BatteryProperty::RechargeStopSoc)?;

        let level_percent = self.port.battery_level()?;
        let charge_state = ChargeState::from_code(self.port.battery_status()?);
        let full_capacity_mah = self.port.battery_capacity_mah()?;

        Ok((
            BatteryReading {
                level_percent,
                charge_state,
                plugged: PluggedSource::None,
                full_capacity_mah,
            },
            AccessoryContext {
                usage_type,
                efficiency_mode,
                recharge_start_soc,
                recharge_stop_soc,
            },
        ))
    }
}

fn scaled_level(level: i32, scale: i32) -> i32 {
    if level < 0 || scale <= 0 {
        return LEVEL_INVALID;
    }
    (100.0 * f64::from(level) / f64::from(scale)).round() as i32
}
