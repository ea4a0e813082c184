//! Battery telemetry model and charging status classification.
//!
//! The model covers two power sources, the host device battery and the
//! battery of an attached accessory, plus the accessory's charging policy
//! metadata. One [`StatusSnapshot`] bundles all of it; [`classify`] turns a
//! snapshot into a display status and charging flag.
//!
//! # Example
//!
//! ```rust
//! use accessory_metrics::battery::{
//!     classify, AccessoryContext, BatteryReading, ChargeState, ChargeStatus, EfficiencyMode,
//!     PluggedSource, StatusSnapshot, UsageType,
//! };
//!
//! let snapshot = StatusSnapshot {
//!     host: BatteryReading {
//!         level_percent: 80,
//!         charge_state: ChargeState::Discharging,
//!         plugged: PluggedSource::None,
//!         full_capacity_mah: 0,
//!     },
//!     accessory: BatteryReading {
//!         level_percent: 60,
//!         charge_state: ChargeState::Discharging,
//!         plugged: PluggedSource::None,
//!         full_capacity_mah: 3000,
//!     },
//!     context: AccessoryContext {
//!         usage_type: UsageType::Supplemental,
//!         efficiency_mode: EfficiencyMode::On,
//!         recharge_start_soc: 40,
//!         recharge_stop_soc: 80,
//!     },
//! };
//!
//! let report = classify(&snapshot);
//! assert_eq!(report.status, ChargeStatus::TransferPaused { resume_below_soc: 40 });
//! assert!(!report.charging);
//! ```

pub mod constants;
pub mod monitors;
pub mod status;
pub mod types;

#[cfg(test)]
mod tests;

pub use monitors::{AccessoryBatteryMonitor, HostBatteryMonitor};
pub use status::{classify, ChargeStatus, StatusReport};
pub use types::{
    AccessoryContext, BatteryReading, ChargeState, EfficiencyMode, PluggedSource, StatusSnapshot,
    UsageType,
};
