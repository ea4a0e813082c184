//! Accessory Metrics - battery telemetry for attachable device accessories
//!
//! This crate models the battery telemetry of a host device and a removable
//! hardware accessory attached to it, and classifies the pair into a single
//! human-readable charging status. Raw platform events and accessory
//! queries are translated into immutable snapshots; a pure classifier maps
//! each snapshot to a display status and charging flag.
//!
//! # Features
//!
//! - **Status classification**: one ordered decision chain turning a
//!   telemetry snapshot into a charging status, with invalid telemetry
//!   absorbed as an "accessory absent" outcome
//! - **Telemetry aggregation**: decoding of raw host battery broadcasts and
//!   accessory property queries, with atomic sentinel substitution when the
//!   accessory detaches or fails mid-query
//! - **Subscriptions**: explicit register/unregister callbacks for host
//!   battery and accessory change events, plus an async snapshot stream
//! - **Monitors**: async facades answering host- and accessory-side
//!   queries from the latest snapshot
//!
//! # Examples
//!
//! ```rust
//! use accessory_metrics::prelude::*;
//!
//! let snapshot = StatusSnapshot {
//!     host: BatteryReading {
//!         level_percent: 100,
//!         charge_state: ChargeState::Charging,
//!         plugged: PluggedSource::Ac,
//!         full_capacity_mah: 0,
//!     },
//!     accessory: BatteryReading {
//!         level_percent: 60,
//!         charge_state: ChargeState::NotCharging,
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
//! assert_eq!(report.status, ChargeStatus::HostCharging(PluggedSource::Ac));
//! assert!(report.charging);
//! println!("{}", report.status);
//! ```
//!
//! # Concurrency
//!
//! Classification is synchronous and never blocks. The hub replaces its
//! snapshot wholesale before notifying subscribers, so a callback never
//! observes a half-updated snapshot. Listener registration is guarded and
//! safe to use from multiple threads, though event delivery is expected to
//! come from a single dispatch thread.
//!
//! # Error Handling
//!
//! The classifier has no failure mode: invalid accessory telemetry is a
//! classification outcome, not an error. The crate [`Error`] type covers
//! the port and monitor surface, where an accessory can legitimately be
//! missing or vanish mid-query.

#![doc(html_root_url = "https://docs.rs/accessory-metrics/0.1.0")]

pub mod accessory;
pub mod battery;
pub mod error;
pub mod events;
pub mod telemetry;
pub mod traits;

pub use error::{Error, Result};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::accessory::{AccessoryIdentity, AccessoryPort, BatteryProperty, Protocol};
    pub use crate::battery::{
        classify, AccessoryBatteryMonitor, AccessoryContext, BatteryReading, ChargeState,
        ChargeStatus, EfficiencyMode, HostBatteryMonitor, PluggedSource, StatusReport,
        StatusSnapshot, UsageType,
    };
    pub use crate::error::{Error, Result};
    pub use crate::events::{SnapshotStream, Subscription, TelemetryEvent, TelemetryHub};
    pub use crate::telemetry::{RawBatteryEvent, TelemetryAggregator};
    pub use crate::traits::{Metric, TelemetryMonitor};
}
