//! Charging status classification.
//!
//! [`classify`] maps one telemetry snapshot to a display status and a
//! charging flag. It is a pure function: no side effects, no failure modes.
//! Invalid accessory telemetry is absorbed into the [`ChargeStatus::AccessoryAbsent`]
//! outcome rather than surfaced as an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::{LEVEL_FULL, SOC_INVALID};
use super::types::{ChargeState, EfficiencyMode, PluggedSource, StatusSnapshot, UsageType};

/// Classified charging status of the host and accessory pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeStatus {
    /// No accessory battery, or its telemetry is invalid
    AccessoryAbsent,
    /// The accessory battery is taking on charge
    AccessoryCharging,
    /// The accessory is transferring stored energy to the host
    AccessoryPoweringHost,
    /// The host is charging from a source other than the accessory
    HostCharging(PluggedSource),
    /// Host battery full, transfer finished
    ChargeComplete,
    /// Transfer paused until the host level falls below the resume threshold
    TransferPaused {
        /// Host level percentage below which transfer resumes
        resume_below_soc: i32,
    },
    /// The accessory battery is empty
    AccessoryEmpty,
    /// No known pattern matched; both charge states carried for display
    Unknown {
        host: ChargeState,
        accessory: ChargeState,
    },
}

impl fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargeStatus::AccessoryAbsent => f.write_str("Accessory battery absent"),
            ChargeStatus::AccessoryCharging => f.write_str("Accessory is charging"),
            ChargeStatus::AccessoryPoweringHost => f.write_str("Accessory is charging the host"),
            ChargeStatus::HostCharging(PluggedSource::None) => f.write_str("Host is charging"),
            ChargeStatus::HostCharging(source) => write!(f, "Host is charging on {source}"),
            ChargeStatus::ChargeComplete => f.write_str("Charging complete"),
            ChargeStatus::TransferPaused { resume_below_soc } => {
                write!(f, "Transfer paused until host battery is below {resume_below_soc}%")
            },
            ChargeStatus::AccessoryEmpty => f.write_str("Accessory battery empty"),
            ChargeStatus::Unknown { host, accessory } => {
                write!(f, "Unknown status (host: {host}, accessory: {accessory})")
            },
        }
    }
}

/// Result of classifying one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Display status
    pub status: ChargeStatus,
    /// Whether the host is currently gaining charge from any source
    pub charging: bool,
}

/// Map one telemetry snapshot to a display status and charging flag.
///
/// The decision is an ordered chain and the first matching branch wins:
///
/// 1. Invalid accessory telemetry classifies as absent, ahead of everything
///    else.
/// 2. An accessory that is itself charging.
/// 3. The host charging while the accessory discharges into it.
/// 4. The host charging from another source, with the plug source carried
///    for display.
/// 5. An accessory with charge remaining: transfer complete, always-on
///    transfer, or transfer paused at a threshold, depending on host level
///    and efficiency mode.
/// 6. An empty accessory battery.
/// 7. A fallback carrying both raw charge states when nothing matched.
///
/// Calling this twice on the same snapshot yields the same report.
pub fn classify(snapshot: &StatusSnapshot) -> StatusReport {
    let host = &snapshot.host;
    let accessory = &snapshot.accessory;
    let context = &snapshot.context;

    let mut status = None;
    let mut charging = false;

    if accessory.charge_state == ChargeState::Unknown
        || accessory.full_capacity_mah <= 0
        || accessory.level_percent < 0
        || context.usage_type == UsageType::Unknown
        || context.recharge_start_soc == SOC_INVALID
    {
        status = Some(ChargeStatus::AccessoryAbsent);
    } else if accessory.charge_state == ChargeState::Charging {
        status = Some(ChargeStatus::AccessoryCharging);
        charging = true;
    } else if host.charge_state == ChargeState::Charging {
        if accessory.charge_state == ChargeState::Discharging && accessory.level_percent > 0 {
            // The accessory is the charge source.
            status = Some(ChargeStatus::AccessoryPoweringHost);
        } else {
            status = Some(ChargeStatus::HostCharging(host.plugged));
        }
        charging = true;
    } else if accessory.level_percent > 0 {
        if host.level_percent == LEVEL_FULL
            && accessory.charge_state != ChargeState::Discharging
            && context.efficiency_mode != EfficiencyMode::Off
        {
            status = Some(ChargeStatus::ChargeComplete);
        } else if context.efficiency_mode == EfficiencyMode::Off {
            // With efficiency mode disabled the accessory always feeds the host.
            status = Some(ChargeStatus::AccessoryPoweringHost);
            charging = true;
        } else if context.efficiency_mode == EfficiencyMode::On {
            status = Some(ChargeStatus::TransferPaused {
                resume_below_soc: context.recharge_start_soc,
            });
        }
        // An unknown efficiency mode with charge remaining assigns no
        // category here and is reported through the fallback below.
    } else {
        status = Some(ChargeStatus::AccessoryEmpty);
    }

    let status = status.unwrap_or(ChargeStatus::Unknown {
        host: host.charge_state,
        accessory: accessory.charge_state,
    });

    StatusReport { status, charging }
}
