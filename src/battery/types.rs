use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::{codes, LEVEL_INVALID, SOC_INVALID};
use super::status::StatusReport;

/// Charge state of a single battery, host or accessory side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeState {
    /// State could not be determined
    Unknown,
    /// The battery is taking on charge
    Charging,
    /// The battery is draining
    Discharging,
    /// Connected to power but not charging
    NotCharging,
    /// Fully charged
    Full,
}

impl ChargeState {
    /// Decode a raw platform status code. Unrecognized codes map to `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            codes::STATUS_CHARGING => ChargeState::Charging,
            codes::STATUS_DISCHARGING => ChargeState::Discharging,
            codes::STATUS_NOT_CHARGING => ChargeState::NotCharging,
            codes::STATUS_FULL => ChargeState::Full,
            _ => ChargeState::Unknown,
        }
    }
}

impl fmt::Display for ChargeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ChargeState::Unknown => "Unknown",
            ChargeState::Charging => "Charging",
            ChargeState::Discharging => "Discharging",
            ChargeState::NotCharging => "Not charging",
            ChargeState::Full => "Full",
        };
        f.write_str(text)
    }
}

/// Power source the host is plugged into.
///
/// Only meaningful on the host reading; the accessory reading always carries
/// `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PluggedSource {
    /// Not plugged in, or the source is not one of the known kinds
    None,
    /// Wall charger
    Ac,
    /// USB host port
    Usb,
    /// Wireless charging pad
    Wireless,
}

impl PluggedSource {
    /// Decode a raw plug code. Unrecognized codes map to `None`.
    pub fn from_code(code: i32) -> Self {
        match code {
            codes::PLUGGED_AC => PluggedSource::Ac,
            codes::PLUGGED_USB => PluggedSource::Usb,
            codes::PLUGGED_WIRELESS => PluggedSource::Wireless,
            _ => PluggedSource::None,
        }
    }
}

impl fmt::Display for PluggedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PluggedSource::None => "unplugged",
            PluggedSource::Ac => "AC",
            PluggedSource::Usb => "USB",
            PluggedSource::Wireless => "wireless",
        };
        f.write_str(text)
    }
}

/// Declared role of the accessory battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageType {
    /// Role not declared or not readable
    Unknown,
    /// Standalone power bank
    Remote,
    /// Supplemental booster for the host battery
    Supplemental,
    /// Reserve used only when the host battery is exhausted
    Emergency,
}

impl UsageType {
    /// Decode a raw usage-type code. Unrecognized codes map to `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            codes::USAGE_REMOTE => UsageType::Remote,
            codes::USAGE_SUPPLEMENTAL => UsageType::Supplemental,
            codes::USAGE_EMERGENCY => UsageType::Emergency,
            _ => UsageType::Unknown,
        }
    }
}

impl fmt::Display for UsageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UsageType::Unknown => "Unknown",
            UsageType::Remote => "Remote",
            UsageType::Supplemental => "Supplemental",
            UsageType::Emergency => "Emergency",
        };
        f.write_str(text)
    }
}

/// Charging policy between the accessory battery and the host battery.
///
/// Only applicable to accessories declaring the supplemental usage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EfficiencyMode {
    /// The accessory feeds the host whenever it has charge
    Off,
    /// Transfer pauses until the host drops below the recharge threshold
    On,
    /// Policy not readable
    Unknown,
}

impl EfficiencyMode {
    /// Decode a raw efficiency-mode code. Unrecognized codes map to `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            codes::EFFICIENCY_OFF => EfficiencyMode::Off,
            codes::EFFICIENCY_ON => EfficiencyMode::On,
            _ => EfficiencyMode::Unknown,
        }
    }
}

impl fmt::Display for EfficiencyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EfficiencyMode::Off => "Off",
            EfficiencyMode::On => "On",
            EfficiencyMode::Unknown => "Unknown",
        };
        f.write_str(text)
    }
}

/// One battery reading.
///
/// `level_percent` is 0 to 100, negative when unknown. `full_capacity_mah`
/// is reported by accessory batteries only; zero or negative means invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryReading {
    /// Charge level percentage, negative when invalid
    pub level_percent: i32,
    /// Current charge state
    pub charge_state: ChargeState,
    /// Plug source, host reading only
    pub plugged: PluggedSource,
    /// Full battery capacity in mAh, accessory reading only
    pub full_capacity_mah: i64,
}

impl BatteryReading {
    /// A reading carrying the full invalid sentinel set.
    pub const fn invalid() -> Self {
        Self {
            level_percent: LEVEL_INVALID,
            charge_state: ChargeState::Unknown,
            plugged: PluggedSource::None,
            full_capacity_mah: 0,
        }
    }

    /// Whether the level field holds a real percentage.
    pub fn is_level_valid(&self) -> bool {
        self.level_percent >= 0
    }

    /// Remaining stored energy in mAh, `None` when level or capacity is
    /// invalid.
    pub fn stored_capacity_mah(&self) -> Option<i64> {
        if self.level_percent < 0 || self.full_capacity_mah <= 0 {
            None
        } else {
            Some(self.full_capacity_mah * i64::from(self.level_percent) / 100)
        }
    }
}

impl Default for BatteryReading {
    fn default() -> Self {
        Self::invalid()
    }
}

/// Accessory battery policy metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryContext {
    /// Declared role of the accessory battery
    pub usage_type: UsageType,
    /// Charging policy toward the host
    pub efficiency_mode: EfficiencyMode,
    /// Host level percentage below which transfer resumes
    pub recharge_start_soc: i32,
    /// Host level percentage at which transfer stops
    pub recharge_stop_soc: i32,
}

impl AccessoryContext {
    /// Context carrying the full invalid sentinel set.
    pub const fn invalid() -> Self {
        Self {
            usage_type: UsageType::Unknown,
            efficiency_mode: EfficiencyMode::Unknown,
            recharge_start_soc: SOC_INVALID,
            recharge_stop_soc: SOC_INVALID,
        }
    }
}

impl Default for AccessoryContext {
    fn default() -> Self {
        Self::invalid()
    }
}

/// One immutable telemetry snapshot.
///
/// A snapshot is produced fresh on every telemetry event and replaced as a
/// whole, never updated field by field. When no accessory battery is
/// available the accessory reading and context carry the invalid sentinel
/// set rather than stale values from a previous attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// The host device battery
    pub host: BatteryReading,
    /// The accessory battery
    pub accessory: BatteryReading,
    /// Accessory policy metadata
    pub context: AccessoryContext,
}

impl StatusSnapshot {
    /// Snapshot for a host reading with no accessory telemetry.
    pub const fn detached(host: BatteryReading) -> Self {
        Self {
            host,
            accessory: BatteryReading::invalid(),
            context: AccessoryContext::invalid(),
        }
    }

    /// Classify this snapshot. Shorthand for [`super::status::classify`].
    pub fn classify(&self) -> StatusReport {
        super::status::classify(self)
    }
}
