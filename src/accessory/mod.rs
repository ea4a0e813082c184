//! Accessory device identity and the port to the platform accessory API.
//!
//! [`AccessoryPort`] is the seam between this crate and whatever transport
//! the platform provides for talking to an attached accessory. Everything
//! above it works against the trait, so tests substitute a mock and real
//! integrations wrap the platform bindings.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Well-known vendor and product identifiers.
pub mod ids {
    /// Vendor id assigned to development-kit accessories.
    pub const VID_DEV_KIT: i32 = 0x0120;
    /// Vendor id reported while an accessory runs in developer mode.
    pub const VID_DEVELOPER: i32 = 0x0042;
    /// Product id reported while an accessory runs in developer mode.
    pub const PID_DEVELOPER: i32 = 0x0001;
    /// Product id of the reference battery accessory.
    pub const PID_BATTERY: i32 = 0x0021;
    /// Identity fields carrying this value are unset.
    pub const INVALID_ID: i32 = -1;
}

/// Protocols an accessory may declare in its hardware manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Protocol {
    /// The accessory exposes a battery
    Battery,
}

/// Identity of an attached accessory, as read from its hardware manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryIdentity {
    /// Vendor id, unique per vendor
    pub vendor_id: i32,
    /// Product id, assigned by the vendor
    pub product_id: i32,
    /// Product display name
    pub product: String,
    /// Firmware version string, when reported
    pub firmware_version: Option<String>,
}

impl AccessoryIdentity {
    /// Whether this accessory is a development kit, either directly or
    /// running in developer mode.
    pub fn is_development_kit(&self) -> bool {
        if self.vendor_id == ids::VID_DEVELOPER && self.product_id == ids::PID_DEVELOPER {
            return true;
        }
        self.vendor_id == ids::VID_DEV_KIT
    }

    /// Whether this is the reference battery accessory.
    pub fn is_battery_reference(&self) -> bool {
        self.vendor_id == ids::VID_DEV_KIT && self.product_id == ids::PID_BATTERY
    }
}

/// Integer battery properties exposed by an accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryProperty {
    /// Declared role of the accessory battery
    UsageType,
    /// Charging policy toward the host
    EfficiencyMode,
    /// Host level percentage below which transfer resumes
    RechargeStartSoc,
    /// Host level percentage at which transfer stops
    RechargeStopSoc,
}

/// Port to the platform accessory API.
///
/// Every query targets the currently attached accessory. An accessory can
/// vanish between any two calls, in which case the query fails with
/// [`crate::Error::AccessoryGone`]; callers are expected to fall back to
/// the invalid sentinel set rather than retry.
#[cfg_attr(test, mockall::automock)]
pub trait AccessoryPort: Send + Sync {
    /// Whether an accessory is currently attached.
    fn attached(&self) -> bool;

    /// Whether the attached accessory declares the given protocol.
    fn declares(&self, protocol: Protocol) -> bool;

    /// Identity of the attached accessory, if any.
    fn identity(&self) -> Option<AccessoryIdentity>;

    /// Read one integer battery property.
    fn int_property(&self, property: BatteryProperty) -> Result<i32>;

    /// Current accessory battery level percentage.
    fn battery_level(&self) -> Result<i32>;

    /// Raw accessory charge-state code.
    fn battery_status(&self) -> Result<i32>;

    /// Full accessory battery capacity in mAh.
    fn battery_capacity_mah(&self) -> Result<i64>;
}
