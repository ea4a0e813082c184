use std::sync::Arc;

use parking_lot::Mutex;

use accessory_metrics::accessory::{AccessoryIdentity, AccessoryPort, BatteryProperty, Protocol};
use accessory_metrics::battery::constants::codes;
use accessory_metrics::{Error, Result};

/// Mutable state behind a [`FakeAccessory`].
///
/// Tests keep a handle to the state and flip fields mid-scenario to model
/// detaches, capability loss, and accessories vanishing mid-query.
#[derive(Debug, Clone)]
pub struct FakeAccessoryState {
    pub attached: bool,
    pub declares_battery: bool,
    pub identity: Option<AccessoryIdentity>,
    pub usage_type: i32,
    pub efficiency_mode: i32,
    pub recharge_start_soc: i32,
    pub recharge_stop_soc: i32,
    pub level: i32,
    pub status: i32,
    pub capacity_mah: i64,
    /// When set, every battery query fails as if the accessory vanished.
    pub vanished: bool,
}

impl Default for FakeAccessoryState {
    fn default() -> Self {
        Self {
            attached: true,
            declares_battery: true,
            identity: None,
            usage_type: codes::USAGE_SUPPLEMENTAL,
            efficiency_mode: codes::EFFICIENCY_ON,
            recharge_start_soc: 40,
            recharge_stop_soc: 80,
            level: 60,
            status: codes::STATUS_DISCHARGING,
            capacity_mah: 3000,
            vanished: false,
        }
    }
}

/// Scriptable [`AccessoryPort`] for integration tests.
pub struct FakeAccessory {
    state: Arc<Mutex<FakeAccessoryState>>,
}

impl FakeAccessory {
    pub fn new(state: FakeAccessoryState) -> (Self, Arc<Mutex<FakeAccessoryState>>) {
        let state = Arc::new(Mutex::new(state));
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }

    fn battery_query<T>(&self, read: impl Fn(&FakeAccessoryState) -> T) -> Result<T> {
        let state = self.state.lock();
        if state.vanished {
            return Err(Error::AccessoryGone);
        }
        Ok(read(&state))
    }
}

impl AccessoryPort for FakeAccessory {
    fn attached(&self) -> bool {
        self.state.lock().attached
    }

    fn declares(&self, protocol: Protocol) -> bool {
        matches!(protocol, Protocol::Battery) && self.state.lock().declares_battery
    }

    fn identity(&self) -> Option<AccessoryIdentity> {
        self.state.lock().identity.clone()
    }

    fn int_property(&self, property: BatteryProperty) -> Result<i32> {
        self.battery_query(|state| match property {
            BatteryProperty::UsageType => state.usage_type,
            BatteryProperty::EfficiencyMode => state.efficiency_mode,
            BatteryProperty::RechargeStartSoc => state.recharge_start_soc,
            BatteryProperty::RechargeStopSoc => state.recharge_stop_soc,
        })
    }

    fn battery_level(&self) -> Result<i32> {
        self.battery_query(|state| state.level)
    }

    fn battery_status(&self) -> Result<i32> {
        self.battery_query(|state| state.status)
    }

    fn battery_capacity_mah(&self) -> Result<i64> {
        self.battery_query(|state| state.capacity_mah)
    }
}
