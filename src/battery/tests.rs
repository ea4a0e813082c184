use super::constants::{codes, LEVEL_INVALID, SOC_INVALID};
use super::status::{classify, ChargeStatus};
use super::types::{
    AccessoryContext, BatteryReading, ChargeState, EfficiencyMode, PluggedSource, StatusSnapshot,
    UsageType,
};

fn host(level: i32, state: ChargeState, plugged: PluggedSource) -> BatteryReading {
    BatteryReading {
        level_percent: level,
        charge_state: state,
        plugged,
        full_capacity_mah: 0,
    }
}

fn accessory(level: i32, state: ChargeState) -> BatteryReading {
    BatteryReading {
        level_percent: level,
        charge_state: state,
        plugged: PluggedSource::None,
        full_capacity_mah: 3000,
    }
}

fn supplemental(efficiency: EfficiencyMode) -> AccessoryContext {
    AccessoryContext {
        usage_type: UsageType::Supplemental,
        efficiency_mode: efficiency,
        recharge_start_soc: 40,
        recharge_stop_soc: 80,
    }
}

fn snapshot(
    host: BatteryReading,
    accessory: BatteryReading,
    context: AccessoryContext,
) -> StatusSnapshot {
    StatusSnapshot {
        host,
        accessory,
        context,
    }
}

#[test]
fn invalid_capacity_classifies_absent_regardless_of_other_fields() {
    // Capacity at or below zero wins over every other signal, including an
    // accessory that claims to be charging while the host charges too.
    let mut acc = accessory(60, ChargeState::Charging);
    acc.full_capacity_mah = 0;
    let report = classify(&snapshot(
        host(80, ChargeState::Charging, PluggedSource::Ac),
        acc,
        supplemental(EfficiencyMode::On),
    ));
    assert_eq!(report.status, ChargeStatus::AccessoryAbsent);
    assert!(!report.charging);

    acc.full_capacity_mah = -200;
    let report = classify(&snapshot(
        host(80, ChargeState::Charging, PluggedSource::Ac),
        acc,
        supplemental(EfficiencyMode::On),
    ));
    assert_eq!(report.status, ChargeStatus::AccessoryAbsent);
}

#[test]
fn each_invalid_accessory_field_classifies_absent() {
    let valid_host = host(80, ChargeState::Discharging, PluggedSource::None);

    let unknown_state = accessory(60, ChargeState::Unknown);
    let report = classify(&snapshot(valid_host, unknown_state, supplemental(EfficiencyMode::On)));
    assert_eq!(report.status, ChargeStatus::AccessoryAbsent);

    let negative_level = accessory(LEVEL_INVALID, ChargeState::Discharging);
    let report = classify(&snapshot(valid_host, negative_level, supplemental(EfficiencyMode::On)));
    assert_eq!(report.status, ChargeStatus::AccessoryAbsent);

    let mut context = supplemental(EfficiencyMode::On);
    context.usage_type = UsageType::Unknown;
    let report = classify(&snapshot(valid_host, accessory(60, ChargeState::Discharging), context));
    assert_eq!(report.status, ChargeStatus::AccessoryAbsent);

    let mut context = supplemental(EfficiencyMode::On);
    context.recharge_start_soc = SOC_INVALID;
    let report = classify(&snapshot(valid_host, accessory(60, ChargeState::Discharging), context));
    assert_eq!(report.status, ChargeStatus::AccessoryAbsent);
}

#[test]
fn sentinel_snapshot_classifies_absent() {
    let report = StatusSnapshot::default().classify();
    assert_eq!(report.status, ChargeStatus::AccessoryAbsent);
    assert!(!report.charging);

    let detached = StatusSnapshot::detached(host(50, ChargeState::Discharging, PluggedSource::None));
    assert_eq!(detached.classify().status, ChargeStatus::AccessoryAbsent);
}

#[test]
fn charging_accessory_reports_accessory_charging() {
    let report = classify(&snapshot(
        host(80, ChargeState::Discharging, PluggedSource::None),
        accessory(60, ChargeState::Charging),
        supplemental(EfficiencyMode::On),
    ));
    assert_eq!(report.status, ChargeStatus::AccessoryCharging);
    assert!(report.charging);
}

#[test]
fn accessory_discharging_into_charging_host_reports_transfer() {
    let report = classify(&snapshot(
        host(70, ChargeState::Charging, PluggedSource::None),
        accessory(60, ChargeState::Discharging),
        supplemental(EfficiencyMode::On),
    ));
    assert_eq!(report.status, ChargeStatus::AccessoryPoweringHost);
    assert!(report.charging);
}

#[test]
fn host_charging_carries_the_plug_source() {
    for (plugged, expected) in [
        (PluggedSource::Ac, ChargeStatus::HostCharging(PluggedSource::Ac)),
        (PluggedSource::Usb, ChargeStatus::HostCharging(PluggedSource::Usb)),
        (
            PluggedSource::Wireless,
            ChargeStatus::HostCharging(PluggedSource::Wireless),
        ),
        (PluggedSource::None, ChargeStatus::HostCharging(PluggedSource::None)),
    ] {
        let report = classify(&snapshot(
            host(100, ChargeState::Charging, plugged),
            accessory(60, ChargeState::NotCharging),
            supplemental(EfficiencyMode::On),
        ));
        assert_eq!(report.status, expected);
        assert!(report.charging);
    }
}

#[test]
fn host_charging_wins_over_reserve_branches() {
    // A charging host at 100% with a non-discharging accessory would
    // otherwise classify as charge complete; the host branch is evaluated
    // first.
    let report = classify(&snapshot(
        host(100, ChargeState::Charging, PluggedSource::Ac),
        accessory(60, ChargeState::NotCharging),
        supplemental(EfficiencyMode::On),
    ));
    assert_eq!(report.status, ChargeStatus::HostCharging(PluggedSource::Ac));
    assert!(report.charging);
}

#[test]
fn full_host_with_idle_accessory_reports_charge_complete() {
    let report = classify(&snapshot(
        host(100, ChargeState::Full, PluggedSource::Ac),
        accessory(60, ChargeState::NotCharging),
        supplemental(EfficiencyMode::On),
    ));
    assert_eq!(report.status, ChargeStatus::ChargeComplete);
    assert!(!report.charging);
}

#[test]
fn efficiency_off_always_feeds_the_host() {
    let report = classify(&snapshot(
        host(90, ChargeState::Discharging, PluggedSource::None),
        accessory(60, ChargeState::NotCharging),
        supplemental(EfficiencyMode::Off),
    ));
    assert_eq!(report.status, ChargeStatus::AccessoryPoweringHost);
    assert!(report.charging);

    // Even at a full host level the off policy keeps feeding.
    let report = classify(&snapshot(
        host(100, ChargeState::Full, PluggedSource::None),
        accessory(60, ChargeState::Discharging),
        supplemental(EfficiencyMode::Off),
    ));
    assert_eq!(report.status, ChargeStatus::AccessoryPoweringHost);
    assert!(report.charging);
}

#[test]
fn paused_transfer_carries_the_resume_threshold() {
    let report = classify(&snapshot(
        host(80, ChargeState::Discharging, PluggedSource::None),
        accessory(60, ChargeState::Discharging),
        supplemental(EfficiencyMode::On),
    ));
    assert_eq!(
        report.status,
        ChargeStatus::TransferPaused { resume_below_soc: 40 }
    );
    assert!(!report.charging);
}

#[test]
fn empty_accessory_reports_empty() {
    let report = classify(&snapshot(
        host(80, ChargeState::Discharging, PluggedSource::None),
        accessory(0, ChargeState::NotCharging),
        supplemental(EfficiencyMode::On),
    ));
    assert_eq!(report.status, ChargeStatus::AccessoryEmpty);
    assert!(!report.charging);
}

#[test]
fn unknown_efficiency_with_charge_remaining_falls_through() {
    // No branch assigns a category in this configuration; the fallback
    // carries both charge states.
    let report = classify(&snapshot(
        host(80, ChargeState::Discharging, PluggedSource::None),
        accessory(60, ChargeState::NotCharging),
        supplemental(EfficiencyMode::Unknown),
    ));
    assert_eq!(
        report.status,
        ChargeStatus::Unknown {
            host: ChargeState::Discharging,
            accessory: ChargeState::NotCharging,
        }
    );
    assert!(!report.charging);
}

#[test]
fn classification_is_idempotent() {
    let snap = snapshot(
        host(80, ChargeState::Discharging, PluggedSource::None),
        accessory(60, ChargeState::Discharging),
        supplemental(EfficiencyMode::On),
    );
    assert_eq!(classify(&snap), classify(&snap));
    assert_eq!(snap.classify(), classify(&snap));
}

#[test]
fn raw_code_decoding() {
    assert_eq!(ChargeState::from_code(codes::STATUS_FULL), ChargeState::Full);
    assert_eq!(ChargeState::from_code(0), ChargeState::Unknown);
    assert_eq!(ChargeState::from_code(99), ChargeState::Unknown);

    assert_eq!(PluggedSource::from_code(codes::PLUGGED_WIRELESS), PluggedSource::Wireless);
    assert_eq!(PluggedSource::from_code(8), PluggedSource::None);

    assert_eq!(UsageType::from_code(codes::USAGE_EMERGENCY), UsageType::Emergency);
    assert_eq!(UsageType::from_code(-1), UsageType::Unknown);

    assert_eq!(EfficiencyMode::from_code(codes::EFFICIENCY_OFF), EfficiencyMode::Off);
    assert_eq!(EfficiencyMode::from_code(7), EfficiencyMode::Unknown);
}

#[test]
fn stored_capacity_tracks_the_level() {
    let reading = accessory(60, ChargeState::Discharging);
    assert_eq!(reading.stored_capacity_mah(), Some(1800));

    let invalid = BatteryReading::invalid();
    assert_eq!(invalid.stored_capacity_mah(), None);

    let mut no_capacity = accessory(60, ChargeState::Discharging);
    no_capacity.full_capacity_mah = 0;
    assert_eq!(no_capacity.stored_capacity_mah(), None);
}

#[test]
fn status_display_strings() {
    assert_eq!(ChargeStatus::AccessoryAbsent.to_string(), "Accessory battery absent");
    assert_eq!(
        ChargeStatus::HostCharging(PluggedSource::Ac).to_string(),
        "Host is charging on AC"
    );
    assert_eq!(
        ChargeStatus::HostCharging(PluggedSource::None).to_string(),
        "Host is charging"
    );
    assert_eq!(
        ChargeStatus::TransferPaused { resume_below_soc: 40 }.to_string(),
        "Transfer paused until host battery is below 40%"
    );
    assert_eq!(
        ChargeStatus::Unknown {
            host: ChargeState::Discharging,
            accessory: ChargeState::NotCharging,
        }
        .to_string(),
        "Unknown status (host: Discharging, accessory: Not charging)"
    );
}

#[test]
fn snapshot_serializes_round_trip() {
    let snap = snapshot(
        host(80, ChargeState::Discharging, PluggedSource::None),
        accessory(60, ChargeState::Discharging),
        supplemental(EfficiencyMode::On),
    );

    let json = serde_json::to_string(&snap).expect("serialize");
    assert!(json.contains("\"level_percent\":80"));

    let parsed: StatusSnapshot = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, snap);
}
