mod common;

use common::{FakeRegs, Recorder, Recording, Topology, isar0_cap};
use kernel_cpufeature::{
    Capability, CapabilityId, CapabilityTable, CpuFeatures, FeatureField, SysReg, arm64,
    arm64_features,
};

const AES: u8 = 4;
const SHA1: u8 = 8;
const SHA2: u8 = 12;

fn ids(features: &CpuFeatures) -> Vec<u16> {
    features
        .capabilities()
        .snapshot()
        .iter()
        .map(CapabilityId::raw)
        .collect()
}

#[test]
fn detects_matching_capabilities_only() {
    let caps = [
        isar0_cap("aes", 0, AES, 1),
        isar0_cap("sha1", 1, SHA1, 1),
        isar0_cap("sha2", 2, SHA2, 1),
    ];
    let table = CapabilityTable::new("test_features", &caps).unwrap();
    let boot = FakeRegs::new()
        .with_field(SysReg::IdAa64Isar0El1, AES, 1)
        .with_field(SysReg::IdAa64Isar0El1, SHA2, 2);

    let features = CpuFeatures::new();
    features.detect_system_capabilities(&table, &boot);

    assert_eq!(ids(&features), [0, 2]);
    assert!(features.cpus_have_cap(CapabilityId::new(0)));
    assert!(!features.cpus_have_cap(CapabilityId::new(1)));
}

#[test]
fn threshold_boundary_on_both_sides() {
    for min in 1..=7 {
        let caps = [isar0_cap("aes", 0, AES, min)];
        let table = CapabilityTable::new("test_features", &caps).unwrap();

        #[allow(clippy::cast_sign_loss)]
        let below = FakeRegs::new().with_field(SysReg::IdAa64Isar0El1, AES, (min - 1) as u64);
        #[allow(clippy::cast_sign_loss)]
        let at = FakeRegs::new().with_field(SysReg::IdAa64Isar0El1, AES, min as u64);

        let features = CpuFeatures::new();
        features.detect_system_capabilities(&table, &below);
        assert!(features.capabilities().is_empty(), "min {min}: one below must not match");

        let features = CpuFeatures::new();
        features.detect_system_capabilities(&table, &at);
        assert_eq!(ids(&features), [0], "min {min}: threshold must match");
    }
}

#[test]
fn not_implemented_field_never_matches() {
    let caps = [isar0_cap("aes", 0, AES, 0)];
    let table = CapabilityTable::new("test_features", &caps).unwrap();
    let regs = FakeRegs::new().with_field(SysReg::IdAa64Isar0El1, AES, 0xF);

    let features = CpuFeatures::new();
    features.detect_system_capabilities(&table, &regs);
    assert!(features.capabilities().is_empty());
}

#[test]
fn nothing_matches_nothing_is_enabled() {
    let rec = Recorder::leak();
    let caps = [
        isar0_cap("aes", 0, AES, 1).with_enable(Recording::leak(rec, 0)),
        isar0_cap("sha1", 1, SHA1, 1).with_enable(Recording::leak(rec, 1)),
    ];
    let table = CapabilityTable::new("test_features", &caps).unwrap();
    let topology = Topology::new(4, 4);

    let features = CpuFeatures::new();
    features.detect_system_capabilities(&table, &FakeRegs::new());
    features.setup_system_capabilities(&table, &topology.on(0));

    assert!(features.capabilities().is_empty());
    assert!(rec.calls().is_empty());
    assert!(topology.ran_on.lock().unwrap().is_empty());
}

#[test]
fn detection_is_deterministic_and_idempotent() {
    let caps = [
        isar0_cap("aes", 0, AES, 1),
        isar0_cap("sha1", 1, SHA1, 1),
        isar0_cap("sha2", 2, SHA2, 1),
    ];
    let table = CapabilityTable::new("test_features", &caps).unwrap();
    let boot = FakeRegs::new()
        .with_field(SysReg::IdAa64Isar0El1, SHA1, 1)
        .with_field(SysReg::IdAa64Isar0El1, SHA2, 1);

    let first = CpuFeatures::new();
    first.detect_system_capabilities(&table, &boot);
    let second = CpuFeatures::new();
    second.detect_system_capabilities(&table, &boot);
    assert_eq!(first.capabilities().snapshot(), second.capabilities().snapshot());

    // running the same detection again adds nothing
    let before = first.capabilities().snapshot();
    first.check_cpu_capabilities(&table, &boot, "detected feature:");
    assert_eq!(first.capabilities().snapshot(), before);
    assert_eq!(first.capabilities().len(), 2);
}

#[test]
fn set_only_grows_across_detections() {
    let caps = [isar0_cap("aes", 0, AES, 1), isar0_cap("sha1", 1, SHA1, 1)];
    let table = CapabilityTable::new("test_features", &caps).unwrap();
    let features = CpuFeatures::new();

    features.check_cpu_capabilities(
        &table,
        &FakeRegs::new().with_field(SysReg::IdAa64Isar0El1, AES, 1),
        "cpu0",
    );
    let after_first = features.capabilities().snapshot();

    // a CPU without AES cannot take it away
    features.check_cpu_capabilities(
        &table,
        &FakeRegs::new().with_field(SysReg::IdAa64Isar0El1, SHA1, 1),
        "cpu1",
    );
    let after_second = features.capabilities().snapshot();

    assert!(after_first.is_subset(&after_second));
    assert_eq!(ids(&features), [0, 1]);
}

#[test]
fn custom_matcher_decides_presence() {
    fn dczid_blocks_allowed(_cap: &Capability, reg: u64) -> bool {
        // DCZID_EL0.DZP (bit 4) clear means DC ZVA is permitted
        reg & (1 << 4) == 0
    }

    let caps = [Capability::new(
        "DC ZVA",
        CapabilityId::new(5),
        SysReg::DczidEl0,
        FeatureField::id_reg_unsigned(0),
        0,
    )
    .with_matcher(dczid_blocks_allowed)];
    let table = CapabilityTable::new("test_features", &caps).unwrap();

    let features = CpuFeatures::new();
    features.detect_system_capabilities(&table, &FakeRegs::new().with_field(SysReg::DczidEl0, 4, 1));
    assert!(features.capabilities().is_empty());

    features.detect_system_capabilities(&table, &FakeRegs::new());
    assert_eq!(ids(&features), [5]);
}

#[test]
fn builtin_table_detects_gic_sysregs() {
    let boot = FakeRegs::new().with_field(SysReg::IdAa64Pfr0El1, 24, 1);

    let features = CpuFeatures::new();
    features.detect_system_capabilities(&arm64_features(), &boot);

    assert!(features.cpus_have_cap(arm64::ARM64_HAS_SYSREG_GIC_CPUIF));
    assert!(!features.cpus_have_cap(arm64::ARM64_HAS_PAN));
}

#[cfg(feature = "pan")]
#[test]
fn builtin_table_detects_pan() {
    let boot = FakeRegs::new().with_field(SysReg::IdAa64Mmfr1El1, 20, 1);

    let features = CpuFeatures::new();
    features.detect_system_capabilities(&arm64_features(), &boot);

    assert!(features.cpus_have_cap(arm64::ARM64_HAS_PAN));
    assert!(!features.cpus_have_cap(arm64::ARM64_HAS_SYSREG_GIC_CPUIF));
}
