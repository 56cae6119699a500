use bitfield_struct::bitfield;

/// `ID_AA64PFR0_EL1` — AArch64 Processor Feature Register 0.
///
/// Every field is a 4-bit ID field. Fields describing optional features
/// read `0b0000` when the feature is absent; `FP` and `AdvSIMD` are signed
/// and read `0b1111` (-1) when not implemented.
///
/// Reference: Arm ARM (DDI 0487), D19.2.64.
#[bitfield(u64, order = Lsb)]
#[derive(Eq, PartialEq)]
pub struct IdAa64Pfr0 {
    /// Bits 3:0 — EL0 handling (1: AArch64 only, 2: AArch64 and AArch32).
    #[bits(4)]
    pub el0: u8,
    /// Bits 7:4 — EL1 handling.
    #[bits(4)]
    pub el1: u8,
    /// Bits 11:8 — EL2 handling (0: not implemented).
    #[bits(4)]
    pub el2: u8,
    /// Bits 15:12 — EL3 handling (0: not implemented).
    #[bits(4)]
    pub el3: u8,
    /// Bits 19:16 — Floating-point (signed; 0xF: not implemented).
    #[bits(4)]
    pub fp: u8,
    /// Bits 23:20 — Advanced SIMD (signed; 0xF: not implemented).
    #[bits(4)]
    pub advsimd: u8,
    /// Bits 27:24 — System register GIC CPU interface (1: GICv3/v4 sysregs).
    #[bits(4)]
    pub gic: u8,
    /// Bits 31:28 — RAS extension.
    #[bits(4)]
    pub ras: u8,
    /// Bits 35:32 — Scalable Vector Extension.
    #[bits(4)]
    pub sve: u8,
    /// Bits 39:36 — Secure EL2.
    #[bits(4)]
    pub sel2: u8,
    /// Bits 43:40 — Memory Partitioning and Monitoring.
    #[bits(4)]
    pub mpam: u8,
    /// Bits 47:44 — Activity Monitors.
    #[bits(4)]
    pub amu: u8,
    /// Bits 51:48 — Data Independent Timing.
    #[bits(4)]
    pub dit: u8,
    /// Bits 55:52 — Realm Management Extension.
    #[bits(4)]
    pub rme: u8,
    /// Bits 59:56 — Speculative use of out-of-context branch targets.
    #[bits(4)]
    pub csv2: u8,
    /// Bits 63:60 — Speculative use of faulting data.
    #[bits(4)]
    pub csv3: u8,
}

impl IdAa64Pfr0 {
    pub const GIC_SHIFT: u8 = 24;
}
