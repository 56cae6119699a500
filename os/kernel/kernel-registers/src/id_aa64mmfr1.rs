use bitfield_struct::bitfield;

/// `ID_AA64MMFR1_EL1` — AArch64 Memory Model Feature Register 1.
///
/// Reference: Arm ARM (DDI 0487), D19.2.62.
#[bitfield(u64, order = Lsb)]
#[derive(Eq, PartialEq)]
pub struct IdAa64Mmfr1 {
    /// Bits 3:0 — Hardware updates of Access flag and dirty state.
    #[bits(4)]
    pub hafdbs: u8,
    /// Bits 7:4 — Number of VMID bits (0: 8 bits, 2: 16 bits).
    #[bits(4)]
    pub vmid_bits: u8,
    /// Bits 11:8 — Virtualization Host Extensions.
    #[bits(4)]
    pub vh: u8,
    /// Bits 15:12 — Hierarchical Permission Disables.
    #[bits(4)]
    pub hpds: u8,
    /// Bits 19:16 — LORegions.
    #[bits(4)]
    pub lo: u8,
    /// Bits 23:20 — Privileged Access Never (1: PAN, 2: PAN2, 3: PAN3).
    #[bits(4)]
    pub pan: u8,
    /// Bits 27:24 — SError interrupt on speculative reads.
    #[bits(4)]
    pub spec_sei: u8,
    /// Bits 31:28 — Stage 2 execute-never control.
    #[bits(4)]
    pub xnx: u8,
    /// Bits 35:32 — Timed WFE trapping.
    #[bits(4)]
    pub twed: u8,
    /// Bits 39:36 — Enhanced translation synchronization.
    #[bits(4)]
    pub ets: u8,
    /// Bits 43:40 — `HCRX_EL2` support.
    #[bits(4)]
    pub hcx: u8,
    /// Bits 47:44 — Alternate floating-point behavior.
    #[bits(4)]
    pub afp: u8,
    /// Bits 51:48 — Intermediate caching of translation table walks.
    #[bits(4)]
    pub ntlbpa: u8,
    /// Bits 55:52 — `SCTLR_EL1.TIDCP` trapping.
    #[bits(4)]
    pub tidcp1: u8,
    /// Bits 59:56 — Cache maintenance instruction permission.
    #[bits(4)]
    pub cmow: u8,
    /// Bits 63:60 — Extended TLB invalidation by hint.
    #[bits(4)]
    pub ecbhe: u8,
}

impl IdAa64Mmfr1 {
    pub const PAN_SHIFT: u8 = 20;
}
