#[cfg(all(feature = "asm", target_arch = "aarch64"))]
use crate::{LoadRegisterUnsafe, StoreRegisterUnsafe};
use bitfield_struct::bitfield;

/// `SCTLR_EL1` — System Control Register (EL1).
///
/// Top-level control of the system at EL1/EL0, including the MMU, caches,
/// alignment checking, and the `PSTATE.PAN` behavior on exception entry.
///
/// Only the low word is modelled; the upper bits are kept as an opaque field
/// so a load/modify/store cycle preserves them.
#[bitfield(u64, order = Lsb)]
#[derive(Eq, PartialEq)]
pub struct SctlrEl1 {
    /// Bit 0 — M: MMU enable for EL1&0 stage 1 translation.
    pub m: bool,
    /// Bit 1 — A: Alignment check enable.
    pub a: bool,
    /// Bit 2 — C: Data cacheability control.
    pub c: bool,
    /// Bit 3 — SA: SP alignment check enable (EL1).
    pub sa: bool,
    /// Bit 4 — SA0: SP alignment check enable (EL0).
    pub sa0: bool,
    /// Bit 5 — CP15BEN: AArch32 CP15 barrier enable.
    pub cp15ben: bool,
    /// Bit 6 — nAA: Non-aligned access.
    pub naa: bool,
    /// Bit 7 — ITD: AArch32 IT disable.
    pub itd: bool,
    /// Bit 8 — SED: AArch32 SETEND disable.
    pub sed: bool,
    /// Bit 9 — UMA: User mask access (EL0 access to DAIF).
    pub uma: bool,
    /// Bit 10 — `EnRCTX`: EL0 access to prediction restriction instructions.
    pub enrctx: bool,
    /// Bit 11 — EOS: Exception exit is context synchronizing.
    pub eos: bool,
    /// Bit 12 — I: Instruction cacheability control.
    pub i: bool,
    /// Bit 13 — `EnDB`: Pointer authentication (APDBKey) enable.
    pub endb: bool,
    /// Bit 14 — DZE: EL0 access to `DC ZVA`.
    pub dze: bool,
    /// Bit 15 — UCT: EL0 access to `CTR_EL0`.
    pub uct: bool,
    /// Bit 16 — nTWI: Do not trap EL0 `WFI`.
    pub ntwi: bool,
    /// Bit 17 — Reserved.
    #[bits(access = RO)]
    pub reserved0: bool,
    /// Bit 18 — nTWE: Do not trap EL0 `WFE`.
    pub ntwe: bool,
    /// Bit 19 — WXN: Write permission implies execute-never.
    pub wxn: bool,
    /// Bit 20 — TSCXT: Trap EL0 access to `SCXTNUM_EL0`.
    pub tscxt: bool,
    /// Bit 21 — IESB: Implicit error synchronization barrier.
    pub iesb: bool,
    /// Bit 22 — EIS: Exception entry is context synchronizing.
    pub eis: bool,
    /// Bit 23 — SPAN: Set Privileged Access Never on exception to EL1.
    ///
    /// When **clear**, `PSTATE.PAN` is set on every exception taken to EL1.
    pub span: bool,
    /// Bit 24 — E0E: Endianness of explicit data accesses at EL0.
    pub e0e: bool,
    /// Bit 25 — EE: Endianness of explicit data accesses at EL1.
    pub ee: bool,
    /// Bit 26 — UCI: EL0 access to cache maintenance instructions.
    pub uci: bool,
    /// Bit 27 — `EnDA`: Pointer authentication (APDAKey) enable.
    pub enda: bool,
    /// Bit 28 — nTLSMD: No trap load/store multiple to device memory.
    pub ntlsmd: bool,
    /// Bit 29 — LSMAOE: Load/store multiple atomicity and ordering enable.
    pub lsmaoe: bool,
    /// Bit 30 — `EnIB`: Pointer authentication (APIBKey) enable.
    pub enib: bool,
    /// Bit 31 — `EnIA`: Pointer authentication (APIAKey) enable.
    pub enia: bool,
    /// Bits 32–63 — Later extensions, preserved as-is.
    #[bits(32)]
    pub upper: u32,
}

#[cfg(all(feature = "asm", target_arch = "aarch64"))]
impl LoadRegisterUnsafe for SctlrEl1 {
    unsafe fn load_unsafe() -> Self {
        let sctlr: u64;
        unsafe {
            core::arch::asm!("mrs {}, sctlr_el1", out(reg) sctlr, options(nomem, nostack, preserves_flags));
        }
        Self::from_bits(sctlr)
    }
}

#[cfg(all(feature = "asm", target_arch = "aarch64"))]
impl StoreRegisterUnsafe for SctlrEl1 {
    unsafe fn store_unsafe(self) {
        let sctlr = self.into_bits();
        unsafe {
            core::arch::asm!(
                "msr sctlr_el1, {}",
                "isb",
                in(reg) sctlr,
                options(nostack, preserves_flags)
            );
        }
    }
}
