//! `PSTATE.PAN` — Privileged Access Never.
//!
//! The `MSR PAN, #imm` form is emitted as a raw instruction word so the
//! crate assembles without enabling the `pan` target feature.

/// `MSR PAN, #0`.
pub const SET_PSTATE_PAN_0: u32 = 0xD500_409F;

/// `MSR PAN, #1`.
pub const SET_PSTATE_PAN_1: u32 = 0xD500_419F;

/// Set or clear `PSTATE.PAN` on the current CPU.
///
/// # Safety
/// Must run at EL1 on a CPU whose `ID_AA64MMFR1_EL1.PAN` field is non-zero;
/// the instruction is UNDEFINED otherwise. With PAN set, EL1 data accesses to
/// EL0-accessible memory fault.
#[cfg(all(feature = "asm", target_arch = "aarch64"))]
#[inline]
pub unsafe fn set_pstate_pan(enabled: bool) {
    unsafe {
        if enabled {
            core::arch::asm!(".inst {op}", op = const SET_PSTATE_PAN_1, options(nomem, nostack));
        } else {
            core::arch::asm!(".inst {op}", op = const SET_PSTATE_PAN_0, options(nomem, nostack));
        }
    }
}
