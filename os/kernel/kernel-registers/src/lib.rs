//! # Typed `AArch64` Registers
//!
//! Identifiers and bitfield views for the system registers involved in CPU
//! capability detection, plus live accessors behind the `asm` feature.
//!
//! The [`ReadSysReg`] trait is the seam between capability logic and the
//! hardware: the kernel reads through [`CurrentCpuRegs`], tests through a
//! table of canned values.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

#[cfg(all(feature = "asm", target_arch = "aarch64"))]
mod current;
mod id_aa64mmfr1;
mod id_aa64pfr0;
pub mod pan;
mod sctlr;
mod sys_reg;

#[cfg(all(feature = "asm", target_arch = "aarch64"))]
pub use current::CurrentCpuRegs;
pub use id_aa64mmfr1::IdAa64Mmfr1;
pub use id_aa64pfr0::IdAa64Pfr0;
pub use sctlr::SctlrEl1;
pub use sys_reg::{SysReg, UnknownSysReg, sys_reg};

/// Reads an identification register as seen by the calling CPU.
///
/// Implementations must be side-effect free: the same CPU reading the same
/// register twice observes the same value.
pub trait ReadSysReg {
    fn read_sys_reg(&self, reg: SysReg) -> u64;
}

impl<T> ReadSysReg for &T
where
    T: ReadSysReg + ?Sized,
{
    #[inline]
    fn read_sys_reg(&self, reg: SysReg) -> u64 {
        (**self).read_sys_reg(reg)
    }
}

pub trait LoadRegisterUnsafe {
    /// # Safety
    /// The caller must uphold the implementation-specific safety requirements.
    /// For example, the register access might be privileged and require EL1.
    unsafe fn load_unsafe() -> Self;
}

pub trait StoreRegisterUnsafe {
    /// # Safety
    /// The caller must uphold the implementation-specific safety requirements.
    /// For example, the register access might be privileged and require EL1.
    unsafe fn store_unsafe(self);
}
