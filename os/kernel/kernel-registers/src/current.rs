use crate::{ReadSysReg, SysReg};

/// Reads identification registers of the CPU executing the call.
///
/// Every supported [`SysReg`] is readable at EL1 and has no side effects, so
/// the reader is safe to construct and use from any kernel context.
#[derive(Debug, Default, Copy, Clone)]
pub struct CurrentCpuRegs;

macro_rules! mrs {
    ($reg:literal) => {{
        let value: u64;
        unsafe {
            core::arch::asm!(
                concat!("mrs {}, ", $reg),
                out(reg) value,
                options(nomem, nostack, preserves_flags)
            );
        }
        value
    }};
}

impl ReadSysReg for CurrentCpuRegs {
    fn read_sys_reg(&self, reg: SysReg) -> u64 {
        match reg {
            SysReg::IdPfr0El1 => mrs!("id_pfr0_el1"),
            SysReg::IdPfr1El1 => mrs!("id_pfr1_el1"),
            SysReg::IdDfr0El1 => mrs!("id_dfr0_el1"),
            SysReg::IdMmfr0El1 => mrs!("id_mmfr0_el1"),
            SysReg::IdMmfr1El1 => mrs!("id_mmfr1_el1"),
            SysReg::IdMmfr2El1 => mrs!("id_mmfr2_el1"),
            SysReg::IdMmfr3El1 => mrs!("id_mmfr3_el1"),
            SysReg::IdIsar0El1 => mrs!("id_isar0_el1"),
            SysReg::IdIsar1El1 => mrs!("id_isar1_el1"),
            SysReg::IdIsar2El1 => mrs!("id_isar2_el1"),
            SysReg::IdIsar3El1 => mrs!("id_isar3_el1"),
            SysReg::IdIsar4El1 => mrs!("id_isar4_el1"),
            SysReg::IdIsar5El1 => mrs!("id_isar5_el1"),
            SysReg::Mvfr0El1 => mrs!("mvfr0_el1"),
            SysReg::Mvfr1El1 => mrs!("mvfr1_el1"),
            SysReg::Mvfr2El1 => mrs!("mvfr2_el1"),

            SysReg::IdAa64Pfr0El1 => mrs!("id_aa64pfr0_el1"),
            SysReg::IdAa64Pfr1El1 => mrs!("id_aa64pfr1_el1"),
            SysReg::IdAa64Dfr0El1 => mrs!("id_aa64dfr0_el1"),
            SysReg::IdAa64Dfr1El1 => mrs!("id_aa64dfr1_el1"),
            SysReg::IdAa64Isar0El1 => mrs!("id_aa64isar0_el1"),
            SysReg::IdAa64Isar1El1 => mrs!("id_aa64isar1_el1"),
            SysReg::IdAa64Mmfr0El1 => mrs!("id_aa64mmfr0_el1"),
            SysReg::IdAa64Mmfr1El1 => mrs!("id_aa64mmfr1_el1"),
            // generic name; older assemblers lack the mnemonic
            SysReg::IdAa64Mmfr2El1 => mrs!("s3_0_c0_c7_2"),

            SysReg::CtrEl0 => mrs!("ctr_el0"),
            SysReg::DczidEl0 => mrs!("dczid_el0"),
            SysReg::CntfrqEl0 => mrs!("cntfrq_el0"),
        }
    }
}
