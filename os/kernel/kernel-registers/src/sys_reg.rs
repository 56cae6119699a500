//! # AArch64 system register identifiers
//!
//! System registers are addressed by the `(op0, op1, CRn, CRm, op2)` tuple used
//! in the `MRS`/`MSR` instruction encoding. [`SysReg`] enumerates the
//! identification registers a CPU capability can be derived from, with the
//! packed encoding as discriminant:
//!
//! ```text
//!  21 20 19 18 17 16 15   12 11    8 7  6  5 4    0
//! +-----+-----+--------+--------+--------+---------+
//! | op0 | op1 |  CRn   |  CRm   |  op2   |   0     |
//! +-----+-----+--------+--------+--------+---------+
//! ```
//!
//! ## References
//! - Arm ARM (DDI 0487), §D19 "AArch64 System Register Descriptions"
//! - Arm ARM (DDI 0487), §C5.3 "A64 System instructions for system register access"

use core::fmt;

const OP0_SHIFT: u32 = 19;
const OP1_SHIFT: u32 = 16;
const CRN_SHIFT: u32 = 12;
const CRM_SHIFT: u32 = 8;
const OP2_SHIFT: u32 = 5;

/// Pack an `(op0, op1, CRn, CRm, op2)` tuple into a system register encoding.
#[must_use]
pub const fn sys_reg(op0: u32, op1: u32, crn: u32, crm: u32, op2: u32) -> u32 {
    (op0 << OP0_SHIFT) | (op1 << OP1_SHIFT) | (crn << CRN_SHIFT) | (crm << CRM_SHIFT) | (op2 << OP2_SHIFT)
}

/// An identification register a CPU capability may be derived from.
///
/// The discriminant is the register's [`sys_reg`] encoding.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SysReg {
    IdPfr0El1 = sys_reg(3, 0, 0, 1, 0),
    IdPfr1El1 = sys_reg(3, 0, 0, 1, 1),
    IdDfr0El1 = sys_reg(3, 0, 0, 1, 2),
    IdMmfr0El1 = sys_reg(3, 0, 0, 1, 4),
    IdMmfr1El1 = sys_reg(3, 0, 0, 1, 5),
    IdMmfr2El1 = sys_reg(3, 0, 0, 1, 6),
    IdMmfr3El1 = sys_reg(3, 0, 0, 1, 7),
    IdIsar0El1 = sys_reg(3, 0, 0, 2, 0),
    IdIsar1El1 = sys_reg(3, 0, 0, 2, 1),
    IdIsar2El1 = sys_reg(3, 0, 0, 2, 2),
    IdIsar3El1 = sys_reg(3, 0, 0, 2, 3),
    IdIsar4El1 = sys_reg(3, 0, 0, 2, 4),
    IdIsar5El1 = sys_reg(3, 0, 0, 2, 5),
    Mvfr0El1 = sys_reg(3, 0, 0, 3, 0),
    Mvfr1El1 = sys_reg(3, 0, 0, 3, 1),
    Mvfr2El1 = sys_reg(3, 0, 0, 3, 2),

    IdAa64Pfr0El1 = sys_reg(3, 0, 0, 4, 0),
    IdAa64Pfr1El1 = sys_reg(3, 0, 0, 4, 1),
    IdAa64Dfr0El1 = sys_reg(3, 0, 0, 5, 0),
    IdAa64Dfr1El1 = sys_reg(3, 0, 0, 5, 1),
    IdAa64Isar0El1 = sys_reg(3, 0, 0, 6, 0),
    IdAa64Isar1El1 = sys_reg(3, 0, 0, 6, 1),
    IdAa64Mmfr0El1 = sys_reg(3, 0, 0, 7, 0),
    IdAa64Mmfr1El1 = sys_reg(3, 0, 0, 7, 1),
    IdAa64Mmfr2El1 = sys_reg(3, 0, 0, 7, 2),

    CtrEl0 = sys_reg(3, 3, 0, 0, 1),
    DczidEl0 = sys_reg(3, 3, 0, 0, 7),
    CntfrqEl0 = sys_reg(3, 3, 14, 0, 0),
}

impl SysReg {
    /// Number of supported identification registers.
    pub const COUNT: usize = Self::ALL.len();

    /// Every supported register, in encoding order.
    pub const ALL: [Self; 28] = [
        Self::IdPfr0El1,
        Self::IdPfr1El1,
        Self::IdDfr0El1,
        Self::IdMmfr0El1,
        Self::IdMmfr1El1,
        Self::IdMmfr2El1,
        Self::IdMmfr3El1,
        Self::IdIsar0El1,
        Self::IdIsar1El1,
        Self::IdIsar2El1,
        Self::IdIsar3El1,
        Self::IdIsar4El1,
        Self::IdIsar5El1,
        Self::Mvfr0El1,
        Self::Mvfr1El1,
        Self::Mvfr2El1,
        Self::IdAa64Pfr0El1,
        Self::IdAa64Pfr1El1,
        Self::IdAa64Dfr0El1,
        Self::IdAa64Dfr1El1,
        Self::IdAa64Isar0El1,
        Self::IdAa64Isar1El1,
        Self::IdAa64Mmfr0El1,
        Self::IdAa64Mmfr1El1,
        Self::IdAa64Mmfr2El1,
        Self::CtrEl0,
        Self::DczidEl0,
        Self::CntfrqEl0,
    ];

    /// Returns the packed `(op0, op1, CRn, CRm, op2)` encoding.
    #[inline(always)]
    #[allow(clippy::inline_always)]
    #[must_use]
    pub const fn encoding(self) -> u32 {
        self as u32
    }

    /// Position of this register in [`SysReg::ALL`].
    ///
    /// Handy as an index into per-register lookup arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        let mut i = 0;
        while i < Self::COUNT {
            if Self::ALL[i].encoding() == self.encoding() {
                return i;
            }
            i += 1;
        }
        unreachable!()
    }

    /// Architectural register name, e.g. `ID_AA64PFR0_EL1`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IdPfr0El1 => "ID_PFR0_EL1",
            Self::IdPfr1El1 => "ID_PFR1_EL1",
            Self::IdDfr0El1 => "ID_DFR0_EL1",
            Self::IdMmfr0El1 => "ID_MMFR0_EL1",
            Self::IdMmfr1El1 => "ID_MMFR1_EL1",
            Self::IdMmfr2El1 => "ID_MMFR2_EL1",
            Self::IdMmfr3El1 => "ID_MMFR3_EL1",
            Self::IdIsar0El1 => "ID_ISAR0_EL1",
            Self::IdIsar1El1 => "ID_ISAR1_EL1",
            Self::IdIsar2El1 => "ID_ISAR2_EL1",
            Self::IdIsar3El1 => "ID_ISAR3_EL1",
            Self::IdIsar4El1 => "ID_ISAR4_EL1",
            Self::IdIsar5El1 => "ID_ISAR5_EL1",
            Self::Mvfr0El1 => "MVFR0_EL1",
            Self::Mvfr1El1 => "MVFR1_EL1",
            Self::Mvfr2El1 => "MVFR2_EL1",
            Self::IdAa64Pfr0El1 => "ID_AA64PFR0_EL1",
            Self::IdAa64Pfr1El1 => "ID_AA64PFR1_EL1",
            Self::IdAa64Dfr0El1 => "ID_AA64DFR0_EL1",
            Self::IdAa64Dfr1El1 => "ID_AA64DFR1_EL1",
            Self::IdAa64Isar0El1 => "ID_AA64ISAR0_EL1",
            Self::IdAa64Isar1El1 => "ID_AA64ISAR1_EL1",
            Self::IdAa64Mmfr0El1 => "ID_AA64MMFR0_EL1",
            Self::IdAa64Mmfr1El1 => "ID_AA64MMFR1_EL1",
            Self::IdAa64Mmfr2El1 => "ID_AA64MMFR2_EL1",
            Self::CtrEl0 => "CTR_EL0",
            Self::DczidEl0 => "DCZID_EL0",
            Self::CntfrqEl0 => "CNTFRQ_EL0",
        }
    }
}

impl fmt::Display for SysReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The encoding does not name a supported identification register.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown system register encoding {0:#08x}")]
pub struct UnknownSysReg(pub u32);

impl TryFrom<u32> for SysReg {
    type Error = UnknownSysReg;

    fn try_from(encoding: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|reg| reg.encoding() == encoding)
            .ok_or(UnknownSysReg(encoding))
    }
}

impl From<SysReg> for u32 {
    fn from(reg: SysReg) -> Self {
        reg.encoding()
    }
}
