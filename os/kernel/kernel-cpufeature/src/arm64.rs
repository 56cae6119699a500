//! Built-in arm64 capabilities.

use crate::capability::{Capability, CapabilityId};
use crate::field::FeatureField;
use crate::table::CapabilityTable;
use kernel_registers::{IdAa64Pfr0, SysReg};

/// Diagnostic name of the built-in table.
pub const ARM64_FEATURES_NAME: &str = "arm64_features";

pub const ARM64_HAS_SYSREG_GIC_CPUIF: CapabilityId = CapabilityId::new(0);
pub const ARM64_HAS_PAN: CapabilityId = CapabilityId::new(1);

#[cfg(feature = "pan")]
mod pan {
    use crate::capability::{Capability, EnableCapability};

    pub struct EnablePan;

    pub static ENABLE_PAN: EnablePan = EnablePan;

    impl EnableCapability for EnablePan {
        /// Clear `SCTLR_EL1.SPAN` so PAN is set on every exception to EL1,
        /// then set it for the current context.
        fn enable(&self, _cap: &Capability) {
            #[cfg(target_arch = "aarch64")]
            unsafe {
                use kernel_registers::{LoadRegisterUnsafe, SctlrEl1, StoreRegisterUnsafe};

                SctlrEl1::load_unsafe().with_span(false).store_unsafe();
                kernel_registers::pan::set_pstate_pan(true);
            }
        }
    }
}

static ARM64_FEATURES: &[Capability] = &[
    Capability::new(
        "GIC system register CPU interface",
        ARM64_HAS_SYSREG_GIC_CPUIF,
        SysReg::IdAa64Pfr0El1,
        FeatureField::id_reg(IdAa64Pfr0::GIC_SHIFT),
        1,
    )
    .verify_on(SysReg::IdAa64Pfr0El1),
    #[cfg(feature = "pan")]
    Capability::new(
        "Privileged Access Never",
        ARM64_HAS_PAN,
        SysReg::IdAa64Mmfr1El1,
        FeatureField::id_reg(kernel_registers::IdAa64Mmfr1::PAN_SHIFT),
        1,
    )
    .verify_on(SysReg::IdAa64Mmfr1El1)
    .with_enable(&pan::ENABLE_PAN),
];

/// The arm64 capability table.
///
/// # Panics
/// Panics if the built-in table is malformed.
#[must_use]
pub fn arm64_features() -> CapabilityTable<'static> {
    match CapabilityTable::new(ARM64_FEATURES_NAME, ARM64_FEATURES) {
        Ok(table) => table,
        Err(e) => panic!("{e}"),
    }
}
