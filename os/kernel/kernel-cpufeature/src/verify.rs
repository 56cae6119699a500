use crate::cpu_features::CpuFeatures;
use crate::park::{IncapableCpu, fail_incapable_cpu, park_forever};
use crate::smp::Smp;
use crate::table::CapabilityTable;
use kernel_registers::ReadSysReg;
use log::debug;

/// Final state of a CPU that went through capability verification.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The CPU matches the system and may start working.
    Joined,
    /// The CPU lacks a committed capability and has been removed. It must
    /// not execute anything but [`park_forever`] from here on.
    Parked(IncapableCpu),
}

impl Verdict {
    #[must_use]
    pub const fn is_joined(&self) -> bool {
        matches!(self, Self::Joined)
    }
}

impl CpuFeatures {
    /// Check the calling CPU against the frozen system capabilities and
    /// enable them on it.
    ///
    /// Until [`set_sys_caps_initialised`](Self::set_sys_caps_initialised) the
    /// CPU is part of the boot set and joins unchecked.
    ///
    /// Otherwise every system capability with a verification register is
    /// re-read locally, in table order. The first one that does not match
    /// parks the CPU; nothing after it is checked or enabled. Matching
    /// capabilities are enabled as they are checked. Once all passed, a second
    /// pass calls [`enable_interacting`](crate::EnableCapability::enable_interacting)
    /// for every enabled system capability, so capabilities that depend on
    /// each other can finish their setup.
    pub fn verify_local_cpu_capabilities<R, S>(
        &self,
        table: &CapabilityTable<'_>,
        regs: &R,
        smp: &S,
    ) -> Verdict
    where
        R: ReadSysReg + ?Sized,
        S: Smp + ?Sized,
    {
        // nothing to verify against yet
        if !self.sys_caps_initialised() {
            return Verdict::Joined;
        }

        for cap in table {
            let Some(sys_reg) = cap.sys_reg else {
                continue;
            };
            if !self.cpus_have_cap(cap.id) {
                continue;
            }

            if !cap.matches(regs.read_sys_reg(sys_reg)) {
                return Verdict::Parked(fail_incapable_cpu(smp, table.name(), cap));
            }

            if let Some(enable) = cap.enable {
                enable.enable(cap);
            }
        }

        // second pass allows enable() to consider interacting capabilities
        for cap in table {
            if let Some(enable) = cap.enable
                && self.cpus_have_cap(cap.id)
            {
                enable.enable_interacting();
            }
        }

        debug!("CPU{}: capabilities verified", smp.current_cpu());
        Verdict::Joined
    }

    /// Hotplug entry point: verify the calling CPU and never return if it has
    /// to be parked.
    pub fn secondary_cpu_capabilities_check<R, S>(
        &self,
        table: &CapabilityTable<'_>,
        regs: &R,
        smp: &S,
    ) where
        R: ReadSysReg + ?Sized,
        S: Smp + ?Sized,
    {
        if let Verdict::Parked(_) = self.verify_local_cpu_capabilities(table, regs, smp) {
            park_forever();
        }
    }
}
