//! Taking a CPU out of service for good.

use crate::capability::{Capability, CapabilityId};
use crate::smp::{CpuId, Smp};
use log::{debug, error};

/// A CPU that lacks a capability the system already relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncapableCpu {
    pub cpu: CpuId,
    /// Name of the table the capability belongs to.
    pub cap_type: &'static str,
    pub id: CapabilityId,
    pub desc: &'static str,
}

/// Report the calling CPU as incapable and remove it from the system.
///
/// Logs the missing capability, marks the CPU absent so nothing targets it
/// anymore, and asks the platform to power it down. If the platform cannot,
/// or the request returns, the caller must not run general code on this CPU
/// again; see [`park_forever`].
pub fn fail_incapable_cpu<S>(smp: &S, cap_type: &'static str, cap: &Capability) -> IncapableCpu
where
    S: Smp + ?Sized,
{
    let cpu = smp.current_cpu();

    error!("CPU{cpu}: missing {cap_type} : {}", cap.desc);
    smp.set_cpu_present(cpu, false);

    if !smp.cpu_die(cpu) {
        debug!("CPU{cpu}: no cpu_die operation, parking");
    }

    IncapableCpu {
        cpu,
        cap_type,
        id: cap.id,
        desc: cap.desc,
    }
}

/// Idle the calling CPU forever.
pub fn park_forever() -> ! {
    loop {
        #[cfg(all(feature = "asm", target_arch = "aarch64"))]
        unsafe {
            core::arch::asm!("wfe", "wfi", options(nomem, nostack, preserves_flags));
        }

        #[cfg(not(all(feature = "asm", target_arch = "aarch64")))]
        core::hint::spin_loop();
    }
}
