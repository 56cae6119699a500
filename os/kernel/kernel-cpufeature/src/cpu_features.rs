use crate::capability::CapabilityId;
use crate::caps::CapabilitySet;
use crate::smp::Smp;
use crate::table::CapabilityTable;
use core::sync::atomic::{AtomicBool, Ordering};
use kernel_registers::ReadSysReg;
use log::{debug, info};

/// Prefix of the boot-time detection message.
pub const DETECTED_FEATURE: &str = "detected feature:";

/// System-wide capability state.
///
/// Holds the capabilities decided from the boot CPU and the flag that freezes
/// that decision. The kernel keeps one instance for its lifetime; tests build
/// as many as they like.
///
/// Lifecycle:
/// 1. [`detect_system_capabilities`](Self::detect_system_capabilities) on the
///    boot CPU, before any other CPU runs,
/// 2. [`setup_system_capabilities`](Self::setup_system_capabilities) once
///    the boot-time CPUs are up,
/// 3. [`verify_local_cpu_capabilities`](Self::verify_local_cpu_capabilities)
///    on every CPU that starts afterwards.
#[derive(Default)]
pub struct CpuFeatures {
    caps: CapabilitySet,
    /// Set once the system capabilities were computed and enabled. From then
    /// on, new CPUs are checked against them.
    sys_caps_initialised: AtomicBool,
}

impl CpuFeatures {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            caps: CapabilitySet::new(),
            sys_caps_initialised: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub const fn capabilities(&self) -> &CapabilitySet {
        &self.caps
    }

    #[inline]
    #[must_use]
    pub fn cpus_have_cap(&self, id: CapabilityId) -> bool {
        self.caps.contains(id)
    }

    #[inline]
    #[must_use]
    pub fn sys_caps_initialised(&self) -> bool {
        self.sys_caps_initialised.load(Ordering::Acquire)
    }

    /// Freeze the system capabilities. From now on every starting CPU is
    /// verified against them.
    pub fn set_sys_caps_initialised(&self) {
        let was = self.sys_caps_initialised.swap(true, Ordering::AcqRel);
        debug_assert!(!was, "system capabilities initialised twice");
    }

    /// Add every capability of `table` the calling CPU has to the system set,
    /// logging `"{info} {desc}"` the first time each one is seen.
    ///
    /// Entries that do not match are skipped.
    pub fn check_cpu_capabilities<R>(&self, table: &CapabilityTable<'_>, regs: &R, info: &str)
    where
        R: ReadSysReg + ?Sized,
    {
        for cap in table {
            if !cap.matches(regs.read_sys_reg(cap.source)) {
                continue;
            }

            if self.caps.insert(cap.id) {
                info!("{info} {}", cap.desc);
            }
        }
    }

    /// Decide the system capabilities from the boot CPU's registers.
    ///
    /// Must run on the boot CPU before any other CPU is started.
    pub fn detect_system_capabilities<R>(&self, table: &CapabilityTable<'_>, regs: &R)
    where
        R: ReadSysReg + ?Sized,
    {
        debug_assert!(
            !self.sys_caps_initialised(),
            "capability detection after the system set was frozen"
        );
        self.check_cpu_capabilities(table, regs, DETECTED_FEATURE);
    }

    /// Run the enable action of every detected capability on every active
    /// CPU, in table order. Returns once all CPUs are done.
    pub fn enable_system_capabilities<S>(&self, table: &CapabilityTable<'_>, smp: &S)
    where
        S: Smp + ?Sized,
    {
        for cap in table {
            let Some(enable) = cap.enable else {
                continue;
            };

            if self.cpus_have_cap(cap.id) {
                debug!("enabling {} on all active CPUs", cap.desc);
                smp.on_each_active_cpu(&|| enable.enable(cap));
            }
        }
    }

    /// Enable the detected capabilities on the boot-time CPUs and freeze the
    /// system set.
    pub fn setup_system_capabilities<S>(&self, table: &CapabilityTable<'_>, smp: &S)
    where
        S: Smp + ?Sized,
    {
        self.enable_system_capabilities(table, smp);
        self.set_sys_caps_initialised();
    }
}
