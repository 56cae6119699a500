use core::fmt;

/// Logical CPU number (0..n-1).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CpuId(u32);

impl CpuId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CpuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The SMP and hotplug services capability handling depends on.
///
/// Implemented by the kernel's CPU management code; methods are called from
/// the CPU named in their description.
pub trait Smp {
    /// The CPU executing the call.
    fn current_cpu(&self) -> CpuId;

    /// Number of CPU slots; valid ids are `0..possible_cpus()`.
    fn possible_cpus(&self) -> u32;

    /// Whether `cpu` is online and schedulable.
    fn is_cpu_active(&self, cpu: CpuId) -> bool;

    /// Whether `cpu` is still part of the system. Cleared for good when a
    /// CPU is parked.
    fn is_cpu_present(&self, cpu: CpuId) -> bool;

    /// Run `f` on `cpu` and wait for it to return.
    ///
    /// The target may be interrupted from its normal work for the duration.
    fn run_on_cpu(&self, cpu: CpuId, f: &(dyn Fn() + Sync));

    /// Add or remove `cpu` from the set of present CPUs. Absent CPUs are never
    /// scheduled and never targeted by cross-CPU calls again.
    fn set_cpu_present(&self, cpu: CpuId, present: bool);

    /// Ask the platform to power `cpu` down. Called from `cpu` itself.
    ///
    /// Returns `false` when the platform has no such operation. An
    /// implementation that succeeds may never return.
    fn cpu_die(&self, _cpu: CpuId) -> bool {
        false
    }

    /// Run `f` on every present and active CPU and return once all of them
    /// have finished.
    ///
    /// The provided version calls [`Smp::run_on_cpu`] for one CPU after the
    /// other. Kernels with a broadcast cross-call should override it to run
    /// `f` on all targets in parallel.
    fn on_each_active_cpu(&self, f: &(dyn Fn() + Sync)) {
        for cpu in (0..self.possible_cpus()).map(CpuId::new) {
            if self.is_cpu_present(cpu) && self.is_cpu_active(cpu) {
                self.run_on_cpu(cpu, f);
            }
        }
    }
}
