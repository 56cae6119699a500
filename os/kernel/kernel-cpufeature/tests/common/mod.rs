#![allow(dead_code)]

use kernel_cpufeature::{
    Capability, CapabilityId, CpuId, EnableCapability, FeatureField, ReadSysReg, Smp, SysReg,
};
use kernel_sync::AtomicBitmap;
use std::sync::Mutex;

/// Canned identification register values of one CPU.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeRegs {
    values: [u64; SysReg::COUNT],
}

impl FakeRegs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the 4-bit field at `shift` of `reg`.
    pub fn with_field(mut self, reg: SysReg, shift: u8, value: u64) -> Self {
        let v = &mut self.values[reg.index()];
        *v = (*v & !(0xF << shift)) | ((value & 0xF) << shift);
        self
    }
}

impl ReadSysReg for FakeRegs {
    fn read_sys_reg(&self, reg: SysReg) -> u64 {
        self.values[reg.index()]
    }
}

/// CPUs of a simulated machine.
pub struct Topology {
    possible: u32,
    present: AtomicBitmap<1>,
    active: AtomicBitmap<1>,
    cpu_die_supported: bool,
    pub ran_on: Mutex<Vec<CpuId>>,
    pub died: Mutex<Vec<CpuId>>,
}

impl Topology {
    /// `active` CPUs online out of `possible`.
    pub fn new(possible: u32, active: u32) -> Self {
        let t = Self {
            possible,
            present: AtomicBitmap::new(),
            active: AtomicBitmap::new(),
            cpu_die_supported: false,
            ran_on: Mutex::new(Vec::new()),
            died: Mutex::new(Vec::new()),
        };
        for cpu in 0..possible as usize {
            t.present.insert(cpu);
        }
        for cpu in 0..active as usize {
            t.active.insert(cpu);
        }
        t
    }

    pub fn with_cpu_die(mut self) -> Self {
        self.cpu_die_supported = true;
        self
    }

    pub fn on(&self, cpu: u32) -> OnCpu<'_> {
        OnCpu {
            topology: self,
            cpu: CpuId::new(cpu),
        }
    }

    pub fn is_present(&self, cpu: u32) -> bool {
        self.present.contains(cpu as usize)
    }

    /// The present and active masks are independent: parking a CPU leaves it
    /// in the active mask.
    pub fn is_active(&self, cpu: u32) -> bool {
        self.active.contains(cpu as usize)
    }

    pub fn bring_online(&self, cpu: u32) {
        self.active.insert(cpu as usize);
    }
}

/// The SMP view from one CPU of a [`Topology`].
pub struct OnCpu<'a> {
    topology: &'a Topology,
    cpu: CpuId,
}

impl Smp for OnCpu<'_> {
    fn current_cpu(&self) -> CpuId {
        self.cpu
    }

    fn possible_cpus(&self) -> u32 {
        self.topology.possible
    }

    fn is_cpu_active(&self, cpu: CpuId) -> bool {
        self.topology.active.contains(cpu.raw() as usize)
    }

    fn is_cpu_present(&self, cpu: CpuId) -> bool {
        self.topology.present.contains(cpu.raw() as usize)
    }

    fn run_on_cpu(&self, cpu: CpuId, f: &(dyn Fn() + Sync)) {
        self.topology.ran_on.lock().unwrap().push(cpu);
        f();
    }

    fn set_cpu_present(&self, cpu: CpuId, present: bool) {
        let bit = cpu.raw() as usize;
        if present {
            self.topology.present.insert(bit);
        } else {
            self.topology.present.remove(bit);
        }
    }

    fn cpu_die(&self, cpu: CpuId) -> bool {
        if self.topology.cpu_die_supported {
            self.topology.died.lock().unwrap().push(cpu);
        }
        self.topology.cpu_die_supported
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Enable(u16),
    Interacting(u16),
}

/// Shared log of enable calls.
#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<Call>>,
}

impl Recorder {
    pub fn leak() -> &'static Self {
        Box::leak(Box::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls().iter().filter(|&&c| c == call).count()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

/// Enable action of one capability, logging both call shapes to a [`Recorder`].
pub struct Recording {
    id: u16,
    recorder: &'static Recorder,
}

impl Recording {
    pub fn leak(recorder: &'static Recorder, id: u16) -> &'static Self {
        Box::leak(Box::new(Self { id, recorder }))
    }
}

impl EnableCapability for Recording {
    fn enable(&self, cap: &Capability) {
        assert_eq!(cap.id.raw(), self.id, "enable called with a foreign descriptor");
        self.recorder.calls.lock().unwrap().push(Call::Enable(self.id));
    }

    fn enable_interacting(&self) {
        self.recorder.calls.lock().unwrap().push(Call::Interacting(self.id));
    }
}

/// A 4-bit signed threshold capability on `ID_AA64ISAR0_EL1`, verified on
/// late CPUs.
pub fn isar0_cap(desc: &'static str, id: u16, shift: u8, min: i64) -> Capability {
    Capability::new(
        desc,
        CapabilityId::new(id),
        SysReg::IdAa64Isar0El1,
        FeatureField::id_reg(shift),
        min,
    )
    .verify_on(SysReg::IdAa64Isar0El1)
}
