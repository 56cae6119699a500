use crate::field::FeatureField;
use core::fmt;
use kernel_registers::SysReg;

/// Identifies a capability; doubles as its bit in the [`CapabilitySet`](crate::CapabilitySet).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CapabilityId(u16);

impl CapabilityId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a capability's presence is decided from its source register value.
#[derive(Clone, Copy)]
pub enum Matches {
    /// Extract [`Capability::field`] and compare it against
    /// [`Capability::min_field_value`].
    Field,
    /// Capability-specific predicate over the raw register value.
    Custom(fn(&Capability, u64) -> bool),
}

impl fmt::Debug for Matches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => f.write_str("Field"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Per-CPU activation of a capability.
///
/// Both entry points run on the CPU being configured. They return nothing: an
/// enable action either succeeds or halts the CPU itself.
pub trait EnableCapability: Sync {
    /// Configure the capability on the calling CPU.
    ///
    /// Called once per CPU: broadcast to every active CPU at boot, and locally
    /// on each CPU brought up afterwards.
    fn enable(&self, cap: &Capability);

    /// Finish configuration once every capability of a late CPU has had its
    /// [`enable`](Self::enable) run on it.
    ///
    /// For capabilities whose setup depends on other capabilities already
    /// being active on the same CPU.
    fn enable_interacting(&self) {}
}

/// One entry of a [`CapabilityTable`](crate::CapabilityTable).
#[derive(Clone, Copy)]
pub struct Capability {
    /// Human-readable name, used in diagnostics only.
    pub desc: &'static str,
    pub id: CapabilityId,
    /// Register the capability is detected from.
    pub source: SysReg,
    pub field: FeatureField,
    pub min_field_value: i64,
    pub matches: Matches,
    /// Register re-read on CPUs that come up after boot. `None` marks a
    /// boot-only capability that late CPUs are not checked against.
    pub sys_reg: Option<SysReg>,
    pub enable: Option<&'static dyn EnableCapability>,
}

impl Capability {
    /// A threshold capability: present iff `field` of `source` is at least
    /// `min_field_value`. Not re-verified and without enable action until
    /// configured otherwise.
    #[must_use]
    pub const fn new(
        desc: &'static str,
        id: CapabilityId,
        source: SysReg,
        field: FeatureField,
        min_field_value: i64,
    ) -> Self {
        Self {
            desc,
            id,
            source,
            field,
            min_field_value,
            matches: Matches::Field,
            sys_reg: None,
            enable: None,
        }
    }

    /// Re-verify this capability against `reg` on late CPUs.
    #[must_use]
    pub const fn verify_on(mut self, reg: SysReg) -> Self {
        self.sys_reg = Some(reg);
        self
    }

    #[must_use]
    pub const fn with_enable(mut self, enable: &'static dyn EnableCapability) -> Self {
        self.enable = Some(enable);
        self
    }

    #[must_use]
    pub const fn with_matcher(mut self, matcher: fn(&Self, u64) -> bool) -> Self {
        self.matches = Matches::Custom(matcher);
        self
    }

    /// Run this capability's match function against a raw register value.
    #[inline]
    #[must_use]
    pub fn matches(&self, reg: u64) -> bool {
        match self.matches {
            Matches::Field => feature_matches(reg, self),
            Matches::Custom(predicate) => predicate(self, reg),
        }
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("desc", &self.desc)
            .field("id", &self.id)
            .field("source", &self.source)
            .field("field", &self.field)
            .field("min_field_value", &self.min_field_value)
            .field("matches", &self.matches)
            .field("sys_reg", &self.sys_reg)
            .field("enable", &self.enable.is_some())
            .finish()
    }
}

/// Whether the field described by `cap` in `reg` is at least `cap.min_field_value`.
#[inline]
#[must_use]
pub const fn feature_matches(reg: u64, cap: &Capability) -> bool {
    cap.field.extract(reg) >= cap.min_field_value
}
