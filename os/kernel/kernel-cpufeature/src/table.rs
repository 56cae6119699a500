use crate::capability::{Capability, CapabilityId};
use crate::caps::MAX_CAPABILITIES;

/// A table entry that cannot be used.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("{desc}: capability id {id} exceeds the capability set")]
    IdOutOfRange { desc: &'static str, id: CapabilityId },
    #[error("{second}: capability id {id} already used by {first}")]
    DuplicateId {
        id: CapabilityId,
        first: &'static str,
        second: &'static str,
    },
    #[error("{desc}: feature field does not fit a 64-bit register")]
    InvalidField { desc: &'static str },
}

/// An ordered, immutable list of capabilities sharing a diagnostic name.
///
/// Order matters twice: the first capability a late CPU lacks is the one it
/// is parked for, and enable actions run in table order.
#[derive(Debug, Clone, Copy)]
pub struct CapabilityTable<'a> {
    name: &'static str,
    caps: &'a [Capability],
}

impl<'a> CapabilityTable<'a> {
    /// Validate `caps` and wrap them as a table named `name`.
    ///
    /// # Errors
    /// Returns the first entry whose id is out of range or reused, or whose
    /// feature field does not fit a 64-bit register.
    pub fn new(name: &'static str, caps: &'a [Capability]) -> Result<Self, TableError> {
        for (i, cap) in caps.iter().enumerate() {
            if cap.id.index() >= MAX_CAPABILITIES {
                return Err(TableError::IdOutOfRange {
                    desc: cap.desc,
                    id: cap.id,
                });
            }

            if !cap.field.is_valid() {
                return Err(TableError::InvalidField { desc: cap.desc });
            }

            if let Some(first) = caps[..i].iter().find(|c| c.id == cap.id) {
                return Err(TableError::DuplicateId {
                    id: cap.id,
                    first: first.desc,
                    second: cap.desc,
                });
            }
        }

        Ok(Self { name, caps })
    }

    /// Name used as the capability category in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.caps.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'a, Capability> {
        self.caps.iter()
    }
}

impl<'a> IntoIterator for CapabilityTable<'a> {
    type Item = &'a Capability;
    type IntoIter = core::slice::Iter<'a, Capability>;

    fn into_iter(self) -> Self::IntoIter {
        self.caps.iter()
    }
}

impl<'a> IntoIterator for &CapabilityTable<'a> {
    type Item = &'a Capability;
    type IntoIter = core::slice::Iter<'a, Capability>;

    fn into_iter(self) -> Self::IntoIter {
        self.caps.iter()
    }
}
