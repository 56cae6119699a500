//! # CPU capability detection and hotplug verification
//!
//! Decides once, from the boot CPU, which hardware capabilities the system
//! uses, enables them on every CPU, and keeps CPUs that come up later from
//! joining unless they provide the same capabilities.
//!
//! ## Protocol
//!
//! ```text
//! boot CPU                              late CPU (hotplug)
//! ────────                              ──────────────────
//! detect_system_capabilities
//!     │  (set grows)
//! setup_system_capabilities
//!     │  enable on all active CPUs
//!     │  freeze ─────────────────────▶  verify_local_cpu_capabilities
//!                                           │ re-read + match, enable
//!                                           │ second pass: enable_interacting
//!                                           ├─▶ Joined
//!                                           └─▶ Parked (absent, cpu_die, idle)
//! ```
//!
//! Capabilities are described by a [`CapabilityTable`] of [`Capability`]
//! entries, each naming an ID register field and a minimum value. The state
//! that changes at runtime lives in [`CpuFeatures`]: a grow-only
//! [`CapabilitySet`] and a one-way "initialised" flag.
//!
//! Hardware access goes through [`ReadSysReg`] and the SMP framework through
//! [`Smp`], so the whole protocol runs in host tests.
//!
//! ## Features
//! * `asm`: live register access and `wfe`/`wfi` parking on aarch64.
//! * `pan`: include Privileged Access Never in [`arm64_features`]; implies `asm`.
//!
//! Both are on by default.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod arm64;
mod capability;
mod caps;
mod cpu_features;
mod field;
pub mod park;
mod smp;
mod table;
mod verify;

pub use arm64::arm64_features;
pub use capability::{Capability, CapabilityId, EnableCapability, Matches, feature_matches};
pub use caps::{CapabilitySet, CapabilitySnapshot, MAX_CAPABILITIES};
pub use cpu_features::{CpuFeatures, DETECTED_FEATURE};
pub use field::{FeatureField, Sign};
pub use kernel_registers::{ReadSysReg, SysReg};
pub use park::IncapableCpu;
pub use smp::{CpuId, Smp};
pub use table::{CapabilityTable, TableError};
pub use verify::Verdict;
