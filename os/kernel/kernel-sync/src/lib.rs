//! # Kernel synchronization primitives

#![cfg_attr(not(any(test, doctest)), no_std)]

mod atomic_bitmap;

pub use atomic_bitmap::{AtomicBitmap, Bits};
