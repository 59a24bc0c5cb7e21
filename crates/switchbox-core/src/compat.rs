//! Compatibility layer for no_std + alloc.

pub use alloc::vec::Vec;
