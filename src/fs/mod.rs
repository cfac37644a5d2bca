//! Filesystem utilities for iniset.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::write_in_place;
