//! Entries file for iniset.
//!
//! An entries file lists the keys to set and how to write them. It is YAML
//! (`.yaml`, `.yml`, or any other extension) or JSON (`.json`). Unknown
//! fields are ignored for forward compatibility; missing fields take their
//! defaults.
//!
//! ```yaml
//! atomic: true
//! entries:
//!   - section: Section
//!     key: key1
//!     value: some1
//!   - key: top_level
//!     value: "1"
//! ```

mod model;
mod operations;


pub use model::MergeConfig;
