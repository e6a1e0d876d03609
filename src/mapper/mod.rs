//! Manifest-to-descriptor mapping.
//!
//! - Platform selection: which configured platform a package builds for
//! - Target/source mapping: manifest targets into normalized descriptors

pub mod platform;
pub mod target;

pub use platform::select_platform;
pub use target::map_package;
