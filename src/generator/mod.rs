//! Per-manager graph generation from workspace resolution state.

pub mod generate;
pub mod state;

pub use generate::GraphGenerator;
pub use state::{read_workspace_state, PackageReference, ReferenceKind};
