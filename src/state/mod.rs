pub mod artifacts;
pub mod registry;

pub use artifacts::Artifact;
pub use registry::{ChangeAction, ChangelogEntry, RegistryStore, UserRegistry};
