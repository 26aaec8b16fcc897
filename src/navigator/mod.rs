mod bootstrap;
mod vfs;

pub use bootstrap::{DEFAULT_LABEL, default_tree};
pub use vfs::{NavigationError, Vfs};
