pub mod categories;
pub mod probe;

pub use categories::{CategorySpec, categories};
pub use probe::{DirectoryTag, Probe, Target};
