pub mod graph;
pub mod ratio;
pub mod trimmer;

pub use graph::Curve;
pub use trimmer::{CurveTrimmer, TrimError};
