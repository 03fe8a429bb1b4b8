pub mod curve_store;
pub mod source;

pub use curve_store::{CurveStore, NamedCurveSet};
pub use source::{CurveSource, SourceError, SourceFormat};
