pub mod builder;
pub mod frame;
pub mod model;

pub use builder::{ReportBuilder, RunContext, RunSummary, SourceLabel};
pub use frame::{Frame, FrameScale};
pub use model::{Page, Pane, Report, Series, TitlePage};
