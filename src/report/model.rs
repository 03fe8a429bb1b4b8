use serde::Serialize;

use super::frame::Frame;
use crate::curve::Curve;
use crate::egui_plot_stuff::multi_graph::Legend;
use crate::egui_plot_stuff::style::{CurveStyle, DrawMode};

/// A paginated comparison document: a title page followed by one page per
/// plotted category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub title_page: TitlePage,
    pub pages: Vec<Page>,
}

impl Report {
    /// Number of pages including the title page.
    pub fn page_count(&self) -> usize {
        self.pages.len() + 1
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TitlePage {
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub directory: String,
    pub category: String,
    pub header: String,
    pub main: Pane,
    pub ratio: Option<Pane>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Pane {
    pub frame: Frame,
    pub series: Vec<Series>,
    pub legend: Option<Legend>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub label: String,
    pub mode: DrawMode,
    pub style: CurveStyle,
    pub curve: Curve,
}
