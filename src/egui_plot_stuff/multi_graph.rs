use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use super::colors;
use super::style::{CurveStyle, style_for_index};
use crate::curve::Curve;

/// The glyph a legend row shows next to its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
pub enum LegendGlyph {
    Line,
    Marker,
    LineMarker,
}

impl FromStr for LegendGlyph {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "L" | "l" | "line" => Ok(LegendGlyph::Line),
            "P" | "p" | "marker" => Ok(LegendGlyph::Marker),
            "LP" | "PL" | "lp" | "pl" | "line+marker" => Ok(LegendGlyph::LineMarker),
            other => Err(format!("Unknown legend option '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StyledCurveEntry {
    pub label: String,
    pub curve: Arc<Curve>,
    pub style: CurveStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub style: CurveStyle,
    pub glyph: LegendGlyph,
    #[serde(skip)]
    pub curve: Option<Arc<Curve>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Collects labelled curves that share a frame and gives each a style derived
/// only from its insertion index.
#[derive(Debug, Clone, Default)]
pub struct MultiGraph {
    entries: Vec<StyledCurveEntry>,
}

impl MultiGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a curve and returns its index.
    pub fn add(&mut self, label: &str, curve: Arc<Curve>) -> usize {
        let index = self.entries.len();
        let style = style_for_index(index);

        log::debug!(
            "Formatting graph {index} ('{label}') - color = {}, marker = {:?}",
            colors::color_name(style.color).unwrap_or("custom"),
            style.marker
        );

        self.entries.push(StyledCurveEntry {
            label: label.to_owned(),
            curve,
            style,
        });
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&StyledCurveEntry> {
        self.entries.get(index)
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Curve>> {
        self.entry(index).map(|e| &e.curve)
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.entry(index).map(|e| e.label.as_str())
    }

    pub fn style(&self, index: usize) -> Option<&CurveStyle> {
        self.entry(index).map(|e| &e.style)
    }

    pub fn entries(&self) -> &[StyledCurveEntry] {
        &self.entries
    }

    /// Builds a legend with one row per entry; `glyph_for` picks the glyph of
    /// each row from its index.
    pub fn legend(&self, glyph_for: impl Fn(usize) -> LegendGlyph) -> Legend {
        Legend {
            entries: self
                .entries
                .iter()
                .enumerate()
                .map(|(i, e)| LegendEntry {
                    label: e.label.clone(),
                    style: e.style,
                    glyph: glyph_for(i),
                    curve: Some(Arc::clone(&e.curve)),
                })
                .collect(),
        }
    }
}
