use egui::Color32;
use egui_plot::{LineStyle, MarkerShape};

use super::colors;

/// Marker glyphs used when many curves share one frame, in assignment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub enum Marker {
    Star,
    OpenCircle,
    Cross,
    Dot,
    FullSquare,
    FullTriangleUp,
    FullTriangleDown,
    OpenCircleLarge,
    OpenSquare,
    OpenTriangleUp,
    OpenDiamond,
    OpenCross,
    FullStar,
    OpenStar,
}

impl Marker {
    pub const SEQUENCE: [Marker; 14] = [
        Marker::Star,
        Marker::OpenCircle,
        Marker::Cross,
        Marker::Dot,
        Marker::FullSquare,
        Marker::FullTriangleUp,
        Marker::FullTriangleDown,
        Marker::OpenCircleLarge,
        Marker::OpenSquare,
        Marker::OpenTriangleUp,
        Marker::OpenDiamond,
        Marker::OpenCross,
        Marker::FullStar,
        Marker::OpenStar,
    ];

    pub fn shape(self) -> MarkerShape {
        match self {
            Marker::Star | Marker::FullStar | Marker::OpenStar => MarkerShape::Asterisk,
            Marker::OpenCircle | Marker::Dot | Marker::OpenCircleLarge => MarkerShape::Circle,
            Marker::Cross => MarkerShape::Cross,
            Marker::FullSquare | Marker::OpenSquare => MarkerShape::Square,
            Marker::FullTriangleUp | Marker::OpenTriangleUp => MarkerShape::Up,
            Marker::FullTriangleDown => MarkerShape::Down,
            Marker::OpenDiamond => MarkerShape::Diamond,
            Marker::OpenCross => MarkerShape::Plus,
        }
    }

    pub fn filled(self) -> bool {
        matches!(
            self,
            Marker::Dot
                | Marker::FullSquare
                | Marker::FullTriangleUp
                | Marker::FullTriangleDown
                | Marker::FullStar
        )
    }

    /// Stars with an outline or fill; `Star` itself is the line asterisk.
    pub fn is_star_polygon(self) -> bool {
        matches!(self, Marker::FullStar | Marker::OpenStar)
    }

    /// Radius multiplier relative to the nominal marker size.
    pub fn scale(self) -> f32 {
        match self {
            Marker::Dot => 0.6,
            Marker::OpenCircleLarge => 1.3,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
pub enum LineDash {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineDash {
    pub fn line_style(self) -> LineStyle {
        match self {
            LineDash::Solid => LineStyle::Solid,
            LineDash::Dashed => LineStyle::Dashed { length: 6.0 },
            LineDash::Dotted => LineStyle::Dotted { spacing: 3.0 },
        }
    }
}

/// How a curve is drawn in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum DrawMode {
    Line,
    Markers,
}

/// Visual attributes attached to a curve. Kept beside the curve, never written into it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CurveStyle {
    pub color: Color32,
    pub marker: Marker,
    pub marker_size: f32,
    pub line_width: f32,
    pub line_dash: LineDash,
}

impl Default for CurveStyle {
    fn default() -> Self {
        CurveStyle {
            color: colors::palette_color(0),
            marker: Marker::Star,
            marker_size: 1.0,
            line_width: 2.0,
            line_dash: LineDash::Solid,
        }
    }
}

/// Number of distinct (color, marker) combinations before styles repeat.
pub const DISTINCT_STYLES: usize = colors::PALETTE.len() * Marker::SEQUENCE.len();

/// The style of the `index`-th curve added to an overlay. Index `i` takes
/// colour `i % 10` and marker `i / 10`; past the last combination the
/// assignment wraps around.
pub fn style_for_index(index: usize) -> CurveStyle {
    let index = index % DISTINCT_STYLES;
    let n_colors = colors::PALETTE.len();

    CurveStyle {
        color: colors::palette_color(index % n_colors),
        marker: Marker::SEQUENCE[index / n_colors],
        ..CurveStyle::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_assignment() {
        let s0 = style_for_index(0);
        let s9 = style_for_index(9);
        let s10 = style_for_index(10);

        assert_eq!(s0.color, colors::PALETTE[0].0);
        assert_eq!(s0.marker, Marker::SEQUENCE[0]);
        assert_eq!(s9.color, colors::PALETTE[9].0);
        assert_eq!(s9.marker, Marker::SEQUENCE[0]);
        assert_eq!(s10.color, colors::PALETTE[0].0);
        assert_eq!(s10.marker, Marker::SEQUENCE[1]);
    }

    #[test]
    fn test_fixed_attributes() {
        let s = style_for_index(57);
        assert_eq!(s.marker_size, 1.0);
        assert_eq!(s.line_width, 2.0);
        assert_eq!(s.line_dash, LineDash::Solid);
        assert_eq!(s.line_dash.line_style(), LineStyle::Solid);
    }

    #[test]
    fn test_wraparound() {
        assert_eq!(DISTINCT_STYLES, 140);
        assert_eq!(style_for_index(139).marker, Marker::OpenStar);
        assert_eq!(style_for_index(140), style_for_index(0));
    }

    #[test]
    fn test_marker_glyphs() {
        assert_eq!(Marker::OpenDiamond.shape(), MarkerShape::Diamond);
        assert!(Marker::FullSquare.filled());
        assert!(!Marker::OpenSquare.filled());
        assert!(Marker::FullStar.is_star_polygon() && Marker::FullStar.filled());
        assert!(Marker::OpenStar.is_star_polygon() && !Marker::OpenStar.filled());
        assert!(!Marker::Star.is_star_polygon());
    }
}
