use std::fmt::{self, Write};

use egui::Color32;
use egui_plot::{LineStyle, MarkerShape};

use crate::egui_plot_stuff::colors::{self, to_hex_rgb};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color32,
    pub width: f64,
    pub dash: LineStyle,
}

impl Stroke {
    pub fn solid(color: Color32, width: f64) -> Self {
        Stroke {
            color,
            width,
            dash: LineStyle::Solid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color32,
    pub anchor: Anchor,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(size: f64) -> Self {
        TextStyle {
            size,
            color: colors::FRAME,
            anchor: Anchor::Start,
            bold: false,
        }
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Debug, Clone)]
enum SvgElement {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: Option<Color32>,
        stroke: Option<Stroke>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        fill: Option<Color32>,
        stroke: Stroke,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Option<Color32>,
        stroke: Stroke,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        style: TextStyle,
        rotate: Option<f64>,
    },
    Group {
        clip_id: String,
        children: Vec<SvgElement>,
    },
}

/// Immediate-mode SVG canvas, coordinates in points with the origin top left.
///
/// Element ids are prefixed with `id_prefix`, so several canvases can be
/// inlined into one document.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    id_prefix: String,
    elements: Vec<SvgElement>,
    clips: Vec<(String, [f64; 4])>,
}

impl Canvas {
    pub fn new(width: f64, height: f64, id_prefix: &str) -> Self {
        Canvas {
            width,
            height,
            id_prefix: id_prefix.to_owned(),
            elements: Vec::new(),
            clips: Vec::new(),
        }
    }

    pub fn rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: Option<Color32>,
        stroke: Option<Stroke>,
    ) {
        self.elements.push(SvgElement::Rect {
            x,
            y,
            w,
            h,
            fill,
            stroke,
        });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke) {
        self.elements.push(SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        });
    }

    pub fn polyline(&mut self, points: Vec<(f64, f64)>, stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        self.elements.push(SvgElement::Polyline { points, stroke });
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: TextStyle) {
        self.elements.push(SvgElement::Text {
            x,
            y,
            content: content.to_owned(),
            style,
            rotate: None,
        });
    }

    pub fn text_rotated(&mut self, x: f64, y: f64, content: &str, style: TextStyle, angle: f64) {
        self.elements.push(SvgElement::Text {
            x,
            y,
            content: content.to_owned(),
            style,
            rotate: Some(angle),
        });
    }

    /// Draws a marker glyph of radius `r` centred on `(x, y)`.
    pub fn marker(&mut self, x: f64, y: f64, shape: MarkerShape, filled: bool, r: f64, color: Color32) {
        let stroke = Stroke::solid(color, 1.0);
        let fill = filled.then_some(color);
        let polygon = |points: Vec<(f64, f64)>| SvgElement::Polygon {
            points,
            fill,
            stroke,
        };

        let element = match shape {
            MarkerShape::Circle => SvgElement::Circle {
                cx: x,
                cy: y,
                r,
                fill,
                stroke,
            },
            MarkerShape::Square => SvgElement::Rect {
                x: x - r,
                y: y - r,
                w: 2.0 * r,
                h: 2.0 * r,
                fill,
                stroke: Some(stroke),
            },
            MarkerShape::Diamond => {
                polygon(vec![(x, y - r), (x + r, y), (x, y + r), (x - r, y)])
            }
            MarkerShape::Up => polygon(vec![(x, y - r), (x + r, y + r), (x - r, y + r)]),
            MarkerShape::Down => polygon(vec![(x, y + r), (x + r, y - r), (x - r, y - r)]),
            MarkerShape::Left => polygon(vec![(x - r, y), (x + r, y - r), (x + r, y + r)]),
            MarkerShape::Right => polygon(vec![(x + r, y), (x - r, y - r), (x - r, y + r)]),
            MarkerShape::Cross => {
                self.line(x - r, y - r, x + r, y + r, stroke);
                self.line(x - r, y + r, x + r, y - r, stroke);
                return;
            }
            MarkerShape::Plus => {
                self.line(x - r, y, x + r, y, stroke);
                self.line(x, y - r, x, y + r, stroke);
                return;
            }
            MarkerShape::Asterisk => {
                let s = r * 0.866;
                self.line(x, y - r, x, y + r, stroke);
                self.line(x - s, y - r / 2.0, x + s, y + r / 2.0, stroke);
                self.line(x - s, y + r / 2.0, x + s, y - r / 2.0, stroke);
                return;
            }
        };
        self.elements.push(element);
    }

    /// Draws a five-pointed star polygon of outer radius `r`.
    pub fn star(&mut self, x: f64, y: f64, filled: bool, r: f64, color: Color32) {
        let inner = r * 0.4;
        let points = (0..10)
            .map(|i| {
                let radius = if i % 2 == 0 { r } else { inner };
                let angle = (std::f64::consts::PI / 5.0) * f64::from(i) - std::f64::consts::FRAC_PI_2;
                (x + radius * angle.cos(), y + radius * angle.sin())
            })
            .collect();
        self.elements.push(SvgElement::Polygon {
            points,
            fill: filled.then_some(color),
            stroke: Stroke::solid(color, 1.0),
        });
    }

    /// Runs `draw` with everything it adds clipped to the given rectangle.
    pub fn clipped(&mut self, x: f64, y: f64, w: f64, h: f64, draw: impl FnOnce(&mut Canvas)) {
        let clip_id = format!("{}-clip{}", self.id_prefix, self.clips.len());
        self.clips.push((clip_id.clone(), [x, y, w, h]));

        let outer = std::mem::take(&mut self.elements);
        draw(self);
        let children = std::mem::replace(&mut self.elements, outer);
        self.elements.push(SvgElement::Group { clip_id, children });
    }

    pub fn finish_svg(&self) -> Result<String, fmt::Error> {
        let mut out = String::with_capacity(16 * 1024);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        )?;

        if !self.clips.is_empty() {
            out.push_str("<defs>\n");
            for (id, [x, y, w, h]) in &self.clips {
                writeln!(
                    out,
                    r#"<clipPath id="{id}"><rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" /></clipPath>"#
                )?;
            }
            out.push_str("</defs>\n");
        }

        writeln!(
            out,
            r#"<rect width="{}" height="{}" fill="{}" />"#,
            self.width,
            self.height,
            to_hex_rgb(colors::BACKGROUND)
        )?;

        for element in &self.elements {
            render_element(&mut out, element)?;
        }

        out.push_str("</svg>\n");
        Ok(out)
    }
}

fn render_element(out: &mut String, element: &SvgElement) -> fmt::Result {
    match element {
        SvgElement::Rect {
            x,
            y,
            w,
            h,
            fill,
            stroke,
        } => {
            write!(out, r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}""#)?;
            write_fill(out, *fill)?;
            if let Some(stroke) = stroke {
                write_stroke(out, stroke)?;
            }
            out.push_str(" />\n");
        }
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        } => {
            write!(out, r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}""#)?;
            write_stroke(out, stroke)?;
            out.push_str(" />\n");
        }
        SvgElement::Polyline { points, stroke } => {
            out.push_str(r#"<polyline points=""#);
            write_points(out, points)?;
            out.push_str(r#"" fill="none""#);
            write_stroke(out, stroke)?;
            out.push_str(" />\n");
        }
        SvgElement::Polygon {
            points,
            fill,
            stroke,
        } => {
            out.push_str(r#"<polygon points=""#);
            write_points(out, points)?;
            out.push('"');
            write_fill(out, *fill)?;
            write_stroke(out, stroke)?;
            out.push_str(" />\n");
        }
        SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
        } => {
            write!(out, r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}""#)?;
            write_fill(out, *fill)?;
            write_stroke(out, stroke)?;
            out.push_str(" />\n");
        }
        SvgElement::Text {
            x,
            y,
            content,
            style,
            rotate,
        } => {
            write!(
                out,
                r#"<text x="{x:.2}" y="{y:.2}" font-family="Helvetica, Arial, sans-serif" font-size="{:.1}" fill="{}" text-anchor="{}""#,
                style.size,
                to_hex_rgb(style.color),
                style.anchor.as_str()
            )?;
            if style.bold {
                out.push_str(r#" font-weight="bold""#);
            }
            if let Some(angle) = rotate {
                write!(out, r#" transform="rotate({angle:.1},{x:.2},{y:.2})""#)?;
            }
            out.push('>');
            out.push_str(&escape_xml(content));
            out.push_str("</text>\n");
        }
        SvgElement::Group { clip_id, children } => {
            writeln!(out, r#"<g clip-path="url(#{clip_id})">"#)?;
            for child in children {
                render_element(out, child)?;
            }
            out.push_str("</g>\n");
        }
    }
    Ok(())
}

fn write_points(out: &mut String, points: &[(f64, f64)]) -> fmt::Result {
    for (i, (x, y)) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write!(out, "{x:.2},{y:.2}")?;
    }
    Ok(())
}

fn write_fill(out: &mut String, fill: Option<Color32>) -> fmt::Result {
    match fill {
        Some(color) => write!(out, r#" fill="{}""#, to_hex_rgb(color)),
        None => write!(out, r#" fill="none""#),
    }
}

fn write_stroke(out: &mut String, stroke: &Stroke) -> fmt::Result {
    write!(
        out,
        r#" stroke="{}" stroke-width="{:.2}""#,
        to_hex_rgb(stroke.color),
        stroke.width
    )?;
    match stroke.dash {
        LineStyle::Solid => Ok(()),
        LineStyle::Dashed { length } => {
            write!(out, r#" stroke-dasharray="{length:.1},{length:.1}""#)
        }
        LineStyle::Dotted { spacing } => {
            write!(out, r#" stroke-dasharray="{:.1},{spacing:.1}""#, stroke.width)
        }
    }
}

pub fn escape_xml(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for ch in content.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_document() {
        let mut canvas = Canvas::new(100.0, 50.0, "t");
        canvas.line(0.0, 0.0, 10.0, 10.0, Stroke::solid(Color32::RED, 1.0));
        canvas.text(5.0, 5.0, "a < b & c", TextStyle::new(10.0));
        let svg = canvas.finish_svg().unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r##"stroke="#ff0000""##));
        assert!(svg.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn test_marker_shapes() {
        let mut canvas = Canvas::new(10.0, 10.0, "t");
        canvas.marker(5.0, 5.0, MarkerShape::Circle, false, 2.0, Color32::RED);
        canvas.marker(5.0, 5.0, MarkerShape::Diamond, true, 2.0, Color32::BLUE);
        canvas.marker(5.0, 5.0, MarkerShape::Asterisk, false, 2.0, Color32::BLACK);
        let svg = canvas.finish_svg().unwrap();

        assert!(svg.contains("<circle"));
        assert!(svg.contains(r#"<polygon"#));
        assert!(svg.contains(r##"fill="#0000ff""##));
        assert_eq!(svg.matches("<line").count(), 3);
    }

    #[test]
    fn test_star_polygon() {
        let mut canvas = Canvas::new(10.0, 10.0, "t");
        canvas.star(5.0, 5.0, true, 3.0, Color32::RED);
        canvas.star(5.0, 5.0, false, 3.0, Color32::RED);
        let svg = canvas.finish_svg().unwrap();

        assert_eq!(svg.matches("<polygon").count(), 2);
        assert_eq!(svg.matches(r##"fill="#ff0000""##).count(), 1);
        let first = svg.lines().find(|l| l.starts_with("<polygon")).unwrap();
        let points = first.split('"').nth(1).unwrap();
        assert_eq!(points.split(' ').count(), 10);
    }

    #[test]
    fn test_clipped_group() {
        let mut canvas = Canvas::new(10.0, 10.0, "t");
        canvas.clipped(1.0, 1.0, 8.0, 8.0, |c| {
            c.polyline(vec![(0.0, 0.0), (10.0, 10.0)], Stroke::solid(Color32::BLACK, 2.0));
        });
        canvas.polyline(vec![(0.0, 0.0)], Stroke::solid(Color32::BLACK, 2.0));
        let svg = canvas.finish_svg().unwrap();

        assert!(svg.contains(r#"<clipPath id="t-clip0">"#));
        assert!(svg.contains(r##"<g clip-path="url(#t-clip0)">"##));
        assert_eq!(svg.matches("<polyline").count(), 1);
    }
}
