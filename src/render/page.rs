use super::axes::Axis;
use super::canvas::{Anchor, Canvas, Stroke, TextStyle};
use crate::config::PageSize;
use crate::egui_plot_stuff::colors;
use crate::egui_plot_stuff::multi_graph::{Legend, LegendGlyph};
use crate::egui_plot_stuff::style::{CurveStyle, DrawMode};
use crate::report::{Page, Pane, Series, TitlePage};

const MARGIN: f64 = 10.0;
const HEADER_HEIGHT: f64 = 30.0;
// share of the plotting height given to the main pane when a ratio pane follows
const MAIN_SHARE: f64 = 0.68;

const AXIS_LEFT: f64 = 62.0;
const AXIS_RIGHT: f64 = 14.0;
const AXIS_TOP: f64 = 8.0;
const AXIS_BOTTOM: f64 = 38.0;

const MARKER_RADIUS: f64 = 3.0;
const LEGEND_ROW: f64 = 14.0;
const LEGEND_WIDTH: f64 = 120.0;

pub fn draw_title_page(title: &TitlePage, size: &PageSize, id_prefix: &str) -> Canvas {
    let mut canvas = Canvas::new(size.width, size.height, id_prefix);
    let x = size.width / 2.0;
    let mut y = size.height / 3.0;

    for (i, line) in title.lines.iter().enumerate() {
        let style = if i == 0 {
            TextStyle::new(20.0).anchored(Anchor::Middle).bold()
        } else {
            TextStyle::new(12.0).anchored(Anchor::Middle)
        };
        canvas.text(x, y, line, style);
        y += if i == 0 { 36.0 } else { 20.0 };
    }
    canvas
}

pub fn draw_page(page: &Page, size: &PageSize, id_prefix: &str) -> Canvas {
    let mut canvas = Canvas::new(size.width, size.height, id_prefix);

    // header box
    let header_w = size.width - 2.0 * MARGIN;
    canvas.rect(
        MARGIN,
        MARGIN,
        header_w,
        HEADER_HEIGHT,
        Some(colors::BACKGROUND),
        Some(Stroke::solid(colors::FRAME, 1.0)),
    );
    canvas.text(
        size.width / 2.0,
        MARGIN + HEADER_HEIGHT * 0.65,
        &page.header,
        TextStyle::new(13.0).anchored(Anchor::Middle),
    );

    let top = 2.0 * MARGIN + HEADER_HEIGHT;
    let available = size.height - top - MARGIN;
    let width = size.width - 2.0 * MARGIN;

    match &page.ratio {
        Some(ratio) => {
            let main_h = available * MAIN_SHARE;
            draw_pane(&mut canvas, &page.main, MARGIN, top, width, main_h);
            draw_pane(&mut canvas, ratio, MARGIN, top + main_h, width, available - main_h);
        }
        None => draw_pane(&mut canvas, &page.main, MARGIN, top, width, available),
    }
    canvas
}

struct PlotArea {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

fn draw_pane(canvas: &mut Canvas, pane: &Pane, x0: f64, y0: f64, w: f64, h: f64) {
    let frame = &pane.frame;
    let x_axis = Axis::new(frame.x_min, frame.x_max, frame.log_x, &frame.x_title);
    let y_axis = Axis::new(frame.y_min, frame.y_max, frame.log_y, &frame.y_title);
    let area = PlotArea {
        left: x0 + AXIS_LEFT,
        right: x0 + w - AXIS_RIGHT,
        top: y0 + AXIS_TOP,
        bottom: y0 + h - AXIS_BOTTOM,
    };

    draw_axes(canvas, &x_axis, &y_axis, &area);

    canvas.clipped(
        area.left,
        area.top,
        area.right - area.left,
        area.bottom - area.top,
        |c| {
            for series in &pane.series {
                draw_series(c, series, &x_axis, &y_axis, &area);
            }
        },
    );

    if let Some(legend) = pane.legend.as_ref().filter(|l| !l.is_empty()) {
        draw_legend(canvas, legend, &area);
    }
}

fn draw_axes(canvas: &mut Canvas, x_axis: &Axis, y_axis: &Axis, area: &PlotArea) {
    let grid = Stroke::solid(colors::GRID, 0.5);
    let tick = Stroke::solid(colors::FRAME, 0.8);
    let label_style = TextStyle::new(9.0);

    for t in &x_axis.ticks {
        let px = x_axis.data_to_pixel(t.value, area.left, area.right);
        let len = if t.label.is_some() { 6.0 } else { 3.0 };
        if let Some(label) = &t.label {
            canvas.line(px, area.top, px, area.bottom, grid);
            canvas.text(
                px,
                area.bottom + 14.0,
                label,
                label_style.anchored(Anchor::Middle),
            );
        }
        canvas.line(px, area.bottom, px, area.bottom - len, tick);
    }

    for t in &y_axis.ticks {
        let py = y_axis.data_to_pixel(t.value, area.bottom, area.top);
        let len = if t.label.is_some() { 6.0 } else { 3.0 };
        if let Some(label) = &t.label {
            canvas.line(area.left, py, area.right, py, grid);
            canvas.text(
                area.left - 4.0,
                py + 3.0,
                label,
                label_style.anchored(Anchor::End),
            );
        }
        canvas.line(area.left, py, area.left + len, py, tick);
    }

    canvas.rect(
        area.left,
        area.top,
        area.right - area.left,
        area.bottom - area.top,
        None,
        Some(Stroke::solid(colors::FRAME, 1.0)),
    );

    let title_style = TextStyle::new(11.0).anchored(Anchor::End);
    canvas.text(area.right, area.bottom + 30.0, &x_axis.title, title_style);
    canvas.text_rotated(
        area.left - 46.0,
        area.top,
        &y_axis.title,
        title_style,
        -90.0,
    );
}

fn draw_series(canvas: &mut Canvas, series: &Series, x_axis: &Axis, y_axis: &Axis, area: &PlotArea) {
    let points: Vec<(f64, f64)> = series
        .curve
        .points()
        .iter()
        .filter(|[x, y]| (!x_axis.log || *x > 0.0) && (!y_axis.log || *y > 0.0))
        .map(|[x, y]| {
            (
                x_axis.data_to_pixel(*x, area.left, area.right),
                y_axis.data_to_pixel(*y, area.bottom, area.top),
            )
        })
        .collect();

    let style = &series.style;
    match series.mode {
        DrawMode::Line => canvas.polyline(points, line_stroke(style)),
        DrawMode::Markers => {
            for (x, y) in points {
                draw_marker(canvas, x, y, style);
            }
        }
    }
}

fn draw_legend(canvas: &mut Canvas, legend: &Legend, area: &PlotArea) {
    let height = LEGEND_ROW * legend.len() as f64 + 6.0;
    let x = area.right - LEGEND_WIDTH - 6.0;
    let y = area.top + 6.0;
    canvas.rect(
        x,
        y,
        LEGEND_WIDTH,
        height,
        Some(colors::BACKGROUND),
        Some(Stroke::solid(colors::FRAME, 0.8)),
    );

    for (i, entry) in legend.entries.iter().enumerate() {
        let row = y + 3.0 + LEGEND_ROW * (i as f64 + 0.5);
        let (g0, g1) = (x + 6.0, x + 26.0);
        if matches!(entry.glyph, LegendGlyph::Line | LegendGlyph::LineMarker) {
            canvas.line(g0, row, g1, row, line_stroke(&entry.style));
        }
        if matches!(entry.glyph, LegendGlyph::Marker | LegendGlyph::LineMarker) {
            draw_marker(canvas, (g0 + g1) / 2.0, row, &entry.style);
        }
        canvas.text(g1 + 6.0, row + 3.5, &entry.label, TextStyle::new(10.0));
    }
}

fn line_stroke(style: &CurveStyle) -> Stroke {
    Stroke {
        color: style.color,
        width: f64::from(style.line_width),
        dash: style.line_dash.line_style(),
    }
}

fn draw_marker(canvas: &mut Canvas, x: f64, y: f64, style: &CurveStyle) {
    let r = MARKER_RADIUS * f64::from(style.marker_size * style.marker.scale());
    if style.marker.is_star_polygon() {
        canvas.star(x, y, style.marker.filled(), r, style.color);
        return;
    }
    canvas.marker(
        x,
        y,
        style.marker.shape(),
        style.marker.filled(),
        r,
        style.color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use crate::egui_plot_stuff::style::{Marker, style_for_index};
    use crate::report::Frame;

    fn pane(points: Vec<[f64; 2]>, mode: DrawMode) -> Pane {
        Pane {
            frame: Frame {
                x_min: 0.1,
                x_max: 100.0,
                y_min: 0.01,
                y_max: 10.0,
                log_x: true,
                log_y: true,
                x_title: "E".to_owned(),
                y_title: "sigma".to_owned(),
            },
            series: vec![Series {
                label: "v2".to_owned(),
                mode,
                style: style_for_index(1),
                curve: Curve::new(points),
            }],
            legend: None,
        }
    }

    #[test]
    fn test_title_page_lines() {
        let title = TitlePage {
            lines: vec!["Title".to_owned(), "Plotting data from:".to_owned()],
        };
        let svg = draw_title_page(&title, &PageSize { width: 500.0, height: 650.0 }, "p0")
            .finish_svg()
            .unwrap();
        assert!(svg.contains(">Title</text>"));
        assert!(svg.contains(">Plotting data from:</text>"));
    }

    #[test]
    fn test_page_with_ratio_pane() {
        let page = Page {
            directory: "nu_mu_C12".to_owned(),
            category: "tot_cc".to_owned(),
            header: "ν_μ + (C12), TOT CC".to_owned(),
            main: pane(vec![[1.0, 1.0], [10.0, 2.0], [20.0, 0.0]], DrawMode::Markers),
            ratio: Some(pane(vec![[1.0, 1.0], [10.0, 1.0]], DrawMode::Line)),
        };
        let svg = draw_page(&page, &PageSize { width: 500.0, height: 650.0 }, "p1")
            .finish_svg()
            .unwrap();

        assert!(svg.contains("ν_μ + (C12), TOT CC"));
        assert_eq!(svg.matches("<clipPath").count(), 2);
        assert_eq!(svg.matches("<polyline").count(), 1);
        // style 1 is red; the zero-valued point is dropped on the log axis
        assert!(svg.contains(r##"stroke="#ff0000""##));
        assert!(svg.contains(r#"id="p1-clip1""#));
    }

    #[test]
    fn test_star_markers_differ_from_asterisk() {
        let mut canvas = Canvas::new(50.0, 50.0, "s");
        let asterisk = style_for_index(0);
        let full_star = style_for_index(120);
        let open_star = style_for_index(130);
        assert_eq!(full_star.marker, Marker::FullStar);
        assert_eq!(open_star.marker, Marker::OpenStar);

        draw_marker(&mut canvas, 10.0, 10.0, &asterisk);
        draw_marker(&mut canvas, 20.0, 20.0, &full_star);
        draw_marker(&mut canvas, 30.0, 30.0, &open_star);
        let svg = canvas.finish_svg().unwrap();

        assert_eq!(svg.matches("<line").count(), 3);
        assert_eq!(svg.matches("<polygon").count(), 2);
        assert_eq!(svg.matches(r#"fill="none""#).count(), 1);
    }
}
