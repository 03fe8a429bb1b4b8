use serde::Serialize;

use crate::config::{PaneScale, ReportConfig};
use crate::curve::Curve;

// Axis limits used when a frame has no curve to fit.
const DEFAULT_MIN: f64 = 1e-5;
const DEFAULT_MAX: f64 = 1.0;

/// How far a frame extends beyond the data it holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameScale {
    pub x_min_scale: f64,
    pub x_max_scale: f64,
    pub y_min_scale: f64,
    pub y_max_scale: f64,
    pub x_floor: f64,
}

impl FrameScale {
    pub fn from_config(config: &ReportConfig, pane: PaneScale) -> Self {
        FrameScale {
            x_min_scale: config.x_min_scale,
            x_max_scale: config.x_max_scale,
            y_min_scale: pane.y_min_scale,
            y_max_scale: pane.y_max_scale,
            x_floor: config.x_floor,
        }
    }
}

/// Axis ranges, scales and titles of one plotting pane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub log_x: bool,
    pub log_y: bool,
    pub x_title: String,
    pub y_title: String,
}

impl Frame {
    /// Fits a frame around up to two curves. The first curve sets the ranges,
    /// the second one only widens them.
    pub fn fit(first: Option<&Curve>, second: Option<&Curve>, scale: &FrameScale) -> Self {
        let (mut x_min, mut x_max) = (DEFAULT_MIN, DEFAULT_MAX);
        let (mut y_min, mut y_max) = (DEFAULT_MIN, DEFAULT_MAX);

        if let Some((x, y)) = first.and_then(ranges) {
            (x_min, x_max) = x;
            (y_min, y_max) = y;
        }
        if let Some(((x0, x1), (y0, y1))) = second.and_then(ranges) {
            x_min = x_min.min(x0);
            x_max = x_max.max(x1);
            y_min = y_min.min(y0);
            y_max = y_max.max(y1);
        }

        x_min *= scale.x_min_scale;
        x_max *= scale.x_max_scale;
        y_min *= scale.y_min_scale;
        y_max *= scale.y_max_scale;
        x_min = x_min.max(scale.x_floor);

        Frame {
            x_min,
            x_max,
            y_min,
            y_max,
            log_x: false,
            log_y: false,
            x_title: String::new(),
            y_title: String::new(),
        }
    }

    pub fn with_log(mut self, log_x: bool, log_y: bool) -> Self {
        self.log_x = log_x;
        self.log_y = log_y;
        self
    }

    pub fn with_titles(mut self, x_title: &str, y_title: &str) -> Self {
        self.x_title = x_title.to_owned();
        self.y_title = y_title.to_owned();
        self
    }
}

type Ranges = ((f64, f64), (f64, f64));

fn ranges(curve: &Curve) -> Option<Ranges> {
    Some((curve.x_range()?, curve.y_range()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(lo: f64, hi: f64) -> FrameScale {
        FrameScale {
            x_min_scale: 0.5,
            x_max_scale: 1.5,
            y_min_scale: lo,
            y_max_scale: hi,
            x_floor: 0.1,
        }
    }

    #[test]
    fn test_defaults_without_curves() {
        let frame = Frame::fit(None, None, &scale(0.5, 1.5));
        assert_eq!(frame.x_min, 0.1);
        assert_eq!(frame.x_max, 1.5);
        assert!((frame.y_min - 0.5e-5).abs() < 1e-18);
        assert_eq!(frame.y_max, 1.5);
    }

    #[test]
    fn test_fit_two_curves() {
        let a = Curve::new(vec![[1.0, 2.0], [10.0, 20.0]]);
        let b = Curve::new(vec![[0.5, 1.0], [100.0, 10.0]]);
        let frame = Frame::fit(Some(&a), Some(&b), &scale(0.5, 1.5));
        assert_eq!(frame.x_min, 0.25);
        assert_eq!(frame.x_max, 150.0);
        assert_eq!(frame.y_min, 0.5);
        assert_eq!(frame.y_max, 30.0);
    }

    #[test]
    fn test_x_floor() {
        let a = Curve::new(vec![[0.01, 1.0], [1.0, 1.0]]);
        let frame = Frame::fit(Some(&a), None, &scale(0.9, 1.1));
        assert_eq!(frame.x_min, 0.1);
        assert!((frame.y_min - 0.9).abs() < 1e-12);
        assert!((frame.y_max - 1.1).abs() < 1e-12);
    }
}
