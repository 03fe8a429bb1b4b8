use serde::{Deserialize, Serialize};

/// An energy-ordered sequence of `[x, y]` samples, e.g. a cross section vs. neutrino energy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    points: Vec<[f64; 2]>,
}

impl Curve {
    /// Builds a curve from raw samples. Non-finite samples are dropped and the
    /// remaining ones are stably sorted by x.
    pub fn new(points: Vec<[f64; 2]>) -> Self {
        let mut points: Vec<[f64; 2]> = points
            .into_iter()
            .filter(|[x, y]| x.is_finite() && y.is_finite())
            .collect();

        if !points.windows(2).all(|w| w[0][0] <= w[1][0]) {
            points.sort_by(|a, b| a[0].total_cmp(&b[0]));
        }

        Curve { points }
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p[0])
    }

    pub fn x_range(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some((first[0], last[0]))
    }

    pub fn y_range(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        Some(
            self.points
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
                    (min.min(p[1]), max.max(p[1]))
                }),
        )
    }

    /// Evaluates the curve at `x` by linear interpolation between the bracketing
    /// samples. Outside the sampled range the two outermost samples are
    /// extrapolated. An empty curve evaluates to 0.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.points.len();
        match n {
            0 => return 0.0,
            1 => return self.points[0][1],
            _ => {}
        }

        // index of the first sample with x_i > x
        let upper = self.points.partition_point(|p| p[0] <= x);
        let low = upper.saturating_sub(1).min(n - 2);
        let [x0, y0] = self.points[low];
        let [x1, y1] = self.points[low + 1];

        if x == x0 {
            return y0;
        }
        if x == x1 {
            return y1;
        }
        if x1 == x0 {
            return y0;
        }

        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }
}
