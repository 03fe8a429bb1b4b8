use std::ops::Range;

use super::graph::Curve;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrimError {
    NonPositiveDensity(i32),
}

impl std::fmt::Display for TrimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrimError::NonPositiveDensity(k) => write!(
                f,
                "Maximum number of points per decade must be positive, got {k}"
            ),
        }
    }
}

impl std::error::Error for TrimError {}

/// Thins dense curves so that marker overlays do not hide the line they are
/// compared against. Works decade by decade along x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveTrimmer {
    max_per_decade: usize,
}

impl CurveTrimmer {
    pub fn new(max_per_decade: i32) -> Result<Self, TrimError> {
        match usize::try_from(max_per_decade) {
            Ok(k) if k > 0 => Ok(CurveTrimmer { max_per_decade: k }),
            _ => Err(TrimError::NonPositiveDensity(max_per_decade)),
        }
    }

    pub fn max_per_decade(&self) -> usize {
        self.max_per_decade
    }

    /// Splits the point indices of `curve` into consecutive decades.
    ///
    /// A decade opens at its first point `x0` and contains every following point
    /// with `x <= 10 * x0`. For `x0 <= 0` only points equal to `x0` join it.
    pub fn decades(curve: &Curve) -> Vec<Range<usize>> {
        let points = curve.points();
        let mut decades = Vec::new();
        let mut first = 0;

        while first < points.len() {
            let x0 = points[first][0];
            let upper = if x0 > 0.0 { 10.0 * x0 } else { x0 };
            let end = first
                + 1
                + points[first + 1..]
                    .iter()
                    .take_while(|p| p[0] <= upper)
                    .count();
            decades.push(first..end);
            first = end;
        }

        decades
    }

    /// Stride applied to a decade holding `count` points; 1 keeps everything.
    pub fn stride(&self, count: usize) -> usize {
        if count > self.max_per_decade {
            count / self.max_per_decade
        } else {
            1
        }
    }

    /// Returns a new curve keeping every `stride`-th point of each over-populated
    /// decade, always starting with the decade's first point.
    pub fn trim(&self, curve: &Curve) -> Curve {
        let points = curve.points();
        let mut kept = Vec::with_capacity(points.len());

        for decade in Self::decades(curve) {
            let stride = self.stride(decade.len());
            kept.extend(
                points[decade]
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| j % stride == 0)
                    .map(|(_, p)| *p),
            );
        }

        log::debug!(
            "Trimmed curve from {} to {} points (max {} per decade)",
            points.len(),
            kept.len(),
            self.max_per_decade
        );

        Curve::new(kept)
    }

    pub fn trim_opt(&self, curve: Option<&Curve>) -> Option<Curve> {
        curve.map(|c| self.trim(c))
    }
}
