use super::graph::Curve;

/// Ratio value reported when the numerator vanishes but the denominator does not.
pub const NUMERATOR_VANISHED: f64 = -1.0;
/// Ratio value reported when the denominator vanishes.
pub const DENOMINATOR_VANISHED: f64 = 1.0;

/// Point-wise `numerator / denominator`, sampled at the numerator's x values.
///
/// Both curves are evaluated through [`Curve::eval`]. Zero operands map to the
/// sentinels above; a point where both curves vanish is reported as
/// [`DENOMINATOR_VANISHED`]. Returns `None` if either curve is absent.
pub fn ratio(numerator: Option<&Curve>, denominator: Option<&Curve>) -> Option<Curve> {
    let (numerator, denominator) = (numerator?, denominator?);

    log::debug!(
        "Computing ratio over {} numerator points",
        numerator.len()
    );

    let points = numerator
        .xs()
        .map(|x| [x, point_ratio(numerator.eval(x), denominator.eval(x))])
        .collect();

    Some(Curve::new(points))
}

pub fn point_ratio(num: f64, den: f64) -> f64 {
    if num != 0.0 && den != 0.0 {
        num / den
    } else if num == 0.0 && den != 0.0 {
        NUMERATOR_VANISHED
    } else {
        DENOMINATOR_VANISHED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_on_numerator_grid() {
        let num = Curve::new(vec![[1.0, 2.0], [2.0, 4.0], [3.0, 9.0]]);
        let den = Curve::new(vec![[1.0, 1.0], [3.0, 3.0]]);
        let r = ratio(Some(&num), Some(&den)).unwrap();
        let xs: Vec<f64> = r.xs().collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
        assert!((r.points()[0][1] - 2.0).abs() < 1e-12);
        // denominator interpolated to 2.0 at x = 2
        assert!((r.points()[1][1] - 2.0).abs() < 1e-12);
        assert!((r.points()[2][1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_sentinels() {
        let num = Curve::new(vec![[1.0, 0.0], [2.0, 5.0], [3.0, 0.0]]);
        let den = Curve::new(vec![[1.0, 1.0], [2.0, 0.0], [3.0, 0.0]]);
        let r = ratio(Some(&num), Some(&den)).unwrap();
        assert_eq!(r.points()[0][1], NUMERATOR_VANISHED);
        assert_eq!(r.points()[1][1], DENOMINATOR_VANISHED);
        // both vanish
        assert_eq!(r.points()[2][1], DENOMINATOR_VANISHED);
    }

    #[test]
    fn test_absent_input_propagates() {
        let c = Curve::new(vec![[1.0, 1.0]]);
        assert!(ratio(None, Some(&c)).is_none());
        assert!(ratio(Some(&c), None).is_none());
        assert!(ratio(None, None).is_none());
    }
}
