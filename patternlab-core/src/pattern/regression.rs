//! Ordinary least-squares fit of a series against its index.

/// Fitted line `y = intercept + slope * x` for x = 0, 1, ..., n-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

/// Fit an OLS line through `ys` using the position as x.
///
/// Fewer than two points give a flat line through the mean (or NaN when
/// empty). NaN inputs propagate into the fit.
pub fn fit_against_index(ys: &[f64]) -> LinearFit {
    let n = ys.len() as f64;
    if ys.len() < 2 {
        let mean = ys.first().copied().unwrap_or(f64::NAN);
        return LinearFit {
            slope: 0.0,
            intercept: mean,
        };
    }

    let x_mean = (n - 1.0) / 2.0;
    let y_mean = ys.iter().sum::<f64>() / n;

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, &y) in ys.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }

    let slope = num / den;
    LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn exact_line() {
        let ys: Vec<f64> = (0..11).map(|i| 3.0 + 2.0 * i as f64).collect();
        let fit = fit_against_index(&ys);
        assert!((fit.slope - 2.0).abs() < EPS);
        assert!((fit.intercept - 3.0).abs() < EPS);
    }

    #[test]
    fn flat_series_has_zero_slope() {
        let fit = fit_against_index(&[5.0; 11]);
        assert!(fit.slope.abs() < EPS);
        assert!((fit.intercept - 5.0).abs() < EPS);
    }

    #[test]
    fn known_noisy_fit() {
        // x = 0..4, y = [1, 3, 2, 5, 4]: slope = 0.8, intercept = 1.4
        let fit = fit_against_index(&[1.0, 3.0, 2.0, 5.0, 4.0]);
        assert!((fit.slope - 0.8).abs() < EPS);
        assert!((fit.intercept - 1.4).abs() < EPS);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(fit_against_index(&[7.0]).slope, 0.0);
        assert_eq!(fit_against_index(&[7.0]).intercept, 7.0);
        assert!(fit_against_index(&[]).intercept.is_nan());
    }

    #[test]
    fn nan_propagates() {
        let fit = fit_against_index(&[1.0, f64::NAN, 3.0]);
        assert!(fit.slope.is_nan());
    }
}
