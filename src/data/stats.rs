use thiserror::Error;

/// Errors from column statistics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// The column has no (non-NaN) values to summarise.
    #[error("cannot compute {0} of an empty column")]
    EmptyTable(&'static str),
}

/// Collect the non-NaN values of a column, sorted ascending.
fn sorted_values(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Statistical median; the mean of the two middle values for even counts.
/// NaN entries are skipped.
pub fn median(values: impl IntoIterator<Item = f64>) -> Result<f64, StatsError> {
    let sorted = sorted_values(values);
    let n = sorted.len();
    if n == 0 {
        return Err(StatsError::EmptyTable("median"));
    }
    if n % 2 == 1 {
        Ok(sorted[n / 2])
    } else {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Quantile `q` in `[0, 1]` with linear interpolation between the closest
/// ranks. NaN entries are skipped.
pub fn quantile(values: impl IntoIterator<Item = f64>, q: f64) -> Result<f64, StatsError> {
    let sorted = sorted_values(values);
    if sorted.is_empty() {
        return Err(StatsError::EmptyTable("quantile"));
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Ok(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Smallest and largest non-NaN value.
pub fn min_max(values: impl IntoIterator<Item = f64>) -> Result<(f64, f64), StatsError> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
        .ok_or(StatsError::EmptyTable("range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_median_odd() {
        assert_relative_eq!(median([2.0, 5.0, 1.0]).unwrap(), 2.0);
    }

    #[test]
    fn test_median_even_averages_middle() {
        assert_relative_eq!(median([4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_median_skips_nan() {
        assert_relative_eq!(median([f64::NAN, 10.0, 30.0, 20.0]).unwrap(), 20.0);
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(
            median(std::iter::empty::<f64>()),
            Err(StatsError::EmptyTable("median"))
        );
        assert!(median([f64::NAN]).is_err());
    }

    #[test]
    fn test_quantile_linear() {
        let values = [10.0, 20.0, 30.0, 40.0];
        assert_relative_eq!(quantile(values, 0.75).unwrap(), 32.5);
        assert_relative_eq!(quantile(values, 0.0).unwrap(), 10.0);
        assert_relative_eq!(quantile(values, 1.0).unwrap(), 40.0);
        assert_relative_eq!(quantile([7.0], 0.75).unwrap(), 7.0);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_max([3.0, -1.0, f64::NAN, 8.5]), Ok((-1.0, 8.5)));
        assert!(min_max(Vec::<f64>::new()).is_err());
    }
}
