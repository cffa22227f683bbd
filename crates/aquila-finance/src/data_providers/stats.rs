//! Summary statistics over loaded price series.

use ndarray::Array2;

use super::PriceSeries;
use crate::error::{FinanceError, FinanceResult};

fn non_empty(data: &[PriceSeries]) -> FinanceResult<()> {
    if data.is_empty() || data.iter().any(|s| s.prices.is_empty()) {
        return Err(FinanceError::NoData);
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sample covariance (denominator `n - 1`) between rows.
#[allow(clippy::cast_precision_loss)]
fn covariance(rows: &[Vec<f64>]) -> FinanceResult<Array2<f64>> {
    let len = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != len) {
        return Err(FinanceError::Configuration(
            "series have different lengths".into(),
        ));
    }
    let means: Vec<f64> = rows.iter().map(|r| mean(r)).collect();
    let n = rows.len();
    let mut cov = Array2::zeros((n, n));
    for i in 0..n {
        for j in i..n {
            let s: f64 = rows[i]
                .iter()
                .zip(&rows[j])
                .map(|(a, b)| (a - means[i]) * (b - means[j]))
                .sum();
            let value = s / (len as f64 - 1.0);
            cov[[i, j]] = value;
            cov[[j, i]] = value;
        }
    }
    Ok(cov)
}

/// Simple per-period returns `p[t] / p[t-1] - 1`.
///
/// A zero previous price counts as no change.
pub fn period_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|w| if w[0] == 0.0 { 0.0 } else { w[1] / w[0] - 1.0 })
        .collect()
}

/// Mean price of each series.
pub fn mean_vector(data: &[PriceSeries]) -> FinanceResult<Vec<f64>> {
    non_empty(data)?;
    Ok(data.iter().map(|s| mean(&s.prices)).collect())
}

/// Sample covariance matrix of the prices.
pub fn covariance_matrix(data: &[PriceSeries]) -> FinanceResult<Array2<f64>> {
    non_empty(data)?;
    let rows: Vec<Vec<f64>> = data.iter().map(|s| s.prices.clone()).collect();
    covariance(&rows)
}

/// Mean period return of each series.
pub fn period_return_mean_vector(data: &[PriceSeries]) -> FinanceResult<Vec<f64>> {
    non_empty(data)?;
    Ok(data
        .iter()
        .map(|s| mean(&period_returns(&s.prices)))
        .collect())
}

/// Sample covariance matrix of the period returns.
pub fn period_return_covariance_matrix(data: &[PriceSeries]) -> FinanceResult<Array2<f64>> {
    non_empty(data)?;
    let rows: Vec<Vec<f64>> = data.iter().map(|s| period_returns(&s.prices)).collect();
    covariance(&rows)
}

/// Dynamic time warping distance with absolute-difference cost.
pub fn dtw_distance(a: &[f64], b: &[f64]) -> f64 {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return f64::INFINITY;
    }
    // rolling rows of the accumulated cost table
    let mut prev = vec![f64::INFINITY; m + 1];
    let mut curr = vec![f64::INFINITY; m + 1];
    prev[0] = 0.0;
    for i in 1..=n {
        curr[0] = f64::INFINITY;
        for j in 1..=m {
            let cost = (a[i - 1] - b[j - 1]).abs();
            curr[j] = cost + prev[j].min(curr[j - 1]).min(prev[j - 1]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

/// Pairwise similarity `1 / dtw` with ones on the diagonal.
///
/// Identical off-diagonal series give an infinite similarity.
pub fn similarity_matrix(data: &[PriceSeries]) -> FinanceResult<Array2<f64>> {
    non_empty(data)?;
    let n = data.len();
    let mut rho = Array2::zeros((n, n));
    for i in 0..n {
        rho[[i, i]] = 1.0;
        for j in i + 1..n {
            let value = 1.0 / dtw_distance(&data[i].prices, &data[j].prices);
            rho[[i, j]] = value;
            rho[[j, i]] = value;
        }
    }
    Ok(rho)
}
