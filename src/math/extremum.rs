use argmin::core::{
    CostFunction,
    Executor,
    State
};
use argmin::solver::brent::BrentOpt;
use thiserror::Error;

use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    SamplePoint
};
use crate::math::grid::linspace;

const MAX_ITERS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtremumError {
    #[error("extremum scan needs at least 2 grid points, got {0}")]
    InvalidScan(usize),
    #[error("brent refinement failed: {0}")]
    Optimization(String)
}

// ─────────────────────────────────────────────
// Extremum
// ─────────────────────────────────────────────
//
// 先在等距格點上掃描，取最佳格點與左右鄰點為區間，
// 再以 Brent 法在該區間內細化。端點本身也是合法解。

struct SignedCurve<'a> {
    curve: &'a dyn NonparametricCurve,
    sign: f64
}

impl CostFunction for SignedCurve<'_> {
    type Param = f64;
    type Output = f64;

    fn cost(&self, x: &f64) -> Result<f64, argmin::core::Error> {
        Ok(self.sign * self.curve.value(*x))
    }
}

fn locate(
    curve: &dyn NonparametricCurve,
    scan_points: usize,
    sign: f64,
) -> Result<SamplePoint, ExtremumError> {
    if scan_points < 2 {
        return Err(ExtremumError::InvalidScan(scan_points));
    }

    let grid = linspace(curve.min_x(), curve.max_x(), scan_points);
    let signed: Vec<f64> = grid.iter().map(|&x| sign * curve.value(x)).collect();
    let best = signed
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0);

    let lo = grid[best.saturating_sub(1)];
    let hi = grid[(best + 1).min(grid.len() - 1)];

    let solver = BrentOpt::new(lo, hi);
    let result = Executor::new(SignedCurve { curve, sign }, solver)
        .configure(|state| state.max_iters(MAX_ITERS))
        .run()
        .map_err(|error| ExtremumError::Optimization(error.to_string()))?;

    let refined = result.state().get_best_param().copied();
    log::debug!(
        "grid extremum at x={} refined to {:?} on [{}, {}]",
        grid[best], refined, lo, hi
    );

    let x = match refined {
        Some(x) if x.is_finite() && sign * curve.value(x) <= signed[best] => x,
        _ => grid[best],
    };
    Ok(SamplePoint::new(x, curve.value(x)))
}

/// 曲線在定義域內的最小值點
pub fn locate_minimum(
    curve: &dyn NonparametricCurve,
    scan_points: usize,
) -> Result<SamplePoint, ExtremumError> {
    locate(curve, scan_points, 1.0)
}

/// 曲線在定義域內的最大值點
pub fn locate_maximum(
    curve: &dyn NonparametricCurve,
    scan_points: usize,
) -> Result<SamplePoint, ExtremumError> {
    locate(curve, scan_points, -1.0)
}
