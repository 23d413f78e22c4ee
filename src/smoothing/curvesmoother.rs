use crate::math::curve::nonparametriccurve::bspline::BSpline;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    SamplePoint
};
use crate::math::curve::nonparametriccurve::piecewisepolynomial::{
    PiecewisePolynomial,
    PolynomialType
};
use crate::math::extremum;
use crate::math::grid::linspace;
use crate::smoothing::curvecomparison::CurveComparison;
use crate::smoothing::smoothedcurve::SmoothedCurve;
use crate::smoothing::smoothingerror::SmoothingError;
use crate::smoothing::smoothingmethod::{
    ClampBounds,
    SmoothingMethod
};
use crate::smoothing::smoothingrequest::SmoothingRequest;

// ─────────────────────────────────────────────
// CurveSmoother
// ─────────────────────────────────────────────
//
// 無狀態：每次呼叫彼此獨立，不做 I/O。
// 求值點只落在 [samples.first.x, samples.last.x]，不外插。

pub struct CurveSmoother;

impl CurveSmoother {
    /// 驗證請求並建立插值曲線
    pub fn fit(request: &SmoothingRequest) -> Result<Box<dyn NonparametricCurve>, SmoothingError> {
        request.validate()?;
        let samples = request.samples();
        let curve: Box<dyn NonparametricCurve> = match request.method() {
            SmoothingMethod::Spline => {
                Box::new(BSpline::interpolate(samples, request.degree())?)
            }
            SmoothingMethod::ShapePreserving => Box::new(PiecewisePolynomial::new(
                PolynomialType::PiecewiseCubicHermite,
                samples,
            )?),
            SmoothingMethod::Piecewise { polynomial } => {
                Box::new(PiecewisePolynomial::new(polynomial, samples)?)
            }
        };
        log::debug!(
            "fitted {} (shape preserving: {}) through {} samples",
            request.method().name(),
            request.method().is_shape_preserving(),
            samples.len()
        );
        Ok(curve)
    }

    /// 在 `resolution` 個等距點上求值
    pub fn smooth(request: &SmoothingRequest) -> Result<SmoothedCurve, SmoothingError> {
        let curve = Self::fit(request)?;
        let samples = request.samples();
        let first = samples[0];
        let last = samples[samples.len() - 1];
        let grid = linspace(first.x(), last.x(), request.resolution());

        let points = Self::evaluate_grid(curve.as_ref(), &grid, request.clamp_bounds());
        log::debug!(
            "{} smoothed {} samples into {} points over [{}, {}]",
            request.method().name(),
            samples.len(),
            points.len(),
            first.x(),
            last.x()
        );
        Ok(SmoothedCurve::new(points))
    }

    /// 在呼叫端指定的 x 上求值；任何 x 超出取樣範圍即回傳 `OutOfDomain`
    pub fn evaluate_at(
        request: &SmoothingRequest,
        xs: &[f64],
    ) -> Result<Vec<SamplePoint>, SmoothingError> {
        let curve = Self::fit(request)?;
        if let Some(&x) = xs.iter().find(|&&x| !curve.contains(x)) {
            return Err(SmoothingError::OutOfDomain {
                x,
                min: curve.min_x(),
                max: curve.max_x(),
            });
        }
        Ok(Self::evaluate_grid(curve.as_ref(), xs, request.clamp_bounds()))
    }

    /// 在共同定義域內逐點比較兩條曲線，例如 FedAvg 對 MOCHA 的延遲。
    /// 任何 x 不在兩者取樣範圍的交集內即回傳 `OutOfDomain`。
    pub fn compare(
        baseline: &SmoothingRequest,
        candidate: &SmoothingRequest,
        xs: &[f64],
    ) -> Result<Vec<CurveComparison>, SmoothingError> {
        let baseline_curve = Self::fit(baseline)?;
        let candidate_curve = Self::fit(candidate)?;
        let min = baseline_curve.min_x().max(candidate_curve.min_x());
        let max = baseline_curve.max_x().min(candidate_curve.max_x());
        if let Some(&x) = xs.iter().find(|&&x| !(min..=max).contains(&x)) {
            return Err(SmoothingError::OutOfDomain { x, min, max });
        }

        let baseline_points = Self::evaluate_grid(baseline_curve.as_ref(), xs, baseline.clamp_bounds());
        let candidate_points = Self::evaluate_grid(candidate_curve.as_ref(), xs, candidate.clamp_bounds());
        Ok(baseline_points
            .iter()
            .zip(candidate_points.iter())
            .map(|(b, c)| CurveComparison::new(b.x(), b.y(), c.y()))
            .collect())
    }

    /// 曲線最小值點，例如延遲曲線上的最佳工作節點數
    pub fn locate_minimum(
        request: &SmoothingRequest,
        scan_points: usize,
    ) -> Result<SamplePoint, SmoothingError> {
        let curve = Self::fit(request)?;
        let pt = extremum::locate_minimum(curve.as_ref(), scan_points)?;
        Ok(Self::clamp_point(pt, request.clamp_bounds()))
    }

    pub fn locate_maximum(
        request: &SmoothingRequest,
        scan_points: usize,
    ) -> Result<SamplePoint, SmoothingError> {
        let curve = Self::fit(request)?;
        let pt = extremum::locate_maximum(curve.as_ref(), scan_points)?;
        Ok(Self::clamp_point(pt, request.clamp_bounds()))
    }

    fn clamp_point(pt: SamplePoint, clamp_bounds: Option<ClampBounds>) -> SamplePoint {
        match clamp_bounds {
            Some(bounds) => SamplePoint::new(pt.x(), bounds.apply(pt.y())),
            None => pt,
        }
    }

    fn evaluate_grid(
        curve: &dyn NonparametricCurve,
        xs: &[f64],
        clamp_bounds: Option<ClampBounds>,
    ) -> Vec<SamplePoint> {
        let mut clipped = 0usize;
        let points: Vec<SamplePoint> = xs
            .iter()
            .map(|&x| {
                let y = curve.value(x);
                let pt = Self::clamp_point(SamplePoint::new(x, y), clamp_bounds);
                if pt.y() != y {
                    clipped += 1;
                }
                pt
            })
            .collect();
        if clipped > 0 {
            log::warn!("clamping changed {} of {} evaluated values", clipped, points.len());
        }
        points
    }
}

/// 通過取樣點的 `degree` 階 spline，於 `resolution` 個等距點求值。
pub fn smooth(
    samples: &[SamplePoint],
    resolution: usize,
    degree: usize,
    clamp_bounds: Option<ClampBounds>,
) -> Result<SmoothedCurve, SmoothingError> {
    let request = SmoothingRequest::new(samples.to_vec(), resolution, degree)
        .with_clamp_bounds(clamp_bounds);
    CurveSmoother::smooth(&request)
}

/// 保形（PCHIP）版本，適用於單調序列
pub fn smooth_shape_preserving(
    samples: &[SamplePoint],
    resolution: usize,
    clamp_bounds: Option<ClampBounds>,
) -> Result<SmoothedCurve, SmoothingError> {
    let request = SmoothingRequest::cubic(samples.to_vec(), resolution)
        .with_method(SmoothingMethod::ShapePreserving)
        .with_clamp_bounds(clamp_bounds);
    CurveSmoother::smooth(&request)
}
