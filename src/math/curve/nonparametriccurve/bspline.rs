use nalgebra::{
    DMatrix,
    DVector
};

use crate::math::curve::curve::Curve;
use crate::math::curve::curveerror::CurveError;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    SamplePoint
};

// ─────────────────────────────────────────────
// BSpline
// ─────────────────────────────────────────────
//
// 任意階數 k 的 B-spline：
//   S(x) = Σ c_j·B_{j,k}(x)，j = 0..n-1
// 節點向量長度 n + k + 1，兩端各重複 k+1 次（clamped）。
// 求值採 de Boor 演算法，內部節點之間具 C^{k-1} 連續性。

#[derive(Debug, Clone)]
pub struct BSpline {
    knots: Vec<f64>,
    coefs: Vec<f64>,
    degree: usize,
}

/// 找出滿足 knots[span] <= x < knots[span+1] 的區間，
/// 限制在 [degree, n_coefs-1] 之內；NaN 視為左端。
fn find_span(knots: &[f64], n_coefs: usize, degree: usize, x: f64) -> usize {
    if x >= knots[n_coefs] {
        return n_coefs - 1;
    }
    if x.is_nan() || x <= knots[degree] {
        return degree;
    }
    degree + knots[degree..=n_coefs].partition_point(|&t| t <= x) - 1
}

/// 在區間 span 上所有非零基底函數 B_{span-k..=span}(x)（Cox-de Boor 遞迴）
fn basis_functions(knots: &[f64], span: usize, degree: usize, x: f64) -> Vec<f64> {
    let mut basis = vec![0.0_f64; degree + 1];
    let mut left = vec![0.0_f64; degree + 1];
    let mut right = vec![0.0_f64; degree + 1];
    basis[0] = 1.0;

    for j in 1..=degree {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = basis[r] / (right[r + 1] + left[j - r]);
            basis[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        basis[j] = saved;
    }
    basis
}

/// 插值用節點向量。
///
/// 奇數階：內部節點取取樣點 x，兩端各略過 (k-1)/2 個（k=3 即 not-a-knot）。
/// 偶數階：內部節點取相鄰取樣點中點，兩端各略過 k/2 個。
fn interpolation_knots(xs: &[f64], degree: usize) -> Vec<f64> {
    let first = xs[0];
    let last = xs[xs.len() - 1];

    let interior: Vec<f64> = if degree % 2 == 1 {
        let skip = (degree - 1) / 2;
        xs[(skip + 1)..(xs.len() - skip - 1)].to_vec()
    } else {
        let skip = degree / 2;
        let midpoints: Vec<f64> = xs.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();
        midpoints[skip..(midpoints.len() - skip)].to_vec()
    };

    let mut knots = Vec::with_capacity(xs.len() + degree + 1);
    knots.extend(std::iter::repeat_n(first, degree + 1));
    knots.extend(interior);
    knots.extend(std::iter::repeat_n(last, degree + 1));
    knots
}

impl BSpline {
    /// 通過所有取樣點的 k 階 B-spline。`points` 須依 x 嚴格遞增排序，
    /// 且至少 k+1 個點。
    pub fn interpolate(points: &[SamplePoint], degree: usize) -> Result<BSpline, CurveError> {
        let n = points.len();
        if degree == 0 || n < degree + 1 {
            return Err(CurveError::InsufficientPoints {
                construction: "BSpline",
                required: degree.max(1) + 1,
                actual: n,
            });
        }

        let xs: Vec<f64> = points.iter().map(|pt| pt.x()).collect();
        let knots = interpolation_knots(&xs, degree);

        // 一階時基底矩陣為單位矩陣，係數即取樣值
        let coefs = if degree == 1 {
            points.iter().map(|pt| pt.y()).collect()
        } else {
            let mut collocation = DMatrix::<f64>::zeros(n, n);
            for (row, &x) in xs.iter().enumerate() {
                let span = find_span(&knots, n, degree, x);
                let basis = basis_functions(&knots, span, degree, x);
                for (j, b) in basis.into_iter().enumerate() {
                    collocation[(row, span - degree + j)] = b;
                }
            }
            let rhs = DVector::from_iterator(n, points.iter().map(|pt| pt.y()));
            collocation
                .lu()
                .solve(&rhs)
                .map(|c| c.iter().copied().collect())
                .ok_or(CurveError::SingularSystem("BSpline"))?
        };

        log::debug!("interpolated degree {} b-spline through {} points", degree, n);

        Ok(BSpline { knots, coefs, degree })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn coefs(&self) -> &[f64] {
        &self.coefs
    }

    /// 導函數本身也是 B-spline：階數 k-1，節點去頭尾各一，
    ///   c'_j = k·(c_{j+1} - c_j) / (t_{j+k+1} - t_{j+1})
    /// 零階時回傳恆為 0 的曲線。
    pub fn derivative_spline(&self) -> BSpline {
        let k = self.degree;
        if k == 0 {
            return BSpline {
                knots: self.knots.clone(),
                coefs: vec![0.0; self.coefs.len()],
                degree: 0,
            };
        }

        let coefs = (0..(self.coefs.len() - 1))
            .map(|j| {
                let denom = self.knots[j + k + 1] - self.knots[j + 1];
                if denom == 0.0 {
                    0.0
                } else {
                    k as f64 * (self.coefs[j + 1] - self.coefs[j]) / denom
                }
            })
            .collect();

        BSpline {
            knots: self.knots[1..(self.knots.len() - 1)].to_vec(),
            coefs,
            degree: k - 1,
        }
    }

    fn de_boor(&self, x: f64) -> f64 {
        let p = self.degree;
        let span = find_span(&self.knots, self.coefs.len(), p, x);

        let mut d: Vec<f64> = (0..=p).map(|j| self.coefs[span - p + j]).collect();
        for r in 1..=p {
            for j in (r..=p).rev() {
                let i = span - p + j;
                let denom = self.knots[i + p + 1 - r] - self.knots[i];
                let alpha = if denom == 0.0 { 0.0 } else { (x - self.knots[i]) / denom };
                d[j] = (1.0 - alpha) * d[j - 1] + alpha * d[j];
            }
        }
        d[p]
    }
}

impl NonparametricCurve for BSpline {
    fn points(&self) -> Vec<SamplePoint> {
        let p = self.degree;
        let mut breakpoints: Vec<f64> = self.knots[p..=(self.coefs.len())].to_vec();
        breakpoints.dedup();
        breakpoints
            .into_iter()
            .map(|x| SamplePoint::new(x, self.de_boor(x)))
            .collect()
    }

    fn min_x(&self) -> f64 {
        self.knots[0]
    }

    fn max_x(&self) -> f64 {
        self.knots[self.knots.len() - 1]
    }
}

impl Curve for BSpline {
    fn value(&self, x: f64) -> f64 {
        self.de_boor(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        self.derivative_spline().de_boor(x)
    }
}

#[cfg(test)]
mod tests {
    use approx::{
        assert_abs_diff_eq,
        assert_relative_eq
    };

    use super::*;

    fn points_from(pairs: &[(f64, f64)]) -> Vec<SamplePoint> {
        pairs.iter().map(|&p| SamplePoint::from(p)).collect()
    }

    #[test]
    fn cubic_knots_follow_not_a_knot_placement() {
        let xs = [1.0, 3.0, 5.0, 7.0, 9.0];
        assert_eq!(
            interpolation_knots(&xs, 3),
            vec![1.0, 1.0, 1.0, 1.0, 5.0, 9.0, 9.0, 9.0, 9.0]
        );
    }

    #[test]
    fn even_degree_knots_use_midpoints() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(
            interpolation_knots(&xs, 2),
            vec![0.0, 0.0, 0.0, 1.5, 3.0, 3.0, 3.0]
        );
    }

    #[test]
    fn basis_functions_partition_unity() {
        let knots = interpolation_knots(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], 3);
        for x in [0.0, 0.4, 1.7, 2.5, 4.99] {
            let span = find_span(&knots, 6, 3, x);
            let total: f64 = basis_functions(&knots, span, 3, x).iter().sum();
            assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn interpolates_samples_for_each_degree() {
        let pts = points_from(&[(1.0, 2.8), (3.0, 2.1), (5.0, 1.7), (7.0, 1.5), (9.0, 1.4), (11.0, 1.45)]);
        for degree in 1..=5 {
            let spline = BSpline::interpolate(&pts, degree).unwrap();
            for pt in &pts {
                assert_relative_eq!(spline.value(pt.x()), pt.y(), max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn linear_spline_is_the_polyline() {
        let pts = points_from(&[(0.0, 0.0), (2.0, 4.0), (3.0, 1.0)]);
        let spline = BSpline::interpolate(&pts, 1).unwrap();
        assert_abs_diff_eq!(spline.value(1.0), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spline.value(2.5), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(spline.derivative(2.5), -3.0, epsilon = 1e-12);
    }

    #[test]
    fn cubic_reproduces_a_cubic_polynomial() {
        let f = |x: f64| 0.5 * x * x * x - x * x + 3.0;
        let pts: Vec<SamplePoint> = [0.0, 1.0, 2.0, 4.0, 5.0]
            .iter()
            .map(|&x| SamplePoint::new(x, f(x)))
            .collect();
        let spline = BSpline::interpolate(&pts, 3).unwrap();
        for x in [0.5, 1.5, 3.0, 4.5] {
            assert_abs_diff_eq!(spline.value(x), f(x), epsilon = 1e-9);
        }
        assert_abs_diff_eq!(spline.derivative(3.0), 1.5 * 9.0 - 6.0, epsilon = 1e-9);
    }

    #[test]
    fn domain_matches_sample_range() {
        let pts = points_from(&[(1.0, 1.0), (2.0, 3.0), (4.0, 2.0), (6.0, 5.0)]);
        let spline = BSpline::interpolate(&pts, 3).unwrap();
        assert_eq!(spline.min_x(), 1.0);
        assert_eq!(spline.max_x(), 6.0);
        assert_eq!(spline.knots().len(), pts.len() + spline.degree() + 1);
        assert_eq!(spline.coefs().len(), pts.len());
    }

    #[test]
    fn rejects_too_few_points() {
        let pts = points_from(&[(1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(
            BSpline::interpolate(&pts, 3).err(),
            Some(CurveError::InsufficientPoints { construction: "BSpline", required: 4, actual: 2 })
        );
    }

    #[test]
    fn polyline_handles_span_wider_than_f64_max() {
        let pts = points_from(&[(-1e308, 1.0), (-5e307, 2.0), (0.0, 3.0), (5e307, 4.0), (1e308, 5.0)]);
        let spline = BSpline::interpolate(&pts, 1).unwrap();
        for pt in &pts {
            assert_abs_diff_eq!(spline.value(pt.x()), pt.y(), epsilon = 1e-9);
        }
        assert_abs_diff_eq!(spline.value(-7.5e307), 1.5, epsilon = 1e-9);
    }

    #[test]
    fn nan_argument_does_not_panic() {
        let pts = points_from(&[(1.0, 1.0), (2.0, 3.0), (4.0, 2.0), (6.0, 5.0)]);
        for degree in [1, 3] {
            let spline = BSpline::interpolate(&pts, degree).unwrap();
            assert!(spline.value(f64::NAN).is_nan());
        }
    }
}
