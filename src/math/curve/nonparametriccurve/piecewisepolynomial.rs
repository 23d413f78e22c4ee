use nalgebra::{
    DMatrix,
    DVector
};
use serde::{
    Deserialize,
    Serialize
};

use crate::math::curve::curve::Curve;
use crate::math::curve::curveerror::CurveError;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    SamplePoint
};

// ─────────────────────────────────────────────
// Subpolynomial
// ─────────────────────────────────────────────

struct Subpolynomial {
    coefs: Vec<f64>,
    deriv_coefs: Vec<f64>,
    lhs_x: f64,
}

impl Subpolynomial {
    pub fn new(coefs: Vec<f64>, lhs_x: f64) -> Subpolynomial {
        let deriv_coefs = Self::compute_deriv_coefs(&coefs);
        Subpolynomial { coefs, deriv_coefs, lhs_x }
    }

    fn compute_deriv_coefs(coefs: &[f64]) -> Vec<f64> {
        let order = coefs.len() - 1;
        if order == 0 {
            vec![0.0]
        } else {
            (0..order)
                .map(|i| (order - i) as f64 * coefs[i])
                .collect()
        }
    }

    pub fn value(&self, x: f64) -> f64 {
        self.evaluate(&self.coefs, x)
    }

    pub fn derivative(&self, x: f64) -> f64 {
        self.evaluate(&self.deriv_coefs, x)
    }

    fn evaluate(&self, coefs: &[f64], x: f64) -> f64 {
        let x_diff = x - self.lhs_x;
        let mut result = coefs[0];
        for &beta in &coefs[1..] {
            result = f64::mul_add(result, x_diff, beta);
        }
        result
    }
}

// ─────────────────────────────────────────────
// Linear
// ─────────────────────────────────────────────

fn generate_linear_coef_list(points: &[SamplePoint]) -> Vec<Vec<f64>> {
    (0..(points.len() - 1))
        .map(|i| vec![
            SamplePoint::slope(&points[i], &points[i + 1]),
            points[i].y(),
        ])
        .collect()
}

// ─────────────────────────────────────────────
// 共用輔助函數
// ─────────────────────────────────────────────

fn interval_widths(points: &[SamplePoint]) -> Vec<f64> {
    points.windows(2).map(|w| w[1].x() - w[0].x()).collect()
}

fn secant_slopes(points: &[SamplePoint], h: &[f64]) -> Vec<f64> {
    (0..h.len())
        .map(|i| (points[i + 1].y() - points[i].y()) / h[i])
        .collect()
}

/// 從各節點的二階導數（moments）m[0..=n] 計算各區間的三次多項式係數。
///
/// 每段多項式以 Horner 形式存成 [d, c, b, a]，對應：
///   S_i(x) = a + b*(x-x_i) + c*(x-x_i)^2 + d*(x-x_i)^3
fn cubic_coefs_from_moments(points: &[SamplePoint], h: &[f64], m: &[f64]) -> Vec<Vec<f64>> {
    (0..h.len())
        .map(|i| {
            let d = (m[i + 1] - m[i]) / (6.0 * h[i]);
            let c = m[i] / 2.0;
            let b = (points[i + 1].y() - points[i].y()) / h[i]
                  - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0;
            let a = points[i].y();
            vec![d, c, b, a]
        })
        .collect()
}

/// 從各節點的一階導數（Hermite slopes）t[0..=n] 計算各區間的三次多項式係數。
fn cubic_coefs_from_hermite(points: &[SamplePoint], h: &[f64], t: &[f64]) -> Vec<Vec<f64>> {
    (0..h.len())
        .map(|i| {
            let dy = points[i + 1].y() - points[i].y();
            let a = points[i].y();
            let b = t[i];
            let c = (3.0 * dy / h[i] - 2.0 * t[i] - t[i + 1]) / h[i];
            let d = (-2.0 * dy / h[i] + t[i] + t[i + 1]) / (h[i] * h[i]);
            vec![d, c, b, a]
        })
        .collect()
}

// ─────────────────────────────────────────────
// CubicSpline（Natural / Clamped / NotAKnot）
// ─────────────────────────────────────────────
//
// 建立 (n+1)×(n+1) 聯立方程組求各節點二階導數 m[0..=n]，
// 內部方程式由 C² 連續性導出：
//   h[i-1]*m[i-1] + 2*(h[i-1]+h[i])*m[i] + h[i]*m[i+1]
//     = 6*( (y[i+1]-y[i])/h[i] - (y[i]-y[i-1])/h[i-1] )
// 第 0 列與第 n 列依邊界條件設定。

fn build_interior_system(points: &[SamplePoint], h: &[f64]) -> (DMatrix<f64>, DVector<f64>) {
    let n = h.len();
    let mut mat = DMatrix::<f64>::zeros(n + 1, n + 1);
    let mut rhs = DVector::<f64>::zeros(n + 1);

    for i in 1..n {
        mat[(i, i - 1)] = h[i - 1];
        mat[(i, i)]     = 2.0 * (h[i - 1] + h[i]);
        mat[(i, i + 1)] = h[i];
        rhs[i] = 6.0 * (
            (points[i + 1].y() - points[i].y()) / h[i]
          - (points[i].y()     - points[i - 1].y()) / h[i - 1]
        );
    }
    (mat, rhs)
}

fn solve_moments(
    construction: &'static str,
    mat: DMatrix<f64>,
    rhs: DVector<f64>,
) -> Result<Vec<f64>, CurveError> {
    mat.lu()
        .solve(&rhs)
        .map(|m| m.iter().copied().collect())
        .ok_or(CurveError::SingularSystem(construction))
}

/// Natural：m[0] = m[n] = 0
fn generate_natural_cubic_coef_list(points: &[SamplePoint]) -> Result<Vec<Vec<f64>>, CurveError> {
    let n = points.len() - 1;
    let h = interval_widths(points);

    let (mut mat, rhs) = build_interior_system(points, &h);
    mat[(0, 0)] = 1.0;
    mat[(n, n)] = 1.0;

    let m = solve_moments("NaturalCubic", mat, rhs)?;
    Ok(cubic_coefs_from_moments(points, &h, &m))
}

/// Clamped：端點一階導數為指定值
///
///   左端：2*h[0]*m[0] + h[0]*m[1]
///           = 6*( (y[1]-y[0])/h[0] - deriv_left )
///   右端：h[n-1]*m[n-1] + 2*h[n-1]*m[n]
///           = 6*( deriv_right - (y[n]-y[n-1])/h[n-1] )
fn generate_clamped_cubic_coef_list(
    points: &[SamplePoint],
    deriv_left: f64,
    deriv_right: f64,
) -> Result<Vec<Vec<f64>>, CurveError> {
    let n = points.len() - 1;
    let h = interval_widths(points);

    let (mut mat, mut rhs) = build_interior_system(points, &h);

    mat[(0, 0)] = 2.0 * h[0];
    mat[(0, 1)] = h[0];
    rhs[0] = 6.0 * ((points[1].y() - points[0].y()) / h[0] - deriv_left);

    mat[(n, n - 1)] = h[n - 1];
    mat[(n, n)]     = 2.0 * h[n - 1];
    rhs[n] = 6.0 * (deriv_right - (points[n].y() - points[n - 1].y()) / h[n - 1]);

    let m = solve_moments("ClampedCubic", mat, rhs)?;
    Ok(cubic_coefs_from_moments(points, &h, &m))
}

/// Not-a-knot：第三導數在 x[1] 與 x[n-1] 處連續
///
///   在 x[1]：  -h[1]*m[0] + (h[0]+h[1])*m[1] - h[0]*m[2] = 0
///   在 x[n-1]：-h[n-1]*m[n-2] + (h[n-2]+h[n-1])*m[n-1] - h[n-2]*m[n] = 0
fn generate_not_a_knot_cubic_coef_list(points: &[SamplePoint]) -> Result<Vec<Vec<f64>>, CurveError> {
    let n = points.len() - 1;
    let h = interval_widths(points);

    let (mut mat, rhs) = build_interior_system(points, &h);

    mat[(0, 0)] = -h[1];
    mat[(0, 1)] =  h[0] + h[1];
    mat[(0, 2)] = -h[0];

    mat[(n, n - 2)] = -h[n - 1];
    mat[(n, n - 1)] =  h[n - 2] + h[n - 1];
    mat[(n, n)]     = -h[n - 2];

    let m = solve_moments("NotAKnotCubic", mat, rhs)?;
    Ok(cubic_coefs_from_moments(points, &h, &m))
}

// ─────────────────────────────────────────────
// Akima / Modified Akima
// ─────────────────────────────────────────────
//
// 各節點斜率由鄰近有限差分加權平均：
//   Akima:  w1 = |s[i+1] - s[i]|,  w2 = |s[i-1] - s[i-2]|
//   makima: w1 += |s[i+1] + s[i]| / 2, w2 += |s[i-1] + s[i-2]| / 2
// 端點以外推補齊幽靈點。

fn akima_slopes(points: &[SamplePoint], h: &[f64], modified: bool) -> Vec<f64> {
    let n = h.len();
    let s = secant_slopes(points, h);

    let s1 = if n > 1 { s[1] } else { s[0] };
    let sn2 = if n > 1 { s[n - 2] } else { s[n - 1] };

    let s_m1 = 2.0 * s[0]      - s1;
    let s_m2 = 2.0 * s_m1      - s[0];
    let s_np1 = 2.0 * s[n - 1] - sn2;
    let s_np2 = 2.0 * s_np1    - s[n - 1];

    // ext[i+2] 對應 s[i]
    let mut ext = Vec::with_capacity(n + 4);
    ext.push(s_m2);
    ext.push(s_m1);
    ext.extend_from_slice(&s);
    ext.push(s_np1);
    ext.push(s_np2);

    (0..=n)
        .map(|i| {
            let sm2 = ext[i];
            let sm1 = ext[i + 1];
            let sp0 = ext[i + 2];
            let sp1 = ext[i + 3];

            let (w1, w2) = if modified {
                (
                    (sp1 - sp0).abs() + (sp1 + sp0).abs() / 2.0,
                    (sm1 - sm2).abs() + (sm1 + sm2).abs() / 2.0,
                )
            } else {
                (
                    (sp1 - sp0).abs(),
                    (sm1 - sm2).abs(),
                )
            };

            if w1 + w2 < f64::EPSILON {
                (sm1 + sp0) / 2.0
            } else {
                (w1 * sm1 + w2 * sp0) / (w1 + w2)
            }
        })
        .collect()
}

fn generate_akima_coef_list(points: &[SamplePoint], modified: bool) -> Vec<Vec<f64>> {
    let h = interval_widths(points);
    let t = akima_slopes(points, &h, modified);
    cubic_coefs_from_hermite(points, &h, &t)
}

// ─────────────────────────────────────────────
// PCHIP（Fritsch-Carlson，保單調性）
// ─────────────────────────────────────────────
//
// 內部節點：s[i-1]、s[i] 異號或為零時 t[i] = 0，
//           否則取加權調和平均
//             t[i] = (w1+w2) / (w1/s[i-1] + w2/s[i])
//             w1 = 2*h[i] + h[i-1]，w2 = h[i] + 2*h[i-1]
// 端點：單側三點公式，與 s 異號時設 0，
//       相鄰 s 異號且 |t| > 3|s| 時截為 3*s。
// 權重一律以區間寬度比 r 表示，極寬區間下不溢位。

fn pchip_end_slope(h0: f64, h1: f64, s0: f64, s1: f64) -> f64 {
    let r = h1 / h0;
    let raw = ((2.0 + r) * s0 - s1) / (1.0 + r);
    if raw.signum() != s0.signum() || s0 == 0.0 {
        0.0
    } else if s0.signum() != s1.signum() && raw.abs() > 3.0 * s0.abs() {
        3.0 * s0
    } else {
        raw
    }
}

fn pchip_slopes(h: &[f64], s: &[f64]) -> Vec<f64> {
    let n = h.len();
    let mut t = vec![0.0_f64; n + 1];

    // 單一區間退化為線性
    if n == 1 {
        t[0] = s[0];
        t[1] = s[0];
        return t;
    }

    for i in 1..n {
        if s[i - 1] == 0.0 || s[i] == 0.0 || s[i - 1].signum() != s[i].signum() {
            t[i] = 0.0;
        } else {
            let r = h[i] / h[i - 1];
            let w1 = (2.0 * r + 1.0) / (3.0 * (r + 1.0));
            let w2 = 1.0 - w1;
            t[i] = 1.0 / (w1 / s[i - 1] + w2 / s[i]);
        }
    }

    t[0] = pchip_end_slope(h[0], h[1], s[0], s[1]);
    t[n] = pchip_end_slope(h[n - 1], h[n - 2], s[n - 1], s[n - 2]);
    t
}

fn generate_pchip_coef_list(points: &[SamplePoint]) -> Vec<Vec<f64>> {
    let h = interval_widths(points);
    let s = secant_slopes(points, &h);
    let t = pchip_slopes(&h, &s);
    cubic_coefs_from_hermite(points, &h, &t)
}

// ─────────────────────────────────────────────
// PolynomialType
// ─────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolynomialType {
    Linear,
    NaturalCubic,
    /// 端點一階導數固定為 0.0，曲線在兩端水平
    ClampedCubic,
    /// 需要至少 4 個點（3 個區間）
    NotAKnotCubic,
    AkimaCubic,
    ModifiedAkimaCubic,
    /// PCHIP，不會越過相鄰取樣點的局部極值
    PiecewiseCubicHermite,
}

impl PolynomialType {
    pub fn name(&self) -> &'static str {
        match self {
            PolynomialType::Linear                => "Linear",
            PolynomialType::NaturalCubic          => "NaturalCubic",
            PolynomialType::ClampedCubic          => "ClampedCubic",
            PolynomialType::NotAKnotCubic         => "NotAKnotCubic",
            PolynomialType::AkimaCubic            => "AkimaCubic",
            PolynomialType::ModifiedAkimaCubic    => "ModifiedAkimaCubic",
            PolynomialType::PiecewiseCubicHermite => "PiecewiseCubicHermite",
        }
    }

    pub fn degree(&self) -> usize {
        match self {
            PolynomialType::Linear => 1,
            _ => 3,
        }
    }

    pub fn necessary_points(&self) -> usize {
        match self {
            PolynomialType::Linear                => 2,
            PolynomialType::NaturalCubic          => 3,
            PolynomialType::ClampedCubic          => 2,
            PolynomialType::NotAKnotCubic         => 4, // 兩條邊界方程需線性獨立
            PolynomialType::AkimaCubic            => 3,
            PolynomialType::ModifiedAkimaCubic    => 3,
            PolynomialType::PiecewiseCubicHermite => 3,
        }
    }

    /// 是否保證不越過相鄰取樣點的局部極值
    pub fn is_shape_preserving(&self) -> bool {
        matches!(self, PolynomialType::Linear | PolynomialType::PiecewiseCubicHermite)
    }
}

// ─────────────────────────────────────────────
// PiecewisePolynomial
// ─────────────────────────────────────────────

pub struct PiecewisePolynomial {
    max_x: f64,
    max_y: f64,
    polynomial_type: PolynomialType,
    subpolynomial_list: Vec<Subpolynomial>,
}

impl PiecewisePolynomial {
    /// `points` 須已依 x 嚴格遞增排序
    pub fn new(
        polynomial_type: PolynomialType,
        points: &[SamplePoint],
    ) -> Result<PiecewisePolynomial, CurveError> {
        let required = polynomial_type.necessary_points();
        if points.len() < required {
            return Err(CurveError::InsufficientPoints {
                construction: polynomial_type.name(),
                required,
                actual: points.len(),
            });
        }

        let coef_list = match polynomial_type {
            PolynomialType::Linear                => generate_linear_coef_list(points),
            PolynomialType::NaturalCubic          => generate_natural_cubic_coef_list(points)?,
            PolynomialType::ClampedCubic          => generate_clamped_cubic_coef_list(points, 0.0, 0.0)?,
            PolynomialType::NotAKnotCubic         => generate_not_a_knot_cubic_coef_list(points)?,
            PolynomialType::AkimaCubic            => generate_akima_coef_list(points, false),
            PolynomialType::ModifiedAkimaCubic    => generate_akima_coef_list(points, true),
            PolynomialType::PiecewiseCubicHermite => generate_pchip_coef_list(points),
        };

        let subpolynomial_list = coef_list
            .into_iter()
            .zip(points.iter())
            .map(|(coefs, pt)| Subpolynomial::new(coefs, pt.x()))
            .collect();

        let last = points[points.len() - 1];
        log::debug!("built {} through {} points", polynomial_type.name(), points.len());

        Ok(PiecewisePolynomial {
            max_x: last.x(),
            max_y: last.y(),
            polynomial_type,
            subpolynomial_list,
        })
    }

    pub fn polynomial_type(&self) -> PolynomialType {
        self.polynomial_type
    }

    fn find_segment(&self, x: f64) -> usize {
        if x.is_nan() || x <= self.min_x() {
            0
        } else if x >= self.max_x {
            self.subpolynomial_list.len() - 1
        } else {
            self.subpolynomial_list
                .partition_point(|s| s.lhs_x <= x) - 1
        }
    }
}

// ─────────────────────────────────────────────
// Trait 實作
// ─────────────────────────────────────────────

impl NonparametricCurve for PiecewisePolynomial {
    fn points(&self) -> Vec<SamplePoint> {
        let mut pts: Vec<SamplePoint> = self
            .subpolynomial_list
            .iter()
            .map(|s| SamplePoint::new(s.lhs_x, s.value(s.lhs_x)))
            .collect();
        pts.push(SamplePoint::new(self.max_x, self.max_y));
        pts
    }

    fn min_x(&self) -> f64 {
        self.subpolynomial_list[0].lhs_x
    }

    fn max_x(&self) -> f64 {
        self.max_x
    }
}

impl Curve for PiecewisePolynomial {
    fn value(&self, x: f64) -> f64 {
        // 右端點直接回傳取樣值，避免末段多項式的捨入誤差
        if x == self.max_x {
            return self.max_y;
        }
        let i = self.find_segment(x);
        self.subpolynomial_list[i].value(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        let i = self.find_segment(x);
        self.subpolynomial_list[i].derivative(x)
    }
}
