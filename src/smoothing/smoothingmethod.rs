use serde::{
    Deserialize,
    Serialize
};

use crate::math::curve::nonparametriccurve::piecewisepolynomial::PolynomialType;

/// 插值方式由呼叫端依用途選擇，兩者不可互換：
/// `Spline` 只求平滑、可能越過局部極值；
/// `ShapePreserving` 不越過相鄰取樣點的局部極值，單調資料得單調曲線。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SmoothingMethod {
    /// 指定階數的插值 B-spline
    #[default]
    Spline,
    /// PCHIP
    ShapePreserving,
    Piecewise {
        polynomial: PolynomialType
    }
}

impl SmoothingMethod {
    pub fn name(&self) -> &'static str {
        match self {
            SmoothingMethod::Spline => "Spline",
            SmoothingMethod::ShapePreserving => "ShapePreserving",
            SmoothingMethod::Piecewise { polynomial } => polynomial.name(),
        }
    }

    /// 固定階數的方法回傳其階數；`Spline` 的階數由請求決定
    pub fn intrinsic_degree(&self) -> Option<usize> {
        match self {
            SmoothingMethod::Spline => None,
            SmoothingMethod::ShapePreserving => Some(PolynomialType::PiecewiseCubicHermite.degree()),
            SmoothingMethod::Piecewise { polynomial } => Some(polynomial.degree()),
        }
    }

    /// 除 degree + 1 之外，建構本身要求的最少點數
    pub fn necessary_points(&self) -> usize {
        match self {
            SmoothingMethod::Spline => 2,
            SmoothingMethod::ShapePreserving => PolynomialType::PiecewiseCubicHermite.necessary_points(),
            SmoothingMethod::Piecewise { polynomial } => polynomial.necessary_points(),
        }
    }

    pub fn default_degree(&self) -> usize {
        self.intrinsic_degree().unwrap_or(3)
    }

    /// 是否保證不越過相鄰取樣點的局部極值；`Spline` 不保證
    pub fn is_shape_preserving(&self) -> bool {
        match self {
            SmoothingMethod::Spline => false,
            SmoothingMethod::ShapePreserving => PolynomialType::PiecewiseCubicHermite.is_shape_preserving(),
            SmoothingMethod::Piecewise { polynomial } => polynomial.is_shape_preserving(),
        }
    }
}

/// 事後截斷範圍。截斷不屬於擬合本身，靠近邊界處會扭曲插值曲線。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClampBounds {
    min: f64,
    max: f64
}

impl ClampBounds {
    pub fn new(min: f64, max: f64) -> ClampBounds {
        ClampBounds { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn apply(&self, y: f64) -> f64 {
        y.clamp(self.min, self.max)
    }
}
