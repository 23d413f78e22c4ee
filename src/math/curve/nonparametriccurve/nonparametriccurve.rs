use serde::{
    Deserialize,
    Serialize
};

use crate::math::curve::curve::Curve;

/// 單一取樣點 (x, y)。JSON 以 `[x, y]` 陣列表示。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct SamplePoint {
    x: f64,
    y: f64
}

impl SamplePoint {
    pub fn new(x: f64, y: f64) -> SamplePoint {
        SamplePoint { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn slope(lhs_pt: &SamplePoint, rhs_pt: &SamplePoint) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }
}

impl From<[f64; 2]> for SamplePoint {
    fn from(pair: [f64; 2]) -> SamplePoint {
        SamplePoint::new(pair[0], pair[1])
    }
}

impl From<(f64, f64)> for SamplePoint {
    fn from(pair: (f64, f64)) -> SamplePoint {
        SamplePoint::new(pair.0, pair.1)
    }
}

impl From<SamplePoint> for [f64; 2] {
    fn from(pt: SamplePoint) -> [f64; 2] {
        [pt.x, pt.y]
    }
}

/// 由取樣點建構、只在 [min_x, max_x] 內有定義的插值曲線
pub trait NonparametricCurve: Curve {
    /// 曲線在各節點上的值
    fn points(&self) -> Vec<SamplePoint>;

    fn min_x(&self) -> f64;

    fn max_x(&self) -> f64;

    fn contains(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}
