use serde::{
    Deserialize,
    Serialize
};

use crate::math::curve::nonparametriccurve::nonparametriccurve::SamplePoint;

/// 平滑後的稠密曲線，x 遞增。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothedCurve {
    points: Vec<SamplePoint>
}

impl SmoothedCurve {
    pub fn new(points: Vec<SamplePoint>) -> SmoothedCurve {
        SmoothedCurve { points }
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|pt| pt.x()).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|pt| pt.y()).collect()
    }
}
