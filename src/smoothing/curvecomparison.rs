use serde::Serialize;

/// 基準曲線與候選曲線在同一 x 上的值，以及候選相對基準的改善百分比：
///   improvement = (baseline - candidate) / baseline * 100
/// 基準值為 0 時改善百分比無定義，記為 `None`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveComparison {
    x: f64,
    baseline: f64,
    candidate: f64,
    improvement: Option<f64>
}

impl CurveComparison {
    pub fn new(x: f64, baseline: f64, candidate: f64) -> CurveComparison {
        let improvement = if baseline == 0.0 {
            None
        } else {
            Some((baseline - candidate) / baseline * 100.0)
        };
        CurveComparison { x, baseline, candidate, improvement }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn candidate(&self) -> f64 {
        self.candidate
    }

    pub fn improvement(&self) -> Option<f64> {
        self.improvement
    }

    /// 兩曲線之間的差距，供繪圖時填色
    pub fn gap(&self) -> f64 {
        self.baseline - self.candidate
    }
}
