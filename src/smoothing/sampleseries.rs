use serde::Deserialize;

use crate::manager::managererror::ManagerError;
use crate::math::curve::nonparametriccurve::nonparametriccurve::SamplePoint;

/// 一條具名的取樣序列，例如某預算下的延遲對工作節點數
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SampleSeries {
    name: String,
    #[serde(default)]
    description: Option<String>,
    samples: Vec<SamplePoint>
}

impl SampleSeries {
    pub fn from_json(json_value: serde_json::Value) -> Result<SampleSeries, ManagerError> {
        ManagerError::from_json_or_json_parse_error(json_value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn samples(&self) -> &[SamplePoint] {
        &self.samples
    }
}
