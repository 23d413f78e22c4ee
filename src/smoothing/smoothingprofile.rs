use serde::Deserialize;

use crate::manager::managererror::ManagerError;
use crate::math::curve::nonparametriccurve::nonparametriccurve::SamplePoint;
use crate::smoothing::smoothingmethod::{
    ClampBounds,
    SmoothingMethod
};
use crate::smoothing::smoothingrequest::SmoothingRequest;

pub const DEFAULT_RESOLUTION: usize = 300;

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

/// 具名的平滑設定：方法、階數、取樣密度與截斷範圍
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SmoothingProfile {
    name: String,
    #[serde(default)]
    method: SmoothingMethod,
    #[serde(default)]
    degree: Option<usize>,
    #[serde(default = "default_resolution")]
    resolution: usize,
    #[serde(default)]
    clamp: Option<ClampBounds>
}

impl SmoothingProfile {
    pub fn new(name: String, method: SmoothingMethod) -> SmoothingProfile {
        SmoothingProfile {
            name,
            method,
            degree: None,
            resolution: DEFAULT_RESOLUTION,
            clamp: None
        }
    }

    /// 三次 spline、300 點、不截斷
    pub fn default_profile() -> SmoothingProfile {
        SmoothingProfile::new("default".to_owned(), SmoothingMethod::Spline)
    }

    pub fn from_json(json_value: serde_json::Value) -> Result<SmoothingProfile, ManagerError> {
        ManagerError::from_json_or_json_parse_error(json_value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> SmoothingMethod {
        self.method
    }

    pub fn degree(&self) -> usize {
        self.degree.unwrap_or_else(|| self.method.default_degree())
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn clamp(&self) -> Option<ClampBounds> {
        self.clamp
    }

    /// 以本設定包裝取樣點；驗證延後到平滑時進行
    pub fn request(&self, samples: Vec<SamplePoint>) -> SmoothingRequest {
        SmoothingRequest::new(samples, self.resolution, self.degree())
            .with_method(self.method)
            .with_degree(self.degree())
            .with_clamp_bounds(self.clamp)
    }
}
