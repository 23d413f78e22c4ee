use crate::math::curve::nonparametriccurve::nonparametriccurve::SamplePoint;
use crate::smoothing::smoothingerror::SmoothingError;
use crate::smoothing::smoothingmethod::{
    ClampBounds,
    SmoothingMethod
};

pub const DEFAULT_DEGREE: usize = 3;

/// 單次繪圖呼叫的平滑請求；建構一次、使用一次。
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingRequest {
    samples: Vec<SamplePoint>,
    resolution: usize,
    degree: usize,
    clamp_bounds: Option<ClampBounds>,
    method: SmoothingMethod
}

impl SmoothingRequest {
    pub fn new(samples: Vec<SamplePoint>, resolution: usize, degree: usize) -> SmoothingRequest {
        SmoothingRequest {
            samples,
            resolution,
            degree,
            clamp_bounds: None,
            method: SmoothingMethod::Spline
        }
    }

    /// 三次 spline
    pub fn cubic(samples: Vec<SamplePoint>, resolution: usize) -> SmoothingRequest {
        SmoothingRequest::new(samples, resolution, DEFAULT_DEGREE)
    }

    pub fn with_clamp_bounds(mut self, clamp_bounds: Option<ClampBounds>) -> SmoothingRequest {
        self.clamp_bounds = clamp_bounds;
        self
    }

    /// 切換方法；固定階數的方法會一併改寫 degree
    pub fn with_method(mut self, method: SmoothingMethod) -> SmoothingRequest {
        if let Some(degree) = method.intrinsic_degree() {
            self.degree = degree;
        }
        self.method = method;
        self
    }

    pub fn with_resolution(mut self, resolution: usize) -> SmoothingRequest {
        self.resolution = resolution;
        self
    }

    pub fn with_degree(mut self, degree: usize) -> SmoothingRequest {
        self.degree = degree;
        self
    }

    pub fn samples(&self) -> &[SamplePoint] {
        &self.samples
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn clamp_bounds(&self) -> Option<ClampBounds> {
        self.clamp_bounds
    }

    pub fn method(&self) -> SmoothingMethod {
        self.method
    }

    /// 依序檢查：degree、方法階數、resolution、點數、有限值、x 嚴格遞增、截斷範圍。
    /// 不會自行排序或修補輸入。
    pub fn validate(&self) -> Result<(), SmoothingError> {
        if self.degree == 0 {
            return Err(SmoothingError::InvalidDegree(self.degree));
        }
        if let Some(intrinsic) = self.method.intrinsic_degree() {
            if intrinsic != self.degree {
                return Err(SmoothingError::DegreeMismatch {
                    method: self.method.name(),
                    intrinsic,
                    requested: self.degree
                });
            }
        }
        if self.resolution == 0 {
            return Err(SmoothingError::InvalidResolution(self.resolution));
        }

        let required = (self.degree + 1).max(self.method.necessary_points());
        if self.samples.len() < required {
            return Err(SmoothingError::InsufficientSamples {
                required,
                actual: self.samples.len(),
                degree: self.degree
            });
        }

        if let Some((index, pt)) = self.samples.iter().enumerate().find(|(_, pt)| !pt.is_finite()) {
            return Err(SmoothingError::NonFiniteSample { index, x: pt.x(), y: pt.y() });
        }

        if let Some(index) = self.samples.windows(2).position(|w| w[1].x() <= w[0].x()) {
            return Err(SmoothingError::NonMonotonicInput {
                index,
                previous: self.samples[index].x(),
                next: self.samples[index + 1].x()
            });
        }

        if let Some(bounds) = self.clamp_bounds {
            if !bounds.is_valid() {
                return Err(SmoothingError::InvalidClampBounds { min: bounds.min(), max: bounds.max() });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::curve::nonparametriccurve::piecewisepolynomial::PolynomialType;

    fn samples(pairs: &[(f64, f64)]) -> Vec<SamplePoint> {
        pairs.iter().map(|&p| SamplePoint::from(p)).collect()
    }

    #[test]
    fn with_method_adopts_intrinsic_degree() {
        let request = SmoothingRequest::new(samples(&[(1.0, 1.0), (2.0, 2.0)]), 10, 3)
            .with_method(SmoothingMethod::Piecewise { polynomial: PolynomialType::Linear });
        assert_eq!(request.degree(), 1);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn degree_zero_is_rejected() {
        let request = SmoothingRequest::new(samples(&[(1.0, 1.0), (2.0, 2.0)]), 10, 0);
        assert_eq!(request.validate(), Err(SmoothingError::InvalidDegree(0)));
    }

    #[test]
    fn fixed_degree_method_rejects_other_degree() {
        let request = SmoothingRequest::new(samples(&[(1.0, 1.0), (2.0, 2.0), (3.0, 1.0)]), 10, 3)
            .with_method(SmoothingMethod::ShapePreserving)
            .with_degree(2);
        assert_eq!(
            request.validate(),
            Err(SmoothingError::DegreeMismatch { method: "ShapePreserving", intrinsic: 3, requested: 2 })
        );
    }

    #[test]
    fn non_finite_sample_is_rejected() {
        let request = SmoothingRequest::new(samples(&[(1.0, 1.0), (2.0, f64::NAN)]), 10, 1);
        assert!(matches!(
            request.validate(),
            Err(SmoothingError::NonFiniteSample { index: 1, .. })
        ));
    }

    #[test]
    fn duplicate_x_is_non_monotonic() {
        let request = SmoothingRequest::new(samples(&[(1.0, 1.0), (2.0, 2.0), (2.0, 3.0)]), 10, 1);
        assert_eq!(
            request.validate(),
            Err(SmoothingError::NonMonotonicInput { index: 1, previous: 2.0, next: 2.0 })
        );
    }

    #[test]
    fn inverted_clamp_bounds_are_rejected() {
        let request = SmoothingRequest::new(samples(&[(1.0, 1.0), (2.0, 2.0)]), 10, 1)
            .with_clamp_bounds(Some(ClampBounds::new(5.0, 0.0)));
        assert_eq!(
            request.validate(),
            Err(SmoothingError::InvalidClampBounds { min: 5.0, max: 0.0 })
        );
    }
}
