use thiserror::Error;

use crate::math::curve::curveerror::CurveError;
use crate::math::extremum::ExtremumError;

/// 所有錯誤皆為呼叫端輸入違反約定，於計算前檢出，不回傳部分結果。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SmoothingError {
    #[error("need at least {required} samples for degree {degree}, got {actual}")]
    InsufficientSamples {
        required: usize,
        actual: usize,
        degree: usize
    },
    #[error("sample x values must be strictly increasing: x[{index}] = {previous} is followed by {next}")]
    NonMonotonicInput {
        index: usize,
        previous: f64,
        next: f64
    },
    #[error("resolution must be positive, got {0}")]
    InvalidResolution(usize),
    #[error("degree must be at least 1, got {0}")]
    InvalidDegree(usize),
    #[error("{method} is fixed at degree {intrinsic}, requested degree {requested}")]
    DegreeMismatch {
        method: &'static str,
        intrinsic: usize,
        requested: usize
    },
    #[error("sample {index} is not finite: ({x}, {y})")]
    NonFiniteSample {
        index: usize,
        x: f64,
        y: f64
    },
    #[error("invalid clamp bounds [{min}, {max}]")]
    InvalidClampBounds {
        min: f64,
        max: f64
    },
    #[error("x = {x} lies outside the sample range [{min}, {max}]")]
    OutOfDomain {
        x: f64,
        min: f64,
        max: f64
    },
    #[error(transparent)]
    Curve(#[from] CurveError),
    #[error(transparent)]
    Extremum(#[from] ExtremumError)
}
