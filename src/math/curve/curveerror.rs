use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("{construction} needs at least {required} points, got {actual}")]
    InsufficientPoints {
        construction: &'static str,
        required: usize,
        actual: usize
    },
    #[error("{0}: linear system could not be solved")]
    SingularSystem(&'static str)
}
