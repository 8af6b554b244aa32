//! Errors reported at the command boundary.

use thiserror::Error;

/// A rotation command rejected before any state was touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("invalid axis {0:?}, expected one of x, y, z")]
    InvalidAxis(char),
    #[error("invalid layer sign {0}, expected -1 or 1")]
    InvalidSign(i32),
    #[error("invalid direction {0}, expected -1 or 1")]
    InvalidDirection(i32),
}

/// A name that does not match any known move or easing curve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown move {0:?}")]
    UnknownMove(String),
    #[error("unknown easing {0:?}, expected linear, cubic or cosine")]
    UnknownEasing(String),
}
