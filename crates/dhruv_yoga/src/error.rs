//! Error types for yoga analysis.

use std::error::Error;
use std::fmt::{Display, Formatter};

use dhruv_chart::ChartError;

/// Errors from the analysis entry points.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum YogaError {
    /// The chart failed validation.
    Chart(ChartError),
    /// Invalid configuration parameter.
    InvalidConfig(&'static str),
}

impl Display for YogaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chart(e) => write!(f, "chart error: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for YogaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Chart(e) => Some(e),
            Self::InvalidConfig(_) => None,
        }
    }
}

impl From<ChartError> for YogaError {
    fn from(e: ChartError) -> Self {
        Self::Chart(e)
    }
}
