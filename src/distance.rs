//! Point-distance kernels between individual samples.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The provided name does not match any distance kind.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown distance kind: {0}")]
pub struct UnknownDistance(String);

/// Point-distance used inside the DTW recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    /// `sqrt((a-b)^2)` elementwise.
    Euclidean,
    /// `|a-b|` elementwise.
    Manhattan,
}

impl Distance {
    /// Distance between two samples.
    pub fn point(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Euclidean => ((a - b) * (a - b)).sqrt(),
            Self::Manhattan => (a - b).abs(),
        }
    }

    /// Row-major point-distance matrix between `xs` and `ys`.
    ///
    /// Entry `i * ys.len() + j` holds the distance between `xs[i]` and
    /// `ys[j]`.
    pub fn matrix(self, xs: &[f64], ys: &[f64]) -> Vec<f64> {
        xs.iter()
            .flat_map(|&x| ys.iter().map(move |&y| self.point(x, y)))
            .collect()
    }
}

impl FromStr for Distance {
    type Err = UnknownDistance;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "euclidean" => Ok(Self::Euclidean),
            "manhattan" => Ok(Self::Manhattan),
            _ => Err(UnknownDistance(s.to_string())),
        }
    }
}
