//! Streaming DTW distance between two series under bounded memory.
//!
//! The full DTW cost matrix between two streams grows without bound, but
//! extending it by new samples only ever needs its last row and column.
//! [`OnlineDtw`] therefore keeps, per series, a bounded window of recent
//! samples plus the boundary-cost vector along the current matrix edge, and
//! refreshes both from three sub-rectangles on every update:
//! (prior-X × new-Y), (new-X × prior-Y) and (new-X × new-Y).

use crate::distance::Distance;
use crate::window::Window;

/// Errors in measurer configuration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// A window capacity was zero.
    #[error("Window capacity must be positive")]
    WindowSize,
    /// The off-diagonal decay was outside `(0, 1]`.
    #[error("Weight must lie in (0, 1], got {0}")]
    Weight(f64),
    /// The effective memory length was not positive.
    #[error("Effective memory length must be positive, got {0}")]
    Memory(f64),
    /// The decay over one memory length was outside `(0, 1]`.
    #[error("Decay must lie in (0, 1], got {0}")]
    Decay(f64),
}

/// Errors in feeding new samples.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdateError {
    /// Both blocks were empty.
    #[error("Update requires at least one new sample")]
    Empty,
    /// The measurer is still empty and one series provided no samples, so
    /// the boundary vectors cannot be initialized.
    #[error("The first update must carry samples from both series")]
    MissingSeries,
}

/// Weight giving a total decay of `decay` spread over `memory` samples.
///
/// A cost contribution is multiplied by the weight once per off-diagonal or
/// diagonal step, so `weight = decay^(1 / memory)` shrinks it to `decay`
/// after `memory` steps.
///
/// Conditions:
/// - 0 < memory
/// - decay in (0, 1]
pub fn weight_for_memory(memory: f64, decay: f64) -> Result<f64, ConfigError> {
    if !(memory > 0.0) {
        return Err(ConfigError::Memory(memory));
    }
    if !(decay > 0.0 && decay <= 1.0) {
        return Err(ConfigError::Decay(decay));
    }
    Ok(decay.powf(1.0 / memory))
}

/// Streaming estimator of the DTW distance between two series.
///
/// The estimator is fed matched progress on both streams through
/// [`OnlineDtw::update_point`] or [`OnlineDtw::update_block`]; each call
/// returns the refreshed score, the minimum partial cumulative cost over the
/// current matrix boundary. Memory use is bounded by the two window
/// capacities regardless of how many samples have been consumed.
#[derive(Debug, Clone)]
pub struct OnlineDtw {
    weight: f64,
    distance: Distance,
    /// Window R over series X, with `dtw_R` alongside.
    x: Window,
    /// Window S over series Y, with `dtw_S` alongside.
    y: Window,
}

impl OnlineDtw {
    /// Create an empty measurer.
    ///
    /// Conditions:
    /// - weight in (0, 1]
    /// - 1 <= size_x, 1 <= size_y
    pub fn new(
        weight: f64,
        size_x: usize,
        size_y: usize,
        distance: Distance,
    ) -> Result<Self, ConfigError> {
        if size_x == 0 || size_y == 0 {
            return Err(ConfigError::WindowSize);
        }
        if !(weight > 0.0 && weight <= 1.0) {
            return Err(ConfigError::Weight(weight));
        }
        Ok(Self {
            weight,
            distance,
            x: Window::new(size_x),
            y: Window::new(size_y),
        })
    }

    /// Consume one new sample from each series and return the score.
    pub fn update_point(&mut self, x: f64, y: f64) -> f64 {
        self.update_block(&[x], &[y])
            .expect("a single sample on each side is always a valid update")
    }

    /// Consume one chunk of new samples from each series and return the
    /// score.
    ///
    /// The chunks may have different lengths, and once the measurer holds
    /// samples a chunk may be empty on one side; the other series then
    /// simply advances. Chunks larger than a window capacity are consumed
    /// whole and only their tail is retained.
    pub fn update_block(&mut self, xs: &[f64], ys: &[f64]) -> Result<f64, UpdateError> {
        if xs.is_empty() && ys.is_empty() {
            return Err(UpdateError::Empty);
        }
        if self.x.is_empty() && (xs.is_empty() || ys.is_empty()) {
            return Err(UpdateError::MissingSeries);
        }

        if self.x.is_empty() {
            self.init_state(xs, ys);
        } else {
            self.advance_state(xs, ys);
        }
        Ok(self.score())
    }

    /// Minimum partial cumulative cost over both boundary vectors.
    ///
    /// An empty measurer reports positive infinity (the minimum over an
    /// empty set).
    pub fn score(&self) -> f64 {
        self.x
            .costs()
            .iter()
            .chain(self.y.costs())
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    /// Forget all consumed samples, keeping the configuration.
    pub fn reset(&mut self) {
        self.x.clear();
        self.y.clear();
    }

    /// Off-diagonal decay.
    pub fn weight(&self) -> f64 {
        self.weight
    }
    /// Point-distance kernel.
    pub fn distance(&self) -> Distance {
        self.distance
    }
    /// Retained samples of series X.
    pub fn window_x(&self) -> &[f64] {
        self.x.samples()
    }
    /// Retained samples of series Y.
    pub fn window_y(&self) -> &[f64] {
        self.y.samples()
    }
    /// Absolute stream position of the first retained X sample.
    pub fn origin_x(&self) -> usize {
        self.x.origin()
    }
    /// Absolute stream position of the first retained Y sample.
    pub fn origin_y(&self) -> usize {
        self.y.origin()
    }
    /// Window capacity for series X.
    pub fn size_x(&self) -> usize {
        self.x.capacity()
    }
    /// Window capacity for series Y.
    pub fn size_y(&self) -> usize {
        self.y.capacity()
    }

    /// First update: a single rectangle anchored at the stream origins.
    fn init_state(&mut self, xs: &[f64], ys: &[f64]) {
        let cols = ys.len();
        let fresh = self.fill_rect(xs, ys, 0, 0, None, None, Some(0.0));

        let dtw_x = column(&fresh, cols, cols - 1);
        let dtw_y = fresh[(xs.len() - 1) * cols..].to_vec();
        self.x.extend(xs, dtw_x);
        self.y.extend(ys, dtw_y);
    }

    /// Later updates: compose the three new sub-rectangles onto the stored
    /// boundary vectors, then rotate the windows forward.
    fn advance_state(&mut self, xs: &[f64], ys: &[f64]) {
        let m = self.x.len();
        let n = self.y.len();
        let q = ys.len();
        let x_origin = self.x.origin();
        let y_origin = self.y.origin();
        let corner = self.x.last_cost();

        // prior-X × new-Y, extending dtw_R rightwards
        let right = (!ys.is_empty()).then(|| {
            self.fill_rect(
                self.x.samples(),
                ys,
                x_origin,
                y_origin + n,
                Some(self.x.costs()),
                None,
                None,
            )
        });
        // new-X × prior-Y, extending dtw_S downwards
        let below = (!xs.is_empty()).then(|| {
            self.fill_rect(
                xs,
                self.y.samples(),
                x_origin + m,
                y_origin,
                None,
                Some(self.y.costs()),
                None,
            )
        });
        // new-X × new-Y, closed by the stored last-corner cost
        let fresh = match (&below, &right) {
            (Some(below), Some(right)) => {
                let left_edge = column(below, n, n - 1);
                let top_edge = &right[(m - 1) * q..];
                Some(self.fill_rect(
                    xs,
                    ys,
                    x_origin + m,
                    y_origin + n,
                    Some(&left_edge),
                    Some(top_edge),
                    corner,
                ))
            }
            _ => None,
        };

        let mut dtw_x = match &right {
            Some(right) => column(right, q, q - 1),
            None => self.x.costs().to_vec(),
        };
        let mut dtw_y = match &below {
            Some(below) => below[(xs.len() - 1) * n..].to_vec(),
            None => self.y.costs().to_vec(),
        };
        if let Some(fresh) = &fresh {
            dtw_x.extend(column(fresh, q, q - 1));
            dtw_y.extend_from_slice(&fresh[(xs.len() - 1) * q..]);
        } else if let Some(below) = &below {
            dtw_x.extend(column(below, n, n - 1));
        } else if let Some(right) = &right {
            dtw_y.extend_from_slice(&right[(m - 1) * q..]);
        }

        self.x.extend(xs, dtw_x);
        self.y.extend(ys, dtw_y);
    }

    /// Cumulative costs over one rectangle of the implicit matrix.
    ///
    /// `left`, `top` and `corner` carry the stored boundary costs of the
    /// column, row and cell just before the rectangle; absent boundaries are
    /// unreachable, except that `corner` is 0 before the very first pair of
    /// samples. `x_origin` / `y_origin` are the absolute stream positions of
    /// `xs[0]` / `ys[0]`, which drive the directional weighting.
    fn fill_rect(
        &self,
        xs: &[f64],
        ys: &[f64],
        x_origin: usize,
        y_origin: usize,
        left: Option<&[f64]>,
        top: Option<&[f64]>,
        corner: Option<f64>,
    ) -> Vec<f64> {
        let cols = ys.len();
        let point = self.distance.matrix(xs, ys);
        let mut costs = vec![0.0; xs.len() * cols];

        for i in 0..xs.len() {
            let abs_x = x_origin + i;
            for j in 0..cols {
                let abs_y = y_origin + j;

                let diagonal = match (i, j) {
                    (0, 0) => corner.unwrap_or(f64::INFINITY),
                    (0, _) => top.map_or(f64::INFINITY, |top| top[j - 1]),
                    (_, 0) => left.map_or(f64::INFINITY, |left| left[i - 1]),
                    _ => costs[(i - 1) * cols + (j - 1)],
                };
                let above = if i == 0 {
                    top.map_or(f64::INFINITY, |top| top[j])
                } else {
                    costs[(i - 1) * cols + j]
                };
                let beside = if j == 0 {
                    left.map_or(f64::INFINITY, |left| left[i])
                } else {
                    costs[i * cols + (j - 1)]
                };

                // An off-diagonal move decays only while the series it
                // advances still lags the other one.
                let above = if abs_x <= abs_y { self.weight * above } else { above };
                let beside = if abs_y <= abs_x { self.weight * beside } else { beside };
                let diagonal = self.weight * diagonal;

                costs[i * cols + j] = point[i * cols + j] + diagonal.min(above).min(beside);
            }
        }

        costs
    }
}

/// One column of a row-major rectangle.
fn column(costs: &[f64], cols: usize, index: usize) -> Vec<f64> {
    costs.iter().skip(index).step_by(cols).copied().collect()
}
