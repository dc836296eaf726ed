//! On-line Dynamic Time Warping for streaming time series.
//!
//! [`OnlineDtw`] keeps a bounded window of the most recent samples of two
//! series together with the boundary vectors of the underlying DTW cost
//! matrix, so the similarity score can be refreshed in O(window) per sample
//! instead of recomputing the full matrix.
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use odtw::{Distance, OnlineDtw};
//!
//! let mut dtw = OnlineDtw::new(0.9, 16, 16, Distance::Manhattan)?;
//!
//! // Two identical streams stay at distance zero.
//! for t in 0..32 {
//!     let sample = (t as f64 * 0.1).sin();
//!     let score = dtw.update_point(sample, sample);
//!     assert_eq!(score, 0.0);
//! }
//!
//! // Samples may also arrive in chunks of different lengths.
//! let score = dtw.update_block(&[2.0, 3.0], &[-2.0])?;
//! assert!(score > 0.0);
//! # Ok(())
//! # }
//! ```

pub mod distance;
pub mod measurer;

mod window;

pub use distance::{Distance, UnknownDistance};
pub use measurer::{ConfigError, OnlineDtw, UpdateError, weight_for_memory};
