//! Approximate histogram for quantile estimation over large or partitioned numeric columns.
//!
//! Memory is bounded by a target bin count: bins are (position, weight) pairs kept sorted,
//! and whenever there are too many of them the closest neighbors are merged into their
//! weighted average. Independent histograms built over separate partitions are combined
//! by shipping the flat state returned by [`NumericHistogram::serialize`] to
//! [`NumericHistogram::merge`].
//!
//! The heuristic is adapted from Ben-Haim & Tom-Tov, "A streaming parallel decision tree
//! algorithm", JMLR 11 (2010). It comes with no approximation guarantee but behaves well
//! with a few dozen bins or more.
//!
//! ```
//! use approx_histogram::NumericHistogram;
//!
//! let mut histogram = NumericHistogram::new();
//! histogram.allocate(3).unwrap();
//! for value in [1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0] {
//!     histogram.add(value).unwrap();
//! }
//! assert_eq!(histogram.used_bin_count(), 3);
//!
//! let mut combined = NumericHistogram::new();
//! combined.merge(&histogram.serialize()).unwrap();
//! assert_eq!(combined.quantile(0.5).unwrap(), histogram.quantile(0.5).unwrap());
//! ```

/// Histogram bin and the weighted merge of two bins
pub mod bin;
/// Flat numeric encoding of the histogram state
pub mod codec;
/// Settings for histograms created by aggregation hosts
pub mod config;
pub mod error;
/// The histogram, its lifecycle and insertion
pub mod histogram;
/// Combination of serialized partial states
pub mod merge;
/// Rank interpolation over the bins
pub mod quantile;
/// Strategies for gaps that fall exactly on the trim cutoff
pub mod tie_break;
/// Bounding the number of bins
pub mod trim;

pub use bin::Bin;
pub use config::HistogramConfig;
pub use error::{HistogramError, Result};
pub use histogram::NumericHistogram;
pub use tie_break::{CoinFlip, TieBreaker};
