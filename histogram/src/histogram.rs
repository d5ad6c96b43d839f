use std::cmp::Ordering;

use crate::{
    bin::Bin,
    codec,
    config::HistogramConfig,
    error::{HistogramError, Result},
    tie_break::{CoinFlip, TieBreaker},
    trim::trim_bins,
};

/// Streaming approximate histogram with a bounded number of bins.
///
/// Created uninitialized; `allocate` or a first `merge` makes it ready. Bins are kept
/// strictly ascending by position and their weights always add up to the number of
/// observations added or merged in. The store grows up to twice the target bin count
/// before a trim brings it back down.
///
/// Not meant to be shared between threads: one instance per partition, combined
/// sequentially through `serialize` and `merge`.
#[derive(Debug, Clone)]
pub struct NumericHistogram<T: TieBreaker = CoinFlip> {
    pub(crate) target_bin_count: usize,
    pub(crate) bins: Vec<Bin>,
    pub(crate) tie_breaker: T,
}

impl NumericHistogram<CoinFlip> {
    pub fn new() -> Self {
        Self::with_tie_breaker(CoinFlip::default())
    }

    /// Allocated histogram sized and seeded from `config`
    pub fn from_config(config: &HistogramConfig) -> Result<Self> {
        let mut histogram = Self::with_tie_breaker(CoinFlip::new(config.seed));
        histogram.allocate(config.target_bin_count)?;
        Ok(histogram)
    }
}

impl Default for NumericHistogram<CoinFlip> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TieBreaker> NumericHistogram<T> {
    pub fn with_tie_breaker(tie_breaker: T) -> Self {
        Self {
            target_bin_count: 0,
            bins: Vec::new(),
            tie_breaker,
        }
    }

    /// Empties the histogram and sets the number of bins it converges to.
    pub fn allocate(&mut self, target_bin_count: usize) -> Result<()> {
        if target_bin_count == 0 {
            return Err(HistogramError::InvalidArgument(
                "target bin count must be at least 1".into(),
            ));
        }
        self.target_bin_count = target_bin_count;
        self.bins = Vec::new();
        Ok(())
    }

    /// Back to the uninitialized state; `allocate` or `merge` must be called again before use.
    pub fn reset(&mut self) {
        self.target_bin_count = 0;
        self.bins = Vec::new();
    }

    pub fn is_ready(&self) -> bool {
        self.target_bin_count != 0
    }

    pub fn target_bin_count(&self) -> usize {
        self.target_bin_count
    }

    pub fn max_bin_count(&self) -> usize {
        self.target_bin_count.saturating_mul(2)
    }

    pub fn used_bin_count(&self) -> usize {
        self.bins.len()
    }

    pub fn bin(&self, index: usize) -> Result<Bin> {
        self.bins
            .get(index)
            .copied()
            .ok_or(HistogramError::IndexOutOfRange {
                index,
                len: self.bins.len(),
            })
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn tie_breaker(&self) -> &T {
        &self.tie_breaker
    }

    pub fn total_weight(&self) -> f64 {
        self.bins.iter().map(|bin| bin.weight).sum()
    }

    /// Records one observation.
    ///
    /// A value equal to an existing bin position increments that bin, anything else
    /// gets a bin of its own and may trigger a trim.
    pub fn add(&mut self, value: f64) -> Result<()> {
        if !self.is_ready() {
            return Err(HistogramError::InvalidState(
                "add called before allocate or merge".into(),
            ));
        }
        if !value.is_finite() {
            return Err(HistogramError::InvalidArgument(format!(
                "can't add non-finite value {value}"
            )));
        }

        let search = self.bins.binary_search_by(|bin| {
            if bin.position < value {
                Ordering::Less
            } else if bin.position > value {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });
        match search {
            Ok(index) => self.bins[index].weight += 1.0,
            Err(index) => {
                self.bins.insert(index, Bin::new(value, 1.0));
                if self.bins.len() > self.max_bin_count() {
                    self.trim();
                }
            }
        }
        Ok(())
    }

    pub(crate) fn trim(&mut self) {
        let bins = std::mem::take(&mut self.bins);
        self.bins = trim_bins(bins, self.target_bin_count, &mut self.tie_breaker);
    }

    /// Flat `[target_bin_count, position_0, weight_0, ...]` state, consumed by `merge`
    pub fn serialize(&self) -> Vec<f64> {
        codec::encode(self.target_bin_count, &self.bins)
    }
}
