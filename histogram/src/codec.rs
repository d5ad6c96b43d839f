//! Flat numeric encoding of a histogram, exchanged between workers as partial aggregation state
//!
//! ```text
//! [target_bin_count, position_0, weight_0, position_1, weight_1, ...]
//! ```

use crate::{
    bin::Bin,
    error::{HistogramError, Result},
};

pub fn encode(target_bin_count: usize, bins: &[Bin]) -> Vec<f64> {
    let mut encoded = Vec::with_capacity(1 + bins.len() * 2);
    encoded.push(target_bin_count as f64);
    for bin in bins {
        encoded.push(bin.position);
        encoded.push(bin.weight);
    }
    encoded
}

/// Largest target bin count accepted from a serialized state
pub const MAX_TARGET_BIN_COUNT: usize = u32::MAX as usize;

/// A decoded and validated serialized histogram
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedHistogram {
    pub target_bin_count: usize,
    pub bins: Vec<Bin>,
}

impl SerializedHistogram {
    pub fn decode(encoded: &[f64]) -> Result<Self> {
        let Some((&target, pairs)) = encoded.split_first() else {
            return Err(HistogramError::MalformedInput(
                "missing target bin count".into(),
            ));
        };
        if !target.is_finite() || target < 0.0 || target.round() > MAX_TARGET_BIN_COUNT as f64 {
            return Err(HistogramError::MalformedInput(format!(
                "bad target bin count {target}"
            )));
        }
        if pairs.len() % 2 != 0 {
            return Err(HistogramError::MalformedInput(format!(
                "odd number of values after the target bin count: {}",
                pairs.len()
            )));
        }

        let mut bins: Vec<Bin> = Vec::with_capacity(pairs.len() / 2);
        for pair in pairs.chunks_exact(2) {
            let bin = Bin::new(pair[0], pair[1]);
            if !bin.position.is_finite() {
                return Err(HistogramError::MalformedInput(format!(
                    "bin position {} is not finite",
                    bin.position
                )));
            }
            if !bin.weight.is_finite() || bin.weight <= 0.0 {
                return Err(HistogramError::MalformedInput(format!(
                    "bin weight {} is not a positive number",
                    bin.weight
                )));
            }
            if let Some(previous) = bins.last()
                && previous.position >= bin.position
            {
                return Err(HistogramError::MalformedInput(format!(
                    "bin positions not strictly ascending: {} then {}",
                    previous.position, bin.position
                )));
            }
            bins.push(bin);
        }

        Ok(Self {
            target_bin_count: target.round() as usize,
            bins,
        })
    }
}
