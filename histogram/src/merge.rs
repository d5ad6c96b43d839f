use crate::{
    bin::Bin,
    codec::SerializedHistogram,
    error::{HistogramError, Result},
    histogram::NumericHistogram,
    tie_break::TieBreaker,
};

impl<T: TieBreaker> NumericHistogram<T> {
    /// Combines a state produced by `serialize` into this histogram.
    ///
    /// An empty slice is a no-op. A histogram without bins adopts the incoming bins and
    /// target bin count verbatim; otherwise both bin sets are interleaved and, once they reach
    /// this histogram's own target, trimmed back toward it.
    pub fn merge(&mut self, serialized: &[f64]) -> Result<()> {
        if serialized.is_empty() {
            return Ok(());
        }
        let incoming = SerializedHistogram::decode(serialized)?;

        if self.bins.is_empty() {
            return self.adopt(incoming);
        }
        if incoming.bins.is_empty() {
            return Ok(());
        }

        let mut combined: Vec<Bin> = Vec::with_capacity(self.bins.len() + incoming.bins.len());
        combined.extend_from_slice(&self.bins);
        combined.extend(incoming.bins);
        combined.sort_by(|a, b| a.position.total_cmp(&b.position));

        // shared positions count as zero gaps when picking the cutoff
        self.bins = combined;
        if self.bins.len() >= self.target_bin_count {
            self.trim();
        }
        collapse_equal_positions(&mut self.bins);
        Ok(())
    }

    fn adopt(&mut self, incoming: SerializedHistogram) -> Result<()> {
        if incoming.bins.is_empty() {
            if !self.is_ready() && incoming.target_bin_count != 0 {
                self.target_bin_count = incoming.target_bin_count;
            }
            return Ok(());
        }
        if incoming.target_bin_count == 0 {
            return Err(HistogramError::MalformedInput(format!(
                "{} bins under a target bin count of 0",
                incoming.bins.len()
            )));
        }
        log::trace!(
            "adopting serialized histogram with {} bins (target {})",
            incoming.bins.len(),
            incoming.target_bin_count
        );
        self.target_bin_count = incoming.target_bin_count;
        self.bins = incoming.bins;
        Ok(())
    }
}

/// Sums the weights of adjacent bins sharing a position.
fn collapse_equal_positions(bins: &mut Vec<Bin>) {
    bins.dedup_by(|next, kept| {
        if next.position == kept.position {
            kept.weight += next.weight;
            true
        } else {
            false
        }
    });
}
