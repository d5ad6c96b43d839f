use crate::{
    error::{HistogramError, Result},
    histogram::NumericHistogram,
    tie_break::TieBreaker,
};

impl<T: TieBreaker> NumericHistogram<T> {
    /// Estimates the value below which a fraction `q` of the observations fall.
    ///
    /// `q` must lie strictly between 0 and 1. The estimate interpolates linearly between
    /// the bins holding the two integer ranks surrounding `q * (count - 1)`.
    pub fn quantile(&self, q: f64) -> Result<f64> {
        if !(q > 0.0 && q < 1.0) {
            return Err(HistogramError::InvalidArgument(format!(
                "quantile {q} outside of (0, 1)"
            )));
        }
        if !self.is_ready() || self.bins.is_empty() {
            return Err(HistogramError::InvalidState(
                "quantile of an empty histogram".into(),
            ));
        }

        let n = self.total_weight().round() as i64 - 1;
        let target_rank = q * n as f64;
        let lower_rank = target_rank.floor() as i64;
        let higher_rank = target_rank.ceil() as i64;
        let last = self.bins.len() - 1;

        // the first bin whose cumulated count reaches lower_rank + 1 holds the lower rank
        let mut index = 0;
        let mut cumulated_count = 0_i64;
        while index < last {
            cumulated_count += self.bins[index].weight.round() as i64;
            if cumulated_count >= lower_rank + 1 {
                break;
            }
            index += 1;
        }
        let lower_position = self.bins[index].position;
        if higher_rank == lower_rank {
            return Ok(lower_position);
        }

        if index < last && cumulated_count < higher_rank + 1 {
            index += 1;
        }
        let higher_position = self.bins[index].position;
        if higher_position == lower_position {
            return Ok(lower_position);
        }

        Ok((higher_rank as f64 - target_rank) * lower_position
            + (target_rank - lower_rank as f64) * higher_position)
    }
}
