use std::sync::Arc;

use approx_histogram::{Bin, CoinFlip, HistogramConfig, HistogramError, NumericHistogram, codec};
use datafusion::{
    arrow::array::{Array, ArrayRef, Float64Array, ListArray},
    error::DataFusionError,
    logical_expr::Accumulator,
    scalar::ScalarValue,
};

use super::histogram_udaf::{make_serialized_histogram_array, serialized_histogram};

pub fn histogram_error(e: HistogramError) -> DataFusionError {
    DataFusionError::External(Box::new(e))
}

/// An accumulator building an approximate histogram, or merging serialized ones.
#[derive(Debug)]
pub struct ApproxHistogramAccumulator {
    histogram: NumericHistogram,
    fallback_target_bin_count: usize,
}

impl ApproxHistogramAccumulator {
    pub fn new(
        target_bin_count: usize,
        config: &HistogramConfig,
    ) -> datafusion::error::Result<Self> {
        let mut histogram = NumericHistogram::with_tie_breaker(CoinFlip::new(config.seed));
        histogram
            .allocate(target_bin_count)
            .map_err(histogram_error)?;
        Ok(Self {
            histogram,
            fallback_target_bin_count: target_bin_count,
        })
    }

    /// takes its target bin count from the first non-empty histogram it merges,
    /// or from `config` when it merges none
    pub fn new_non_configured(config: &HistogramConfig) -> Self {
        Self {
            histogram: NumericHistogram::with_tie_breaker(CoinFlip::new(config.seed)),
            fallback_target_bin_count: config.target_bin_count,
        }
    }

    pub fn histogram(&self) -> &NumericHistogram {
        &self.histogram
    }

    pub fn update_batch_scalars(
        &mut self,
        scalars: &Float64Array,
    ) -> datafusion::error::Result<()> {
        if !self.histogram.is_ready() {
            return Err(DataFusionError::Execution(
                "can't record scalar in a non-configured histogram".into(),
            ));
        }
        for i in 0..scalars.len() {
            if !scalars.is_null(i) {
                self.histogram
                    .add(scalars.value(i))
                    .map_err(histogram_error)?;
            }
        }
        Ok(())
    }

    pub fn merge_histograms(&mut self, histograms: &ListArray) -> datafusion::error::Result<()> {
        for index_histo in 0..histograms.len() {
            if histograms.is_null(index_histo) {
                continue;
            }
            let serialized = serialized_histogram(histograms, index_histo)?;
            self.histogram
                .merge(&serialized)
                .map_err(histogram_error)?;
        }
        Ok(())
    }
}

impl Accumulator for ApproxHistogramAccumulator {
    fn update_batch(&mut self, values: &[ArrayRef]) -> datafusion::error::Result<()> {
        // we support two signatures
        // scalar case: [bin_counts, scalars_to_reduce]
        // merge case: [histograms]
        match values.len() {
            2 => {
                let scalars = values[1]
                    .as_any()
                    .downcast_ref::<Float64Array>()
                    .ok_or_else(|| {
                        DataFusionError::Execution("values[1] should be a Float64Array".into())
                    })?;
                self.update_batch_scalars(scalars)
            }
            1 => {
                let histograms = values[0]
                    .as_any()
                    .downcast_ref::<ListArray>()
                    .ok_or_else(|| {
                        DataFusionError::Execution("values[0] should be a ListArray".into())
                    })?;
                self.merge_histograms(histograms)
            }
            other => Err(DataFusionError::Execution(format!(
                "invalid arguments to ApproxHistogramAccumulator::update_batch, nb_values={other}"
            ))),
        }
    }

    fn evaluate(&mut self) -> datafusion::error::Result<ScalarValue> {
        let serialized = if self.histogram.is_ready() {
            self.histogram.serialize()
        } else {
            codec::encode(self.fallback_target_bin_count, &[])
        };
        Ok(ScalarValue::List(Arc::new(make_serialized_histogram_array(
            serialized,
        ))))
    }

    fn size(&self) -> usize {
        size_of_val(self) + self.histogram.used_bin_count() * size_of::<Bin>()
    }

    fn state(&mut self) -> datafusion::error::Result<Vec<ScalarValue>> {
        Ok(vec![self.evaluate()?])
    }

    fn merge_batch(&mut self, states: &[ArrayRef]) -> datafusion::error::Result<()> {
        for state in states {
            let histograms = state
                .as_any()
                .downcast_ref::<ListArray>()
                .ok_or_else(|| DataFusionError::Execution("downcasting to ListArray".into()))?;
            self.merge_histograms(histograms)?;
        }
        Ok(())
    }
}
