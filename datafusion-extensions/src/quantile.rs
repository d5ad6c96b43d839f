use approx_histogram::NumericHistogram;
use datafusion::{
    arrow::{
        array::{Array, Float64Array, Float64Builder, ListArray},
        datatypes::DataType,
    },
    error::DataFusionError,
    logical_expr::{ColumnarValue, ScalarUDF, Volatility},
    prelude::*,
};
use std::sync::Arc;

use super::{
    accumulator::histogram_error,
    histogram_udaf::{approx_histogram_arrow_type, serialized_histogram},
};

/// Rebuilds the histogram at `index`, `None` when the row is null or holds no bins
pub fn histogram_at(
    histograms: &ListArray,
    index: usize,
) -> Result<Option<NumericHistogram>, DataFusionError> {
    if histograms.is_null(index) {
        return Ok(None);
    }
    let mut histogram = NumericHistogram::new();
    histogram
        .merge(&serialized_histogram(histograms, index)?)
        .map_err(histogram_error)?;
    if histogram.used_bin_count() == 0 {
        return Ok(None);
    }
    Ok(Some(histogram))
}

fn quantile_from_approx_histogram(
    values: &[ColumnarValue],
) -> Result<ColumnarValue, DataFusionError> {
    if values.len() != 2 {
        return Err(DataFusionError::Execution(
            "wrong number of arguments to quantile_from_approx_histogram".into(),
        ));
    }

    let arrays = ColumnarValue::values_to_arrays(values)?;
    let histograms = arrays[0]
        .as_any()
        .downcast_ref::<ListArray>()
        .ok_or_else(|| DataFusionError::Execution("downcasting to ListArray".into()))?;
    let ratios = arrays[1]
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| DataFusionError::Execution("downcasting to Float64Array".into()))?;

    let mut result_builder = Float64Builder::with_capacity(histograms.len());
    for index_histo in 0..histograms.len() {
        if ratios.is_null(index_histo) {
            result_builder.append_null();
            continue;
        }
        match histogram_at(histograms, index_histo)? {
            Some(histogram) => result_builder.append_value(
                histogram
                    .quantile(ratios.value(index_histo))
                    .map_err(histogram_error)?,
            ),
            None => result_builder.append_null(),
        }
    }

    Ok(ColumnarValue::Array(Arc::new(result_builder.finish())))
}

pub fn make_quantile_from_approx_histogram_udf() -> ScalarUDF {
    create_udf(
        "quantile_from_approx_histogram",
        vec![approx_histogram_arrow_type(), DataType::Float64],
        DataType::Float64,
        Volatility::Immutable,
        Arc::new(&quantile_from_approx_histogram),
    )
}
