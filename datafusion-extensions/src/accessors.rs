use super::{histogram_udaf::approx_histogram_arrow_type, quantile::histogram_at};
use datafusion::{
    arrow::{
        array::{Array, Float64Builder, ListArray},
        datatypes::DataType,
    },
    error::DataFusionError,
    logical_expr::{ColumnarValue, ScalarUDF, Volatility},
    prelude::*,
};
use std::sync::Arc;

fn count_from_approx_histogram(
    values: &[ColumnarValue],
) -> Result<ColumnarValue, DataFusionError> {
    if values.len() != 1 {
        return Err(DataFusionError::Execution(
            "wrong number of arguments to count_from_approx_histogram".into(),
        ));
    }

    let arrays = ColumnarValue::values_to_arrays(values)?;
    let histograms = arrays[0]
        .as_any()
        .downcast_ref::<ListArray>()
        .ok_or_else(|| DataFusionError::Execution("downcasting to ListArray".into()))?;
    let mut result_builder = Float64Builder::with_capacity(histograms.len());
    for index_histo in 0..histograms.len() {
        if histograms.is_null(index_histo) {
            result_builder.append_null();
            continue;
        }
        let count = histogram_at(histograms, index_histo)?
            .map(|histogram| histogram.total_weight())
            .unwrap_or(0.0);
        result_builder.append_value(count);
    }

    Ok(ColumnarValue::Array(Arc::new(result_builder.finish())))
}

pub fn make_count_from_approx_histogram_udf() -> ScalarUDF {
    create_udf(
        "count_from_approx_histogram",
        vec![approx_histogram_arrow_type()],
        DataType::Float64,
        Volatility::Immutable,
        Arc::new(&count_from_approx_histogram),
    )
}
