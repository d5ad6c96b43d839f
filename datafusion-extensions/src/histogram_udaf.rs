use anyhow::Context;
use approx_histogram::HistogramConfig;
use datafusion::{
    arrow::{
        array::{Float64Array, ListArray},
        datatypes::{DataType, Field, Float64Type},
    },
    error::DataFusionError,
    logical_expr::{
        Accumulator, AccumulatorFactoryFunction, AggregateUDF, Volatility,
        function::AccumulatorArgs,
    },
    physical_plan::expressions::Literal,
    prelude::*,
    scalar::ScalarValue,
};
use std::sync::Arc;

use super::accumulator::ApproxHistogramAccumulator;

/// Arrow type of a serialized histogram: `[target_bin_count, position_0, weight_0, ...]`
pub fn approx_histogram_arrow_type() -> DataType {
    DataType::List(Arc::new(Field::new("item", DataType::Float64, true)))
}

/// Single-row list array holding a serialized histogram
pub fn make_serialized_histogram_array(serialized: Vec<f64>) -> ListArray {
    ListArray::from_iter_primitive::<Float64Type, _, _>(vec![Some(
        serialized.into_iter().map(Some),
    )])
}

/// Serialized histogram at `index` in a column of histograms
pub fn serialized_histogram(
    histograms: &ListArray,
    index: usize,
) -> Result<Vec<f64>, DataFusionError> {
    let values = histograms.value(index);
    let values = values
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| DataFusionError::Execution("downcasting to Float64Array".into()))?;
    Ok(values.values().to_vec())
}

fn make_state(
    config: &HistogramConfig,
    args: AccumulatorArgs,
) -> Result<Box<dyn Accumulator>, DataFusionError> {
    let nb_bins_arg = args
        .exprs
        .first()
        .ok_or_else(|| DataFusionError::Execution("Reading first argument".into()))?
        .as_any()
        .downcast_ref::<Literal>()
        .ok_or_else(|| DataFusionError::Execution("Downcasting first argument to Literal".into()))?
        .value();
    let nb_bins = if let ScalarValue::Int64(Some(nb_bins_value)) = nb_bins_arg {
        nb_bins_value
    } else {
        return Err(DataFusionError::Execution(format!(
            "arg 0 should be a int64, found {nb_bins_arg:?}"
        )));
    };
    let nb_bins = usize::try_from(*nb_bins)
        .with_context(|| format!("invalid number of bins {nb_bins}"))
        .map_err(|e| DataFusionError::External(e.into()))?;

    Ok(Box::new(ApproxHistogramAccumulator::new(nb_bins, config)?))
}

fn make_empty_state(
    config: &HistogramConfig,
    _args: AccumulatorArgs,
) -> Result<Box<dyn Accumulator>, DataFusionError> {
    Ok(Box::new(ApproxHistogramAccumulator::new_non_configured(
        config,
    )))
}

/// Creates a user-defined aggregate function building approximate histograms.
///
/// `approx_histogram(nb_bins, value)` where `nb_bins` is a literal
pub fn make_approx_histogram_udaf(config: HistogramConfig) -> AggregateUDF {
    let factory: AccumulatorFactoryFunction =
        Arc::new(move |args: AccumulatorArgs<'_>| make_state(&config, args));
    create_udaf(
        "approx_histogram",
        vec![DataType::Int64, DataType::Float64],
        Arc::new(approx_histogram_arrow_type()),
        Volatility::Immutable,
        factory,
        Arc::new(vec![approx_histogram_arrow_type()]),
    )
}

/// Creates a user-defined aggregate function to merge a column of approximate histograms.
pub fn make_sum_approx_histograms_udaf(config: HistogramConfig) -> AggregateUDF {
    let factory: AccumulatorFactoryFunction =
        Arc::new(move |args: AccumulatorArgs<'_>| make_empty_state(&config, args));
    create_udaf(
        "sum_approx_histograms",
        vec![approx_histogram_arrow_type()],
        Arc::new(approx_histogram_arrow_type()),
        Volatility::Immutable,
        factory,
        Arc::new(vec![approx_histogram_arrow_type()]),
    )
}
