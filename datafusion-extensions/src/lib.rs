//! DataFusion functions over approximate histograms.
//!
//! Histograms travel between partial and final aggregation stages in their serialized
//! form, a `List<Float64>` column:
//!
//! ```sql
//! SELECT quantile_from_approx_histogram(approx_histogram(100, duration), 0.99) AS p99
//! FROM spans
//! ```

use approx_histogram::HistogramConfig;
use datafusion::prelude::SessionContext;

/// Count of values summarized by a histogram
pub mod accessors;
/// Accumulation of values and serialized histograms
pub mod accumulator;
/// Aggregate functions producing histograms
pub mod histogram_udaf;
/// Estimate quantiles based on a histogram
pub mod quantile;

/// Registers `approx_histogram`, `sum_approx_histograms`, `quantile_from_approx_histogram`
/// and `count_from_approx_histogram`.
pub fn register_approx_histogram_functions(ctx: &SessionContext, config: &HistogramConfig) {
    log::debug!("registering approx histogram functions with {config:?}");
    ctx.register_udaf(histogram_udaf::make_approx_histogram_udaf(config.clone()));
    ctx.register_udaf(histogram_udaf::make_sum_approx_histograms_udaf(
        config.clone(),
    ));
    ctx.register_udf(quantile::make_quantile_from_approx_histogram_udf());
    ctx.register_udf(accessors::make_count_from_approx_histogram_udf());
}
