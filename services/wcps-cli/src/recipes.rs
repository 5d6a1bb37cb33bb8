//! Canned analyses over the `AvgLandTemp` style temperature coverages.

use wcps_query::{
    AggregationOp, AnsiDate, AxisValue, ComparisonOp, EncodingFormat, QueryBuilder, Subset,
    WcpsResult,
};

/// Location the threshold analysis is run for (Bremen).
pub const THRESHOLD_LOCATION: (f64, f64) = (53.08, 8.80);
pub const THRESHOLD_PERIOD: (&str, &str) = ("2014-01", "2014-12");
pub const SUMMER_PERIOD: (&str, &str) = ("2014-06", "2014-08");

/// A populated builder and the encoding it should be executed with.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub query: QueryBuilder,
    pub encoding: Option<EncodingFormat>,
}

/// Number of months in 2014 above `threshold` at [`THRESHOLD_LOCATION`].
pub fn temperature_above_threshold(mut query: QueryBuilder, threshold: f64) -> WcpsResult<Recipe> {
    let (lat, long) = THRESHOLD_LOCATION;
    let (start, end) = THRESHOLD_PERIOD;
    query
        .subset(Subset::new().lat(lat).long(long).dates(start, end))?
        .compare(ComparisonOp::Gt, threshold)?
        .aggregate(AggregationOp::Count);

    Ok(Recipe {
        query,
        encoding: None,
    })
}

/// Mean temperature over the whole coverage for summer 2014.
pub fn mean_summer_temperature(mut query: QueryBuilder) -> WcpsResult<Recipe> {
    let (start, end) = SUMMER_PERIOD;
    query
        .subset(Subset::new().dates(start, end))?
        .aggregate(AggregationOp::Avg);

    Ok(Recipe {
        query,
        encoding: None,
    })
}

/// Values at one location over a date range, as CSV.
pub fn time_series(
    mut query: QueryBuilder,
    lat: f64,
    long: f64,
    period: (impl Into<AnsiDate>, impl Into<AnsiDate>),
) -> WcpsResult<Recipe> {
    query.subset(
        Subset::new()
            .lat(lat)
            .long(long)
            .dates(period.0, period.1),
    )?;

    Ok(Recipe {
        query,
        encoding: Some(EncodingFormat::Csv),
    })
}

/// Slice at one location and instant. Executed without an encoding so the
/// caller receives the raw payload.
pub fn spatial_point(
    mut query: QueryBuilder,
    lat: impl Into<AxisValue>,
    long: impl Into<AxisValue>,
    date: impl Into<AnsiDate>,
) -> WcpsResult<Recipe> {
    query.subset(Subset::new().lat(lat).long(long).start_date(date))?;

    Ok(Recipe {
        query,
        encoding: None,
    })
}
