//! Slice parameters: spatial axis filters plus the temporal `ansi` filter.
//!
//! Filters render in a fixed order: Lat, Long, any extra axes in insertion
//! order, then the date filter.

use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use wcps_common::{WcpsError, WcpsResult};

/// A point or closed range on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisValue {
    Point(f64),
    Range(f64, f64),
}

impl AxisValue {
    fn validate(&self, axis: &str) -> WcpsResult<()> {
        let finite = match self {
            AxisValue::Point(v) => v.is_finite(),
            AxisValue::Range(lo, hi) => lo.is_finite() && hi.is_finite(),
        };
        if finite {
            Ok(())
        } else {
            Err(WcpsError::InvalidArgument(format!(
                "{} value must be finite",
                axis
            )))
        }
    }
}

impl fmt::Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisValue::Point(v) => write!(f, "{}", v),
            AxisValue::Range(lo, hi) => write!(f, "{}:{}", lo, hi),
        }
    }
}

impl From<f64> for AxisValue {
    fn from(v: f64) -> Self {
        AxisValue::Point(v)
    }
}

impl From<i32> for AxisValue {
    fn from(v: i32) -> Self {
        AxisValue::Point(v.into())
    }
}

impl From<(f64, f64)> for AxisValue {
    fn from((lo, hi): (f64, f64)) -> Self {
        AxisValue::Range(lo, hi)
    }
}

impl From<(i32, i32)> for AxisValue {
    fn from((lo, hi): (i32, i32)) -> Self {
        AxisValue::Range(lo.into(), hi.into())
    }
}

/// A time position in the form the `ansi` axis accepts, e.g. `2014-07`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnsiDate(String);

impl AnsiDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(&self) -> WcpsResult<()> {
        if self.0.trim().is_empty() {
            return Err(WcpsError::InvalidArgument(
                "Date must not be empty".to_string(),
            ));
        }
        if self.0.contains('"') {
            return Err(WcpsError::InvalidArgument(format!(
                "Date must not contain quotes: {}",
                self.0
            )));
        }
        Ok(())
    }
}

impl fmt::Display for AnsiDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnsiDate {
    fn from(s: &str) -> Self {
        AnsiDate(s.to_string())
    }
}

impl From<String> for AnsiDate {
    fn from(s: String) -> Self {
        AnsiDate(s)
    }
}

impl From<NaiveDate> for AnsiDate {
    fn from(date: NaiveDate) -> Self {
        AnsiDate(date.format("%Y-%m-%d").to_string())
    }
}

impl From<DateTime<Utc>> for AnsiDate {
    fn from(dt: DateTime<Utc>) -> Self {
        AnsiDate(dt.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

/// Parameters of a slice operation.
///
/// A start date is mandatory; with an end date the temporal filter is the
/// closed range `[start, end]`, otherwise a single instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subset {
    pub lat: Option<AxisValue>,
    pub long: Option<AxisValue>,
    /// Additional axes, rendered after Lat/Long.
    pub axes: Vec<(String, AxisValue)>,
    pub start_date: Option<AnsiDate>,
    pub end_date: Option<AnsiDate>,
}

impl Subset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lat(mut self, value: impl Into<AxisValue>) -> Self {
        self.lat = Some(value.into());
        self
    }

    pub fn long(mut self, value: impl Into<AxisValue>) -> Self {
        self.long = Some(value.into());
        self
    }

    /// Add a filter on an arbitrary named axis, e.g. `E` or `ansi_month`.
    pub fn axis(mut self, name: impl Into<String>, value: impl Into<AxisValue>) -> Self {
        self.axes.push((name.into(), value.into()));
        self
    }

    pub fn start_date(mut self, date: impl Into<AnsiDate>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    pub fn end_date(mut self, date: impl Into<AnsiDate>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    /// Shorthand for a closed date range.
    pub fn dates(self, start: impl Into<AnsiDate>, end: impl Into<AnsiDate>) -> Self {
        self.start_date(start).end_date(end)
    }

    pub fn validate(&self) -> WcpsResult<()> {
        let start = self.start_date.as_ref().ok_or_else(|| {
            WcpsError::InvalidArgument("Start Date has to be specified!".to_string())
        })?;
        start.validate()?;
        if let Some(end) = &self.end_date {
            end.validate()?;
        }

        if let Some(lat) = &self.lat {
            lat.validate("Lat")?;
        }
        if let Some(long) = &self.long {
            long.validate("Long")?;
        }

        for (name, value) in &self.axes {
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(WcpsError::InvalidArgument(format!(
                    "Invalid axis name: '{}'",
                    name
                )));
            }
            if name.eq_ignore_ascii_case("lat") || name.eq_ignore_ascii_case("long") {
                return Err(WcpsError::InvalidArgument(format!(
                    "Axis {} must be set through lat/long",
                    name
                )));
            }
            value.validate(name)?;
        }

        Ok(())
    }

    /// Filter clauses in render order. Assumes `validate` passed.
    pub fn filters(&self) -> Vec<String> {
        let mut filters = Vec::with_capacity(3 + self.axes.len());

        if let Some(lat) = &self.lat {
            filters.push(format!("Lat({})", lat));
        }
        if let Some(long) = &self.long {
            filters.push(format!("Long({})", long));
        }
        for (name, value) in &self.axes {
            filters.push(format!("{}({})", name, value));
        }

        match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => filters.push(format!("ansi(\"{}\":\"{}\")", start, end)),
            (Some(start), None) => filters.push(format!("ansi(\"{}\")", start)),
            _ => {}
        }

        filters
    }
}
