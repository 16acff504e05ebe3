//! Trend prediction: ordinary least squares over a normalized price series.
//!
//! The model is deliberately naive: one straight line fitted over every
//! historical point, no windowing, no weighting, no outlier rejection.
//! Epoch seconds are the sole independent variable, so all arithmetic runs
//! in f64 and the slope uses mean-centered sums: at epoch-second magnitudes
//! (~1.7e9) a textbook `sum(xy) - n*mx*my` formulation loses the sub-cent
//! price deltas the fit depends on.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

use crate::{round_price, Forecast, ForecastPoint, MarketError, PriceSeries};

/// Horizon used when a request does not specify one.
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Minimum number of points required for a fit.
pub const MIN_FIT_POINTS: usize = 2;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Fitted line: price = slope * epoch_secs + intercept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearModel {
    /// Evaluate the fitted line at an instant.
    pub fn predict(&self, epoch_secs: i64) -> f64 {
        self.slope * epoch_secs as f64 + self.intercept
    }
}

/// Fit an ordinary least-squares line over the whole series.
///
/// # Errors
///
/// [`MarketError::InsufficientData`] when the series has fewer than
/// [`MIN_FIT_POINTS`] points.
pub fn fit(series: &PriceSeries) -> Result<LinearModel, MarketError> {
    let n = series.len();
    if n < MIN_FIT_POINTS {
        return Err(MarketError::InsufficientData {
            ticker: series.symbol.to_string(),
            points: n,
            min: MIN_FIT_POINTS,
        });
    }

    let count = n as f64;
    let mean_x = series
        .points
        .iter()
        .map(|p| p.epoch_secs as f64)
        .sum::<f64>()
        / count;
    let mean_y = series.points.iter().map(|p| p.close).sum::<f64>() / count;

    let mut sxx = 0.0_f64;
    let mut sxy = 0.0_f64;
    for point in &series.points {
        let dx = point.epoch_secs as f64 - mean_x;
        let dy = point.close - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
    }

    // Zero x-variance (every row shares one timestamp): fall back to the
    // mean close rather than dividing by zero.
    if sxx == 0.0 {
        return Ok(LinearModel {
            slope: 0.0,
            intercept: mean_y,
        });
    }

    let slope = sxy / sxx;
    Ok(LinearModel {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Forecast `days` future prices from the current wall clock.
pub fn forecast(series: &PriceSeries, days: u32) -> Result<Forecast, MarketError> {
    forecast_at(series, days, OffsetDateTime::now_utc())
}

/// Forecast `days` future prices anchored at an explicit `now`.
///
/// Targets are `now + i days` for i = 1..=days, anchored at the wall clock
/// rather than the series' last timestamp, and cover every calendar day
/// including weekends. Prices
/// are rounded to 2 decimals; dates are formatted `YYYY-MM-DD`.
pub fn forecast_at(
    series: &PriceSeries,
    days: u32,
    now: OffsetDateTime,
) -> Result<Forecast, MarketError> {
    // The horizon is a positive integer; an empty forecast is never a
    // meaningful answer.
    if days == 0 {
        return Err(MarketError::Parse {
            field: "days",
            value: days.to_string(),
        });
    }

    let model = fit(series)?;

    let mut predictions = Vec::with_capacity(days as usize);
    for i in 1..=i64::from(days) {
        let target = now + Duration::days(i);
        let date = target
            .date()
            .format(DATE_FORMAT)
            .map_err(|_| MarketError::Parse {
                field: "date",
                value: target.date().to_string(),
            })?;
        predictions.push(ForecastPoint {
            date,
            predicted_price: round_price(model.predict(target.unix_timestamp())),
        });
    }

    Ok(Forecast {
        ticker: series.symbol.clone(),
        predictions,
    })
}
