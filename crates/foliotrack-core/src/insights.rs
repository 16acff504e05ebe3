//! Portfolio insight computations: value history and sector allocation.
//!
//! Both walk the simulated holdings and consult the market-data client; both
//! are tolerant of per-symbol failures so one delisted ticker cannot blank
//! the whole chart.

use std::collections::HashMap;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Weekday};

use crate::market_data::{Lookback, MarketData};
use crate::{round_price, series, Lot, SectorSlice, ValueSnapshot};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Number of calendar days the value history covers, ending today.
pub const HISTORY_WINDOW_DAYS: i64 = 7;

/// Portfolio value per trading day over the last week.
///
/// Weekend dates are skipped (there is no close to price against), unlike
/// the forecast, which emits every calendar day. A holding with no price on
/// a given date contributes nothing to that day's total. Symbols whose
/// history fetch fails are skipped with a warning rather than failing the
/// whole report.
pub async fn value_history(
    market: &dyn MarketData,
    holdings: &[Lot],
    today: Date,
) -> Vec<ValueSnapshot> {
    if holdings.is_empty() {
        return Vec::new();
    }

    // (symbol, date) -> close
    let mut close_by_date: HashMap<(String, String), f64> = HashMap::new();
    for lot in holdings {
        let rows = match market.history(&lot.symbol, Lookback::SevenDays).await {
            Ok(rows) => rows,
            Err(error) => {
                tracing::warn!(symbol = %lot.symbol, %error, "skipping symbol in value history");
                continue;
            }
        };
        let normalized = match series::normalize(lot.symbol.clone(), rows) {
            Ok(series) => series,
            Err(error) => {
                tracing::warn!(symbol = %lot.symbol, %error, "skipping symbol in value history");
                continue;
            }
        };
        for point in &normalized.points {
            if let Ok(date) = series::epoch_date_string(point.epoch_secs) {
                close_by_date.insert((lot.symbol.to_string(), date), point.close);
            }
        }
    }

    let mut history = Vec::new();
    for offset in 0..HISTORY_WINDOW_DAYS {
        let date = today - Duration::days(HISTORY_WINDOW_DAYS - 1 - offset);
        if matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday) {
            continue;
        }
        let Ok(date_str) = date.format(DATE_FORMAT) else {
            continue;
        };

        let mut daily_value = 0.0_f64;
        for lot in holdings {
            if let Some(close) = close_by_date.get(&(lot.symbol.to_string(), date_str.clone())) {
                daily_value += close * f64::from(lot.quantity);
            }
        }
        history.push(ValueSnapshot {
            date: date_str,
            value: round_price(daily_value),
        });
    }

    history
}

/// Total held quantity per sector, alphabetically ordered. Sector lookup
/// failures fold into "Unknown".
pub async fn sector_allocation(market: &dyn MarketData, holdings: &[Lot]) -> Vec<SectorSlice> {
    let mut totals: HashMap<String, u64> = HashMap::new();
    for lot in holdings {
        let sector = match market.sector(&lot.symbol).await {
            Ok(sector) if !sector.trim().is_empty() => sector,
            Ok(_) => String::from("Unknown"),
            Err(error) => {
                tracing::warn!(symbol = %lot.symbol, %error, "sector lookup failed");
                String::from("Unknown")
            }
        };
        *totals.entry(sector).or_default() += u64::from(lot.quantity);
    }

    let mut slices = totals
        .into_iter()
        .map(|(sector, value)| SectorSlice { sector, value })
        .collect::<Vec<_>>();
    slices.sort_by(|a, b| a.sector.cmp(&b.sector));
    slices
}
