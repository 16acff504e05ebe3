//! Series normalization: raw provider rows to a model-ready price series.
//!
//! Raw history payloads are messy: instants may be epoch seconds, RFC3339
//! strings with arbitrary zone offsets, naive date-times, or bare calendar
//! dates, and a single payload may mix forms. Normalization coerces every
//! instant to naive UTC epoch seconds (converting through UTC when an offset
//! is present, floored to the whole second) and projects each row down to
//! exactly two fields so no provider-specific columns leak downstream.
//!
//! Rows are kept in source order (ascending) and duplicates are NOT removed.
//! An unparseable instant is fatal for the whole ticker rather than silently
//! dropped.

use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::{MarketError, PriceSeries, RawInstant, RawPricePoint, SeriesPoint, Symbol};

const NAIVE_DATETIME: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const NAIVE_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Normalize a raw historical payload for one ticker.
///
/// # Errors
///
/// [`MarketError::NoData`] when the payload has zero rows, and
/// [`MarketError::Parse`] when any instant cannot be interpreted.
pub fn normalize(symbol: Symbol, rows: Vec<RawPricePoint>) -> Result<PriceSeries, MarketError> {
    if rows.is_empty() {
        return Err(MarketError::NoData {
            ticker: symbol.to_string(),
        });
    }

    let mut points = Vec::with_capacity(rows.len());
    for row in rows {
        let epoch_secs = match &row.ts {
            RawInstant::Epoch(secs) => *secs,
            RawInstant::Text(text) => epoch_from_text(text)?,
        };
        points.push(SeriesPoint {
            epoch_secs,
            close: row.close,
        });
    }

    Ok(PriceSeries::new(symbol, points))
}

/// Interpret a textual instant as whole UTC epoch seconds.
///
/// Zone-aware instants are converted through UTC before the zone is dropped;
/// naive instants are read as UTC wall-clock. Sub-second precision is floored.
fn epoch_from_text(value: &str) -> Result<i64, MarketError> {
    let trimmed = value.trim();

    if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(parsed.to_offset(UtcOffset::UTC).unix_timestamp());
    }
    if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, NAIVE_DATETIME) {
        return Ok(parsed.assume_utc().unix_timestamp());
    }
    if let Ok(parsed) = Date::parse(trimmed, NAIVE_DATE) {
        return Ok(parsed.midnight().assume_utc().unix_timestamp());
    }

    Err(MarketError::Parse {
        field: "date",
        value: trimmed.to_owned(),
    })
}

/// Format epoch seconds as a `YYYY-MM-DD` calendar date.
pub fn epoch_date_string(epoch_secs: i64) -> Result<String, MarketError> {
    let instant =
        OffsetDateTime::from_unix_timestamp(epoch_secs).map_err(|_| MarketError::Parse {
            field: "epoch_secs",
            value: epoch_secs.to_string(),
        })?;
    instant
        .date()
        .format(NAIVE_DATE)
        .map_err(|_| MarketError::Parse {
            field: "epoch_secs",
            value: epoch_secs.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid symbol")
    }

    #[test]
    fn empty_payload_is_no_data() {
        let error = normalize(symbol("AAPL"), Vec::new()).expect_err("must fail");
        assert!(matches!(error, MarketError::NoData { .. }));
    }

    #[test]
    fn zone_aware_instants_convert_through_utc() {
        let rows = vec![RawPricePoint::text("2026-08-25T16:00:00-04:00", 231.5)];
        let series = normalize(symbol("AAPL"), rows).expect("must normalize");

        // 16:00 EDT is 20:00 UTC.
        let expected = OffsetDateTime::parse("2026-08-25T20:00:00Z", &Rfc3339)
            .expect("reference instant")
            .unix_timestamp();
        assert_eq!(series.points[0].epoch_secs, expected);
    }

    #[test]
    fn naive_and_bare_date_instants_are_read_as_utc() {
        let rows = vec![
            RawPricePoint::text("2026-08-24 00:00:00", 230.0),
            RawPricePoint::text("2026-08-25", 231.0),
        ];
        let series = normalize(symbol("MSFT"), rows).expect("must normalize");
        assert_eq!(series.points[1].epoch_secs - series.points[0].epoch_secs, 86_400);
    }

    #[test]
    fn fractional_seconds_floor_to_the_second() {
        let rows = vec![RawPricePoint::text("2026-08-25T14:30:00.750Z", 99.0)];
        let series = normalize(symbol("TSLA"), rows).expect("must normalize");
        assert_eq!(series.points[0].epoch_secs, {
            OffsetDateTime::parse("2026-08-25T14:30:00Z", &Rfc3339)
                .expect("reference instant")
                .unix_timestamp()
        });
    }

    #[test]
    fn unparseable_instant_fails_the_whole_ticker() {
        let rows = vec![
            RawPricePoint::text("2026-08-24", 230.0),
            RawPricePoint::text("yesterday-ish", 231.0),
        ];
        let error = normalize(symbol("AAPL"), rows).expect_err("must fail");
        assert!(matches!(error, MarketError::Parse { field: "date", .. }));
    }

    #[test]
    fn normalization_is_idempotent() {
        let rows = vec![
            RawPricePoint::text("2026-08-24T00:00:00Z", 230.0),
            RawPricePoint::text("2026-08-25T00:00:00Z", 231.0),
        ];
        let first = normalize(symbol("AAPL"), rows).expect("first pass");

        let reraw = first
            .points
            .iter()
            .map(|p| RawPricePoint::epoch(p.epoch_secs, p.close))
            .collect::<Vec<_>>();
        let second = normalize(first.symbol.clone(), reraw).expect("second pass");

        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_timestamps_are_preserved() {
        let rows = vec![
            RawPricePoint::epoch(1_700_000_000, 10.0),
            RawPricePoint::epoch(1_700_000_000, 10.5),
        ];
        let series = normalize(symbol("AAPL"), rows).expect("must normalize");
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn formats_epoch_as_calendar_date() {
        let epoch = OffsetDateTime::parse("2026-08-25T23:59:59Z", &Rfc3339)
            .expect("reference instant")
            .unix_timestamp();
        assert_eq!(epoch_date_string(epoch).expect("format"), "2026-08-25");
    }
}
