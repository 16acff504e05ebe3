//! Market-overview endpoint.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::insights::spot_for;
use crate::state::AppState;

/// Headline indexes rendered on the dashboard, in display order.
const INDEXES: [(&str, &str); 8] = [
    ("S&P 500", "SPX"),
    ("NASDAQ", "IXIC"),
    ("DOW JONES", "DJI"),
    ("RUSSELL 2000", "RUT"),
    ("NYSE COMPOSITE", "NYA"),
    ("FTSE 100", "UKX"),
    ("DAX", "DAX"),
    ("NIKKEI 225", "N225"),
];

/// `GET /api/market-overview`
///
/// One row per index. A failed lookup renders "N/A" fields rather than
/// dropping the row, so the dashboard layout stays stable.
pub async fn market_overview(State(state): State<AppState>) -> Json<Value> {
    let mut rows = Vec::with_capacity(INDEXES.len());
    for (name, ticker) in INDEXES {
        let row = match spot_for(&state, ticker).await {
            Ok(quote) => {
                let change = quote.change_percent;
                json!({
                    "name": name,
                    "price": format!("${:.2}", quote.price),
                    "change": change
                        .map_or_else(|| String::from("N/A"), |c| format!("{c:.2}%")),
                    "positive": change.map(|c| c > 0.0),
                })
            }
            Err(error) => {
                tracing::warn!(index = name, ticker, %error, "index lookup failed");
                json!({
                    "name": name,
                    "price": "N/A",
                    "change": "N/A",
                    "positive": Value::Null,
                })
            }
        };
        rows.push(row);
    }
    Json(Value::Array(rows))
}
