//! Simulated portfolio ledger.
//!
//! Process-wide map from user id to held lots. All mutation goes through one
//! async write lock, so concurrent buys and sells for any user serialize
//! instead of racing. Nothing here is persisted; a restart starts everyone
//! from an empty book.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::{Lot, Symbol};

/// Failures from simulated trades. Each leaves the ledger unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("quantity must be greater than zero")]
    InvalidQuantity,

    #[error("position in {symbol} would exceed the maximum holdable quantity")]
    PositionOverflow { symbol: Symbol },

    #[error("no portfolio found for user {user_id}")]
    UnknownUser { user_id: String },

    #[error("{symbol} not found in portfolio")]
    NotHeld { symbol: Symbol },

    #[error("not enough shares of {symbol} to sell: held {held}, requested {requested}")]
    Oversell {
        symbol: Symbol,
        held: u32,
        requested: u32,
    },
}

/// In-memory simulated-portfolio engine. Cloning shares the underlying book.
#[derive(Debug, Clone, Default)]
pub struct SimLedger {
    inner: Arc<RwLock<HashMap<String, Vec<Lot>>>>,
}

impl SimLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current holdings for a user. Unknown users simply hold nothing.
    pub async fn holdings(&self, user_id: &str) -> Vec<Lot> {
        self.inner
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Buy `quantity` shares at `price`, merging into an existing lot via
    /// weighted-average cost. Returns the resulting lot.
    pub async fn buy(
        &self,
        user_id: &str,
        symbol: Symbol,
        price: f64,
        quantity: u32,
    ) -> Result<Lot, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }

        let mut book = self.inner.write().await;
        let lots = book.entry(user_id.to_owned()).or_default();

        if let Some(lot) = lots.iter_mut().find(|lot| lot.symbol == symbol) {
            let merged = lot
                .quantity
                .checked_add(quantity)
                .ok_or(LedgerError::PositionOverflow {
                    symbol: lot.symbol.clone(),
                })?;
            let total_cost = lot.average_price * f64::from(lot.quantity) + price * f64::from(quantity);
            lot.quantity = merged;
            lot.average_price = total_cost / f64::from(merged);
            return Ok(lot.clone());
        }

        let lot = Lot {
            symbol,
            quantity,
            average_price: price,
        };
        lots.push(lot.clone());
        Ok(lot)
    }

    /// Sell `quantity` shares. The lot is removed when it reaches zero;
    /// overselling is rejected with the held quantity untouched.
    pub async fn sell(
        &self,
        user_id: &str,
        symbol: &Symbol,
        quantity: u32,
    ) -> Result<(), LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }

        let mut book = self.inner.write().await;
        let lots = book.get_mut(user_id).ok_or_else(|| LedgerError::UnknownUser {
            user_id: user_id.to_owned(),
        })?;

        let index = lots
            .iter()
            .position(|lot| &lot.symbol == symbol)
            .ok_or_else(|| LedgerError::NotHeld {
                symbol: symbol.clone(),
            })?;

        let held = lots[index].quantity;
        if held < quantity {
            return Err(LedgerError::Oversell {
                symbol: symbol.clone(),
                held,
                requested: quantity,
            });
        }

        lots[index].quantity -= quantity;
        if lots[index].quantity == 0 {
            lots.remove(index);
        }
        Ok(())
    }

    /// Clear a user's simulated portfolio.
    pub async fn reset(&self, user_id: &str) {
        self.inner.write().await.insert(user_id.to_owned(), Vec::new());
    }
}
