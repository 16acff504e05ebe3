//! # Foliotrack Store
//!
//! DuckDB-backed durable storage for watchlist portfolios.
//!
//! ## Overview
//!
//! The store persists which tickers each user tracks. It stores no
//! quantities and no prices; those belong to the simulated ledger and the
//! market-data layer. All user input reaches SQL through parameterized
//! queries.
//!
//! ## Tables
//!
//! | Table | Description |
//! |-------|-------------|
//! | `portfolio` | Tracked tickers per user, keyed by (user_id, symbol) |
//! | `schema_migrations` | Applied migration versions |

pub mod duckdb;
pub mod migrations;

use std::fs;
use std::path::{Path, PathBuf};

use ::duckdb::params;
use serde::Serialize;
use thiserror::Error;

pub use duckdb::{DuckDbConnectionManager, PooledConnection};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `DuckDB` database error.
    #[error(transparent)]
    DuckDb(#[from] ::duckdb::Error),

    /// I/O error (file system operations).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Configuration for the portfolio database.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the `DuckDB` database file.
    pub db_path: PathBuf,
    /// Maximum number of connections in the pool.
    pub max_pool_size: usize,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            max_pool_size: 4,
        }
    }
}

/// One tracked ticker row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioEntry {
    pub user_id: String,
    pub symbol: String,
    pub is_simulated: bool,
}

/// Durable watchlist-portfolio store.
#[derive(Clone)]
pub struct PortfolioStore {
    manager: DuckDbConnectionManager,
}

impl PortfolioStore {
    /// Open (or create) the store at the configured path and apply pending
    /// migrations.
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created, the
    /// database cannot be opened, or a migration fails.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let manager = DuckDbConnectionManager::new(config.db_path.clone(), config.max_pool_size);
        let store = Self { manager };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<(), StoreError> {
        let connection = self.manager.acquire()?;
        migrations::apply_migrations(&connection)?;
        Ok(())
    }

    pub fn db_path(&self) -> &Path {
        self.manager.db_path()
    }

    /// Track a ticker for a user. Returns `false` when the ticker is
    /// already tracked; the existing row is left untouched.
    ///
    /// # Errors
    /// Returns an error on database failure.
    pub fn add(&self, user_id: &str, symbol: &str) -> Result<bool, StoreError> {
        let connection = self.manager.acquire()?;

        let existing: i64 = connection.query_row(
            "SELECT COUNT(*) FROM portfolio WHERE user_id = ? AND symbol = ?",
            params![user_id, symbol],
            |row| row.get(0),
        )?;
        if existing > 0 {
            return Ok(false);
        }

        connection.execute(
            "INSERT INTO portfolio (user_id, symbol, is_simulated) VALUES (?, ?, FALSE)",
            params![user_id, symbol],
        )?;
        Ok(true)
    }

    /// Stop tracking a ticker. Returns `false` when no row matched.
    ///
    /// # Errors
    /// Returns an error on database failure.
    pub fn remove(&self, user_id: &str, symbol: &str) -> Result<bool, StoreError> {
        let connection = self.manager.acquire()?;
        let deleted = connection.execute(
            "DELETE FROM portfolio WHERE user_id = ? AND symbol = ?",
            params![user_id, symbol],
        )?;
        Ok(deleted > 0)
    }

    /// Tracked tickers for a user, alphabetically ordered.
    ///
    /// # Errors
    /// Returns an error on database failure.
    pub fn list(&self, user_id: &str) -> Result<Vec<PortfolioEntry>, StoreError> {
        let connection = self.manager.acquire()?;
        let mut statement = connection.prepare(
            "SELECT user_id, symbol, is_simulated FROM portfolio \
             WHERE user_id = ? AND is_simulated = FALSE ORDER BY symbol",
        )?;

        let rows = statement.query_map(params![user_id], |row| {
            Ok(PortfolioEntry {
                user_id: row.get(0)?,
                symbol: row.get(1)?,
                is_simulated: row.get(2)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}
