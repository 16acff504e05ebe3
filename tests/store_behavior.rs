//! Behavior tests for the durable portfolio store.

use foliotrack_store::{PortfolioStore, StoreConfig};
use tempfile::TempDir;

#[test]
fn rows_survive_a_full_close_and_reopen() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("portfolio.duckdb");

    {
        let store = PortfolioStore::open(StoreConfig::new(&path)).expect("open");
        assert!(store.add("u1", "AAPL").expect("add"));
        assert!(store.add("u1", "MSFT").expect("add"));
    }

    // Reopening re-runs migrations; applied versions must be skipped and
    // data left intact.
    let store = PortfolioStore::open(StoreConfig::new(&path)).expect("reopen");
    let entries = store.list("u1").expect("list");
    let symbols: Vec<&str> = entries.iter().map(|e| e.symbol.as_str()).collect();
    assert_eq!(symbols, ["AAPL", "MSFT"]);
}

#[test]
fn hostile_input_is_data_not_sql() {
    let dir = TempDir::new().expect("tempdir");
    let store = PortfolioStore::open(StoreConfig::new(dir.path().join("portfolio.duckdb")))
        .expect("open");

    let hostile = "AAPL'; DROP TABLE portfolio; --";
    assert!(store.add("u1", hostile).expect("add"));

    // The table still exists and holds the literal string.
    let entries = store.list("u1").expect("list");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].symbol, hostile);

    assert!(store.remove("u1", hostile).expect("remove"));
    assert!(store.list("u1").expect("list").is_empty());
}

#[test]
fn clones_share_one_database() {
    let dir = TempDir::new().expect("tempdir");
    let store = PortfolioStore::open(StoreConfig::new(dir.path().join("portfolio.duckdb")))
        .expect("open");
    let other = store.clone();

    assert!(store.add("u1", "AAPL").expect("add"));
    let entries = other.list("u1").expect("list");
    assert_eq!(entries[0].symbol, "AAPL");
}

#[test]
fn users_are_fully_isolated() {
    let dir = TempDir::new().expect("tempdir");
    let store = PortfolioStore::open(StoreConfig::new(dir.path().join("portfolio.duckdb")))
        .expect("open");

    store.add("u1", "AAPL").expect("add");
    store.add("u2", "AAPL").expect("add");
    store.remove("u1", "AAPL").expect("remove");

    assert!(store.list("u1").expect("list").is_empty());
    assert_eq!(store.list("u2").expect("list").len(), 1);
}
