//! Core data types for the portfolio tracker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A holding row after normalization: one symbol with a positive quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holding {
    /// Ticker symbol, taken verbatim (trimmed) from the input table
    pub symbol: String,
    /// Number of units held
    pub quantity: f64,
    /// Average purchase price per unit
    pub avg_buy_price: f64,
    /// Most recent traded price per unit
    pub last_traded_price: f64,
    /// Previous session's closing price per unit
    pub prev_close_price: f64,
}

impl Holding {
    /// Create a new holding.
    pub fn new(
        symbol: &str,
        quantity: f64,
        avg_buy_price: f64,
        last_traded_price: f64,
        prev_close_price: f64,
    ) -> Self {
        Self {
            symbol: symbol.trim().to_string(),
            quantity,
            avg_buy_price,
            last_traded_price,
            prev_close_price,
        }
    }
}

/// Trade direction, parsed case-insensitively from the `Type` column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Parse a raw type cell. Returns `None` for anything other than
    /// "buy" or "sell" in any letter case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "buy" => Some(TradeSide::Buy),
            "sell" => Some(TradeSide::Sell),
            _ => None,
        }
    }
}

/// A transaction ledger row after normalization.
///
/// Cells that failed coercion are carried as `None` markers rather than
/// substituted with zero; the matcher excludes them instead of letting a
/// bad cell poison the running total. An unknown date never excludes the
/// row from matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Zero-based data row index in the source table (header not counted)
    pub row: usize,
    /// Ticker symbol, matched exact and case-sensitive against holdings
    pub symbol: String,
    /// Buy or sell; `None` if the type cell was unrecognized
    pub side: Option<TradeSide>,
    /// Units traded; `None` if unparsable
    pub quantity: Option<f64>,
    /// Price per unit; `None` if unparsable
    pub price: Option<f64>,
    /// Trade date; `None` if unparsable (explicit unknown marker)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// A non-fatal degradation surfaced to the caller.
///
/// Carries enough structure that tests can assert on skipped rows without
/// parsing warning strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowIssue {
    /// Zero-based data row index, or `None` for a table-level issue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    /// Human-readable description of what degraded
    pub reason: String,
}

impl RowIssue {
    /// Issue tied to a specific data row.
    pub fn at_row(row: usize, reason: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            reason: reason.into(),
        }
    }

    /// Issue affecting the whole table.
    pub fn table(reason: impl Into<String>) -> Self {
        Self {
            row: None,
            reason: reason.into(),
        }
    }
}

/// API response wrapper for CLI JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
