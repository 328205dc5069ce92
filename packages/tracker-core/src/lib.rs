//! Tracker Core - Portfolio valuation and P&L library.
//!
//! This crate turns two raw tabular inputs into portfolio metrics:
//!
//! - **Ingestion**: CSV tables with typed column schemas and fail-soft
//!   numeric/date coercion
//! - **Valuation**: per-holding current value, invested amount,
//!   unrealized/daily P&L and return percentage
//! - **Realized P&L**: sells matched against average buy price per symbol
//! - **Aggregation**: portfolio-level totals and overall return
//!
//! # Example
//!
//! ```rust
//! use tracker_core::ingest::Table;
//! use tracker_core::report::compute_report;
//!
//! let holdings = Table::from_csv_str(
//!     "Symbol,Quantity,Avg Buy Price,Last Traded Price,Prev Close Price\n\
//!      AAA,10,100,120,115\n",
//! ).unwrap();
//! let transactions = Table::from_csv_str(
//!     "Symbol,Type,Quantity,Price,Date\n\
//!      AAA,buy,10,100,2024-01-15\n",
//! ).unwrap();
//!
//! let report = compute_report(&holdings, &transactions).unwrap();
//! assert_eq!(report.summary.total_value, 1200.0);
//! ```

pub mod ingest;
pub mod portfolio;
pub mod report;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use types::{ApiResponse, Holding, RowIssue, TradeSide, Transaction};

// Re-export main functionality
pub use ingest::{normalize_holdings, normalize_transactions, NormalizedTransactions, Table};
pub use portfolio::{
    match_realized, summarize, value_holdings, PortfolioSummary, RealizedPnl, ValuedHolding,
};
pub use report::{compute_report, PortfolioReport};
pub use source::{ResponseCache, SheetClient, SheetSource, TrackerConfig};

/// Error types for tracker-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{table} table missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        table: &'static str,
        columns: Vec<String>,
    },
}

/// Result type for tracker-core operations.
pub type Result<T> = std::result::Result<T, Error>;
