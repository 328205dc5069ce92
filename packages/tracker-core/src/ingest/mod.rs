//! Ingestion module.
//!
//! Provides the raw table model, typed column schemas, and the
//! normalizer that coerces declared numeric/date columns.

mod normalize;
mod schema;
mod table;

pub use normalize::{normalize_holdings, normalize_transactions, NormalizedTransactions};
pub use schema::{
    missing_columns, parse_date, parse_decimal, ColumnKind, ColumnSpec, HOLDINGS_SCHEMA,
    TRANSACTIONS_SCHEMA,
};
pub use table::Table;
