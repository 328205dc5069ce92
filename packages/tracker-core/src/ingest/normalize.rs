//! Ingestion normalizer: schema enforcement and fail-soft coercion.

use super::schema::{
    missing_columns, parse_date, parse_decimal, ColumnKind, ColumnSpec, HOLDINGS_SCHEMA,
    TRANSACTIONS_SCHEMA,
};
use super::table::Table;
use crate::types::{Holding, RowIssue, TradeSide, Transaction};
use crate::{Error, Result};
use chrono::NaiveDate;
use tracing::warn;

/// A cell coerced according to its declared column kind.
#[derive(Debug, Clone, PartialEq)]
enum CellValue {
    Text(String),
    Decimal(Option<f64>),
    Date(Option<NaiveDate>),
}

impl CellValue {
    fn text(self) -> String {
        match self {
            CellValue::Text(value) => value,
            _ => String::new(),
        }
    }

    fn decimal(self) -> Option<f64> {
        match self {
            CellValue::Decimal(value) => value,
            _ => None,
        }
    }

    fn date(self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(value) => value,
            _ => None,
        }
    }
}

/// Generic coercion routine driven by the declared schema.
fn coerce_cell(table: &Table, row: usize, spec: &ColumnSpec) -> CellValue {
    // Schema presence is checked before any row is coerced; an absent
    // column reads as a blank cell
    let raw = table
        .column_index(spec.name)
        .map(|col| table.cell(row, col))
        .unwrap_or("");

    match spec.kind {
        ColumnKind::Text => CellValue::Text(raw.trim().to_string()),
        ColumnKind::Decimal => CellValue::Decimal(parse_decimal(raw)),
        ColumnKind::Date => CellValue::Date(parse_date(raw)),
    }
}

fn coerce_named(table: &Table, row: usize, schema: &[ColumnSpec], name: &str) -> CellValue {
    schema
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| coerce_cell(table, row, spec))
        .unwrap_or(CellValue::Text(String::new()))
}

/// Normalize the raw holdings snapshot.
///
/// Fatal if any required column is missing (valuation cannot proceed).
/// Unparsable numeric cells coerce to 0 and rows with non-positive
/// quantity are dropped after coercion; both degradations are silent.
pub fn normalize_holdings(table: &Table) -> Result<Vec<Holding>> {
    let missing = missing_columns(table, HOLDINGS_SCHEMA);
    if !missing.is_empty() {
        return Err(Error::MissingColumns {
            table: "holdings",
            columns: missing,
        });
    }

    let mut holdings = Vec::new();
    for row in 0..table.row_count() {
        if table.row_is_blank(row) {
            continue;
        }

        let decimal_or_zero = |name: &str| {
            coerce_named(table, row, HOLDINGS_SCHEMA, name)
                .decimal()
                .unwrap_or(0.0)
        };

        let quantity = decimal_or_zero("Quantity");
        if quantity <= 0.0 {
            continue;
        }

        holdings.push(Holding {
            symbol: coerce_named(table, row, HOLDINGS_SCHEMA, "Symbol").text(),
            quantity,
            avg_buy_price: decimal_or_zero("Avg Buy Price"),
            last_traded_price: decimal_or_zero("Last Traded Price"),
            prev_close_price: decimal_or_zero("Prev Close Price"),
        });
    }

    Ok(holdings)
}

/// Result of normalizing the transaction ledger: best-effort rows plus
/// the degradations encountered along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTransactions {
    pub transactions: Vec<Transaction>,
    pub issues: Vec<RowIssue>,
}

/// Normalize the raw transaction ledger.
///
/// Never fails: a malformed ledger degrades realized P&L instead of
/// aborting valuation. Missing required columns yield an empty row set
/// with a table-level issue; unparsable cells become `None` markers with
/// a per-row issue.
pub fn normalize_transactions(table: &Table) -> NormalizedTransactions {
    let missing = missing_columns(table, TRANSACTIONS_SCHEMA);
    if !missing.is_empty() {
        let reason = format!("missing required columns: {}", missing.join(", "));
        warn!(table = "transactions", %reason, "ledger unusable, realized P&L degrades to 0");
        return NormalizedTransactions {
            transactions: Vec::new(),
            issues: vec![RowIssue::table(reason)],
        };
    }

    let mut transactions = Vec::new();
    let mut issues = Vec::new();

    for row in 0..table.row_count() {
        if table.row_is_blank(row) {
            continue;
        }

        let symbol = coerce_named(table, row, TRANSACTIONS_SCHEMA, "Symbol").text();

        let raw_type = coerce_named(table, row, TRANSACTIONS_SCHEMA, "Type").text();
        let side = TradeSide::parse(&raw_type);
        if side.is_none() {
            issues.push(RowIssue::at_row(
                row,
                format!("unrecognized trade type {:?}", raw_type),
            ));
        }

        let quantity = coerce_named(table, row, TRANSACTIONS_SCHEMA, "Quantity").decimal();
        if quantity.is_none() {
            issues.push(RowIssue::at_row(row, "unparsable quantity"));
        }

        let price = coerce_named(table, row, TRANSACTIONS_SCHEMA, "Price").decimal();
        if price.is_none() {
            issues.push(RowIssue::at_row(row, "unparsable price"));
        }

        // An unknown date is recorded but does not exclude the row
        let date = coerce_named(table, row, TRANSACTIONS_SCHEMA, "Date").date();
        if date.is_none() {
            issues.push(RowIssue::at_row(row, "unparsable date"));
        }

        transactions.push(Transaction {
            row,
            symbol,
            side,
            quantity,
            price,
            date,
        });
    }

    for issue in &issues {
        warn!(row = ?issue.row, reason = %issue.reason, "transaction cell degraded");
    }

    NormalizedTransactions {
        transactions,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holdings_csv(body: &str) -> Table {
        let csv = format!(
            "Symbol,Quantity,Avg Buy Price,Last Traded Price,Prev Close Price\n{}",
            body
        );
        Table::from_csv_str(&csv).unwrap()
    }

    fn transactions_csv(body: &str) -> Table {
        let csv = format!("Symbol,Type,Quantity,Price,Date\n{}", body);
        Table::from_csv_str(&csv).unwrap()
    }

    #[test]
    fn test_normalize_holdings_basic() {
        let table = holdings_csv("AAA,10,100,120,115\n");
        let holdings = normalize_holdings(&table).unwrap();

        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0], Holding::new("AAA", 10.0, 100.0, 120.0, 115.0));
    }

    #[test]
    fn test_normalize_holdings_missing_column_is_fatal() {
        let table =
            Table::from_csv_str("Symbol,Quantity,Last Traded Price,Prev Close Price\nAAA,10,1,1\n")
                .unwrap();

        let err = normalize_holdings(&table).unwrap_err();
        match err {
            Error::MissingColumns { table, columns } => {
                assert_eq!(table, "holdings");
                assert_eq!(columns, vec!["Avg Buy Price"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_holdings_unparsable_coerces_to_zero() {
        let table = holdings_csv("AAA,10,n/a,120,\n");
        let holdings = normalize_holdings(&table).unwrap();

        assert_eq!(holdings[0].avg_buy_price, 0.0);
        assert_eq!(holdings[0].prev_close_price, 0.0);
        assert_eq!(holdings[0].last_traded_price, 120.0);
    }

    #[test]
    fn test_normalize_holdings_drops_non_positive_quantity() {
        let table = holdings_csv("AAA,10,100,120,115\nBBB,0,50,60,55\nCCC,-5,50,60,55\nDDD,junk,50,60,55\n");
        let holdings = normalize_holdings(&table).unwrap();

        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].symbol, "AAA");
    }

    #[test]
    fn test_normalize_holdings_skips_blank_rows() {
        let table = holdings_csv(",,,,\nAAA,10,100,120,115\n");
        let holdings = normalize_holdings(&table).unwrap();

        assert_eq!(holdings.len(), 1);
    }

    #[test]
    fn test_normalize_holdings_thousands_separator() {
        let table = holdings_csv("AAA,\"1,000\",\"1,200.50\",120,115\n");
        let holdings = normalize_holdings(&table).unwrap();

        assert_eq!(holdings[0].quantity, 1000.0);
        assert_eq!(holdings[0].avg_buy_price, 1200.5);
    }

    #[test]
    fn test_normalize_transactions_basic() {
        let table = transactions_csv("AAA,buy,5,100,2024-01-15\nAAA,SELL,5,130,2024-02-01\n");
        let normalized = normalize_transactions(&table);

        assert!(normalized.issues.is_empty());
        assert_eq!(normalized.transactions.len(), 2);
        assert_eq!(normalized.transactions[0].side, Some(TradeSide::Buy));
        assert_eq!(normalized.transactions[1].side, Some(TradeSide::Sell));
        assert_eq!(normalized.transactions[1].price, Some(130.0));
    }

    #[test]
    fn test_normalize_transactions_missing_columns_degrades() {
        let table = Table::from_csv_str("Symbol,Type\nAAA,buy\n").unwrap();
        let normalized = normalize_transactions(&table);

        assert!(normalized.transactions.is_empty());
        assert_eq!(normalized.issues.len(), 1);
        assert_eq!(normalized.issues[0].row, None);
        assert!(normalized.issues[0].reason.contains("Quantity"));
        assert!(normalized.issues[0].reason.contains("Price"));
        assert!(normalized.issues[0].reason.contains("Date"));
    }

    #[test]
    fn test_normalize_transactions_bad_cells_become_markers() {
        let table = transactions_csv("AAA,hold,five,??,not-a-date\n");
        let normalized = normalize_transactions(&table);

        assert_eq!(normalized.transactions.len(), 1);
        let tx = &normalized.transactions[0];
        assert_eq!(tx.side, None);
        assert_eq!(tx.quantity, None);
        assert_eq!(tx.price, None);
        assert_eq!(tx.date, None);
        assert_eq!(normalized.issues.len(), 4);
        assert!(normalized.issues.iter().all(|issue| issue.row == Some(0)));
    }

    #[test]
    fn test_normalize_transactions_unknown_date_keeps_row() {
        let table = transactions_csv("AAA,sell,5,130,someday\n");
        let normalized = normalize_transactions(&table);

        let tx = &normalized.transactions[0];
        assert_eq!(tx.side, Some(TradeSide::Sell));
        assert_eq!(tx.price, Some(130.0));
        assert_eq!(tx.date, None);
        assert_eq!(normalized.issues.len(), 1);
    }

    #[test]
    fn test_normalize_transactions_records_row_index() {
        let table = transactions_csv("AAA,buy,5,100,2024-01-15\nBBB,sell,1,junk,2024-01-16\n");
        let normalized = normalize_transactions(&table);

        assert_eq!(normalized.transactions[1].row, 1);
        assert_eq!(normalized.issues, vec![RowIssue::at_row(1, "unparsable price")]);
    }
}
