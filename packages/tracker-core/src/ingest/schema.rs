//! Typed column schemas and cell coercion.
//!
//! Each input table declares its expected columns as a static schema
//! (name plus semantic kind). The normalizer enforces required columns
//! and runs the matching coercion routine; columns not named by a schema
//! are ignored.

use super::table::Table;
use chrono::NaiveDate;

/// Semantic kind of a declared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Kept as a trimmed string
    Text,
    /// Coerced to `f64`
    Decimal,
    /// Coerced to `NaiveDate`
    Date,
}

/// A declared column: exact header name and expected kind.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

/// Required columns of the holdings snapshot.
pub const HOLDINGS_SCHEMA: &[ColumnSpec] = &[
    ColumnSpec {
        name: "Symbol",
        kind: ColumnKind::Text,
    },
    ColumnSpec {
        name: "Quantity",
        kind: ColumnKind::Decimal,
    },
    ColumnSpec {
        name: "Avg Buy Price",
        kind: ColumnKind::Decimal,
    },
    ColumnSpec {
        name: "Last Traded Price",
        kind: ColumnKind::Decimal,
    },
    ColumnSpec {
        name: "Prev Close Price",
        kind: ColumnKind::Decimal,
    },
];

/// Required columns of the transaction ledger.
pub const TRANSACTIONS_SCHEMA: &[ColumnSpec] = &[
    ColumnSpec {
        name: "Symbol",
        kind: ColumnKind::Text,
    },
    ColumnSpec {
        name: "Type",
        kind: ColumnKind::Text,
    },
    ColumnSpec {
        name: "Quantity",
        kind: ColumnKind::Decimal,
    },
    ColumnSpec {
        name: "Price",
        kind: ColumnKind::Decimal,
    },
    ColumnSpec {
        name: "Date",
        kind: ColumnKind::Date,
    },
];

/// Names from the schema that the table lacks, in schema order.
pub fn missing_columns(table: &Table, schema: &[ColumnSpec]) -> Vec<String> {
    schema
        .iter()
        .filter(|spec| !table.has_column(spec.name))
        .map(|spec| spec.name.to_string())
        .collect()
}

/// Coerce a raw cell to a finite decimal.
///
/// Tolerates surrounding whitespace and thousands separators
/// ("1,234.50"). Blank cells and junk coerce to `None`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = trimmed.replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

/// Coerce a raw cell to a calendar date.
///
/// Tries the formats seen in sheet exports; anything else is an
/// explicit unknown (`None`), never an error.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    const FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y"];
    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    // Timestamp cells: keep the calendar component
    if let Some(prefix) = trimmed.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date);
        }
    }

    None
}
