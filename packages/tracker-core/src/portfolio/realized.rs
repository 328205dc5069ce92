//! Realized P&L matching against average buy price per symbol.

use crate::types::{RowIssue, TradeSide, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Outcome of the realized P&L pass: the accumulated total plus the
/// degradation detail a caller (or test) can inspect directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RealizedPnl {
    /// Accumulated realized gain/loss across all matched sells
    pub total: f64,
    /// Sells that found buy history for their symbol
    pub matched_sells: usize,
    /// Symbols of sells with no buy history (each contributed 0)
    pub unmatched_sells: Vec<String>,
    /// Rows excluded from matching because of coercion markers
    pub skipped: Vec<RowIssue>,
}

impl RealizedPnl {
    /// Whether any degradation occurred during matching.
    pub fn is_degraded(&self) -> bool {
        !self.unmatched_sells.is_empty() || !self.skipped.is_empty()
    }
}

/// Match sells against the arithmetic mean buy price per symbol.
///
/// This is an average-cost, symbol-level approximation: buy history is
/// not depleted as sells are matched, so every sell of a symbol reuses
/// the same static average. Symbols are compared exact and
/// case-sensitive. A sell with no buy history contributes 0 and is
/// recorded in `unmatched_sells`; rows with unparsable type, quantity,
/// or price are recorded in `skipped`. The pass never aborts.
pub fn match_realized(transactions: &[Transaction]) -> RealizedPnl {
    // Mean buy price per symbol over buys with a parsable price
    let mut buy_sums: HashMap<&str, (f64, usize)> = HashMap::new();
    let mut result = RealizedPnl::default();

    for tx in transactions {
        if tx.side != Some(TradeSide::Buy) {
            continue;
        }
        match tx.price {
            Some(price) => {
                let entry = buy_sums.entry(tx.symbol.as_str()).or_insert((0.0, 0));
                entry.0 += price;
                entry.1 += 1;
            }
            None => {
                result.skipped.push(RowIssue::at_row(
                    tx.row,
                    "buy excluded from average: unparsable price",
                ));
            }
        }
    }

    for tx in transactions {
        match tx.side {
            Some(TradeSide::Sell) => {}
            Some(TradeSide::Buy) => continue,
            None => {
                result
                    .skipped
                    .push(RowIssue::at_row(tx.row, "unrecognized trade type"));
                continue;
            }
        }

        let (price, quantity) = match (tx.price, tx.quantity) {
            (Some(price), Some(quantity)) => (price, quantity),
            _ => {
                result.skipped.push(RowIssue::at_row(
                    tx.row,
                    "sell excluded: unparsable price or quantity",
                ));
                continue;
            }
        };

        match buy_sums.get(tx.symbol.as_str()) {
            Some(&(sum, count)) if count > 0 => {
                let avg_buy = sum / count as f64;
                result.total += (price - avg_buy) * quantity;
                result.matched_sells += 1;
            }
            _ => {
                result.unmatched_sells.push(tx.symbol.clone());
            }
        }
    }

    if result.is_degraded() {
        warn!(
            unmatched = result.unmatched_sells.len(),
            skipped = result.skipped.len(),
            "realized P&L computed with degradations"
        );
    }

    result
}
