//! End-to-end report pipeline: raw tables in, portfolio report out.

use crate::ingest::{normalize_holdings, normalize_transactions, Table};
use crate::portfolio::{match_realized, summarize, value_holdings, RealizedPnl, ValuedHolding};
use crate::types::RowIssue;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Complete valuation result: per-holding metrics, portfolio totals,
/// realized P&L detail, and any non-fatal warnings gathered on the way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioReport {
    /// Retained holdings with derived metrics
    pub holdings: Vec<ValuedHolding>,
    /// Portfolio-level totals
    pub summary: crate::portfolio::PortfolioSummary,
    /// Realized P&L with matching degradation detail
    pub realized: RealizedPnl,
    /// Coercion degradations from the transaction ledger
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<RowIssue>,
}

/// Run the full pipeline over the two raw tables.
///
/// The only fatal outcome is a holdings table missing required columns;
/// a malformed transaction ledger degrades realized P&L to a
/// best-effort value with warnings attached to the result.
pub fn compute_report(holdings: &Table, transactions: &Table) -> Result<PortfolioReport> {
    let normalized_holdings = normalize_holdings(holdings)?;
    let valued = value_holdings(&normalized_holdings);

    let normalized_transactions = normalize_transactions(transactions);
    let realized = match_realized(&normalized_transactions.transactions);

    let summary = summarize(&valued, &realized);

    Ok(PortfolioReport {
        holdings: valued,
        summary,
        realized,
        warnings: normalized_transactions.issues,
    })
}
