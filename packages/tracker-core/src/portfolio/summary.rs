//! Portfolio-level aggregation.

use super::realized::RealizedPnl;
use super::valuation::ValuedHolding;
use serde::{Deserialize, Serialize};

/// Portfolio-level totals, recomputed in full on every invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioSummary {
    /// Sum of current values across retained holdings
    pub total_value: f64,
    /// Sum of invested amounts
    pub total_invested: f64,
    /// Sum of unrealized P&L
    pub total_unrealized_pnl: f64,
    /// Sum of daily P&L
    pub total_daily_pnl: f64,
    /// total_unrealized_pnl / total_invested * 100; defined as 0 when
    /// nothing is invested (unlike the per-position sentinel)
    pub overall_return_pct: f64,
    /// Realized gain/loss from the matcher
    pub realized_pnl: f64,
    /// Number of retained holdings
    pub position_count: usize,
}

/// Aggregate valued holdings and realized P&L into portfolio totals.
///
/// Pure and idempotent for a given input; holdings dropped by the
/// normalizer never reach this point.
pub fn summarize(holdings: &[ValuedHolding], realized: &RealizedPnl) -> PortfolioSummary {
    let total_value: f64 = holdings.iter().map(|h| h.current_value).sum();
    let total_invested: f64 = holdings.iter().map(|h| h.invested_amount).sum();
    let total_unrealized_pnl: f64 = holdings.iter().map(|h| h.unrealized_pnl).sum();
    let total_daily_pnl: f64 = holdings.iter().map(|h| h.daily_pnl).sum();

    let overall_return_pct = if total_invested > 0.0 {
        total_unrealized_pnl / total_invested * 100.0
    } else {
        0.0
    };

    PortfolioSummary {
        total_value,
        total_invested,
        total_unrealized_pnl,
        total_daily_pnl,
        overall_return_pct,
        realized_pnl: realized.total,
        position_count: holdings.len(),
    }
}
