//! Per-holding valuation.

use crate::types::Holding;
use serde::{Deserialize, Serialize};

/// A holding augmented with its derived valuation metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValuedHolding {
    /// Ticker symbol
    pub symbol: String,
    /// Number of units held
    pub quantity: f64,
    /// Average purchase price per unit
    pub avg_buy_price: f64,
    /// Most recent traded price per unit
    pub last_traded_price: f64,
    /// Previous session's closing price per unit
    pub prev_close_price: f64,
    /// quantity * last_traded_price
    pub current_value: f64,
    /// quantity * avg_buy_price
    pub invested_amount: f64,
    /// current_value - invested_amount
    pub unrealized_pnl: f64,
    /// (last_traded_price - prev_close_price) * quantity
    pub daily_pnl: f64,
    /// unrealized_pnl / invested_amount * 100; `None` when nothing was
    /// invested (undefined, not zero)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnl_pct: Option<f64>,
}

impl ValuedHolding {
    /// Compute the derived metrics for a single holding.
    pub fn from_holding(holding: &Holding) -> Self {
        let current_value = holding.quantity * holding.last_traded_price;
        let invested_amount = holding.quantity * holding.avg_buy_price;
        let unrealized_pnl = current_value - invested_amount;
        let daily_pnl = (holding.last_traded_price - holding.prev_close_price) * holding.quantity;
        let pnl_pct = if invested_amount == 0.0 {
            None
        } else {
            Some(unrealized_pnl / invested_amount * 100.0)
        };

        Self {
            symbol: holding.symbol.clone(),
            quantity: holding.quantity,
            avg_buy_price: holding.avg_buy_price,
            last_traded_price: holding.last_traded_price,
            prev_close_price: holding.prev_close_price,
            current_value,
            invested_amount,
            unrealized_pnl,
            daily_pnl,
            pnl_pct,
        }
    }
}

/// Value every retained holding. Elementwise; no cross-row dependency.
pub fn value_holdings(holdings: &[Holding]) -> Vec<ValuedHolding> {
    holdings.iter().map(ValuedHolding::from_holding).collect()
}
