//! Portfolio computation module.
//!
//! Provides per-holding valuation, realized P&L matching, and
//! portfolio-level aggregation. Every function here is a pure transform
//! of its input; nothing is cached or mutated across invocations.

mod realized;
mod summary;
mod valuation;

pub use realized::{match_realized, RealizedPnl};
pub use summary::{summarize, PortfolioSummary};
pub use valuation::{value_holdings, ValuedHolding};
