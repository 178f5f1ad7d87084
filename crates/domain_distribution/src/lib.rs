//! Distribution Domain - Settlement proceeds waterfall
//!
//! This crate allocates aggregate settlement proceeds across the parties to
//! a litigation-funding priority deed.
//!
//! # Key Concepts
//!
//! - **Priority tiers**: outstanding costs, first-tier funder return and
//!   distribution cost overrun, each paid in full before the next
//! - **Net proceeds**: whatever remains, split between funder and firm
//! - **DBA proceeds**: the fee share of successful claims that feeds the
//!   waterfall at portfolio level
//! - **LFA compliance**: per-claim checks against the funding agreement
//!
//! # Conservation
//!
//! For any non-negative gross amount the funder, firm and claims processor
//! shares sum exactly to the gross.

pub mod priority;
pub mod waterfall;
pub mod metrics;
pub mod compliance;
pub mod error;

pub use priority::{PriorityRules, PriorityTerms};
pub use waterfall::{DistributionResult, Recipient, Tier, TierPayment, WaterfallDistributor};
pub use metrics::{calculate_portfolio_metrics, DbaTerms, PortfolioMetrics, PortfolioTotals};
pub use compliance::{
    check_lfa_compliance, ComplianceCheck, ComplianceReport, ComplianceStatus, FundedClaim, LfaTerms,
};
pub use error::DistributionError;
