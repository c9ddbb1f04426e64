//! Customer list utilities and portfolio-level aggregation.

pub mod customer;
pub mod filter;
pub mod metrics;

pub use customer::CustomerRecord;
pub use filter::{apply_query, filter_and_sort, BucketFilter, FilterQuery, SortKey};
pub use metrics::{
    calculate_portfolio_metrics, intervention_success_rates, InterventionOutcome,
    PortfolioAssumptions, PortfolioInput, PortfolioMetrics,
};
