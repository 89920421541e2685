//! Totals, charts and budget projections derived from transactions and income.

mod aggregation;
mod budget_page;
mod charts;
mod summary_page;

pub use aggregation::{
    Summary, daily_budget, days_left, filter_by_category, remaining_budget, remove_by_id,
    round_to_cents, summarize, totals_by_category, totals_by_date,
};
pub use budget_page::{get_budget_page, post_budget_page};
pub use summary_page::{get_summary_api, get_summary_page};
