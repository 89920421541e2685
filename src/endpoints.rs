//! The endpoint URIs for the HTML pages and the JSON API.

/// The root route which lists all transactions.
pub const ROOT: &str = "/";
/// The page for adding a new transaction, also accepts the form submission.
pub const ADD_TRANSACTION_VIEW: &str = "/add";
/// The page for deleting a transaction by its ID, also accepts the form submission.
pub const DELETE_TRANSACTION: &str = "/delete";
/// The page for viewing the transactions in a single category.
pub const CATEGORY_VIEW: &str = "/category";
/// The page showing totals, recent income and charts.
pub const SUMMARY_VIEW: &str = "/summary";
/// The page for projecting spending against a budget.
pub const BUDGET_SUMMARY_VIEW: &str = "/budget_summary";
/// The page for recording income, also accepts the form submission.
pub const ADD_INCOME_VIEW: &str = "/add_income";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to list or create transactions as JSON.
pub const TRANSACTIONS_API: &str = "/transactions";
/// The route to list the category names as JSON.
pub const CATEGORIES_API: &str = "/categories";
/// The route to get the totals, and optionally the remaining budget, as JSON.
pub const SUMMARY_API: &str = "/api/summary";
