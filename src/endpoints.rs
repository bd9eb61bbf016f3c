//! The API endpoint URIs.

/// The route that replaces the datastore contents from the remote dataset.
pub const INITIALIZE: &str = "/initialize";
/// The route for listing transactions with search and pagination.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for summary statistics for a month.
pub const STATISTICS: &str = "/statistics";
/// The route for price-bucket counts for a month.
pub const BAR_CHART: &str = "/bar-chart";
/// The route for per-category counts for a month.
pub const PIE_CHART: &str = "/pie-chart";
/// The route returning the transaction list and all three summary views for
/// a month in one response.
pub const COMBINED_DATA: &str = "/combined-data";
