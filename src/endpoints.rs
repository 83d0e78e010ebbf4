//! The API endpoints URIs.

/// The root route which reports that the server is up.
pub const ROOT: &str = "/";
/// The route to list, create and delete transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for summary statistics over all transactions.
pub const SUMMARY_API: &str = "/api/summary";
